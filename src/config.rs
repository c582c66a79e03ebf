//! Settings for windows and the terminal demo.
//!
//! Plain structs with defaults, optionally overridden by a TOML file.
//! Lookup order: explicit `--config` path, then
//! `<config dir>/window-openness/config.toml` if it exists, then defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::openness::{DEFAULT_MAX, DEFAULT_STEP};
use crate::types::OpenMode;
use crate::window::Metrics;

/// Directory name under the platform config dir.
pub const APP_DIR: &str = "window-openness";

/// File name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

// ============================================================================
// WINDOW
// ============================================================================

/// Per-window behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Openness of a fully open window.
    pub max_openness: u32,
    /// Openness gained or lost per frame.
    pub step: u32,
    pub open_mode: OpenMode,
    /// Construct fully open instead of closed.
    pub start_open: bool,
    pub columns: usize,
    /// Frame budget for blocking open/close waits.
    pub wait_limit: u32,
    pub metrics: Metrics,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            max_openness: DEFAULT_MAX,
            step: DEFAULT_STEP,
            open_mode: OpenMode::Center,
            start_open: false,
            columns: 1,
            wait_limit: 600,
            metrics: Metrics::default(),
        }
    }
}

// ============================================================================
// DEMO
// ============================================================================

/// Terminal demo scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Command labels shown in the window.
    pub commands: Vec<String>,
    /// Help line per command; missing entries show nothing.
    pub help: Vec<String>,
    /// Ring the terminal bell on cursor and confirm cues.
    pub bell: bool,
    pub fps: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            commands: ["New Game", "Continue", "Options", "Credits", "Shutdown"]
                .map(String::from)
                .to_vec(),
            help: [
                "Start a new adventure.",
                "Resume from a saved file.",
                "Change sound and window settings.",
                "See who made this.",
                "Leave the game.",
            ]
            .map(String::from)
            .to_vec(),
            bell: false,
            fps: 40,
        }
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Everything read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowConfig,
    pub demo: DemoConfig,
}

impl Settings {
    /// `<config dir>/window-openness/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `explicit`, else the default path if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&text, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }

    /// Parse and validate TOML text. `path` is only used in errors.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = &self.window;
        if window.max_openness == 0 {
            return Err(ConfigError::Invalid("window.max_openness must be > 0".into()));
        }
        if window.step == 0 {
            return Err(ConfigError::Invalid("window.step must be > 0".into()));
        }
        if window.columns == 0 {
            return Err(ConfigError::Invalid("window.columns must be > 0".into()));
        }
        if window.metrics.row_height <= 0 {
            return Err(ConfigError::Invalid("window.metrics.row_height must be > 0".into()));
        }
        if self.demo.fps == 0 {
            return Err(ConfigError::Invalid("demo.fps must be > 0".into()));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
