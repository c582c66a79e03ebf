//! window-openness CLI
//!
//! Run the command-window demo in a terminal, or simulate an open/close
//! ramp headlessly and print every frame.

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use window_openness::config::{APP_DIR, Settings};
use window_openness::openness::Target;
use window_openness::report::format_report;
use window_openness::simulate::simulate;
use window_openness::tui;
use window_openness::types::{OpenMode, OutputFormat, Rect};

#[derive(Parser)]
#[command(name = "window-openness")]
#[command(about = "Frame-stepped window open/close transitions with cursor navigation")]
#[command(version)]
struct Cli {
    /// Log filter, e.g. "debug" or "window_openness=trace" (default: RUST_LOG, else warn)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a command window in the terminal and pick an item
    Demo {
        /// Config file (default: <config dir>/window-openness/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Open mode override
        #[arg(long, value_enum)]
        mode: Option<OpenModeArg>,

        /// Openness change per frame
        #[arg(long)]
        step: Option<u32>,

        /// Cursor columns
        #[arg(long)]
        columns: Option<usize>,

        /// Replace the commands with N numbered items
        #[arg(long)]
        items: Option<usize>,

        /// Ring the terminal bell on sound cues
        #[arg(long)]
        bell: bool,

        /// Log file (default: <cache dir>/window-openness/demo.log)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Run an open (or close) ramp without a terminal and print each frame
    Simulate {
        /// Config file (default: <config dir>/window-openness/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Open mode override
        #[arg(long, value_enum)]
        mode: Option<OpenModeArg>,

        /// Openness change per frame
        #[arg(long)]
        step: Option<u32>,

        /// Openness of a fully open window
        #[arg(long)]
        max: Option<u32>,

        /// Window height in pixels
        #[arg(long, default_value_t = 192)]
        height: i32,

        /// Simulate closing an open window instead of opening
        #[arg(long)]
        close: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Print the effective settings as TOML
    Config {
        /// Config file (default: <config dir>/window-openness/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OpenModeArg {
    None,
    Top,
    Center,
    Bottom,
}

impl From<OpenModeArg> for OpenMode {
    fn from(arg: OpenModeArg) -> Self {
        match arg {
            OpenModeArg::None => OpenMode::None,
            OpenModeArg::Top => OpenMode::Top,
            OpenModeArg::Center => OpenMode::Center,
            OpenModeArg::Bottom => OpenMode::Bottom,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo {
            config,
            mode,
            step,
            columns,
            items,
            bell,
            log_file,
        } => cmd_demo(
            config,
            DemoOverrides {
                mode: mode.map(Into::into),
                step,
                columns,
                items,
                bell,
            },
            log_file,
            cli.log_level.as_deref(),
        ),
        Commands::Simulate {
            config,
            mode,
            step,
            max,
            height,
            close,
            format,
        } => {
            init_stderr_logging(cli.log_level.as_deref());
            cmd_simulate(config, mode.map(Into::into), step, max, height, close, format.into())
        }
        Commands::Config { config } => {
            init_stderr_logging(cli.log_level.as_deref());
            cmd_config(config)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

fn env_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

/// Log to stderr so reports on stdout stay clean.
fn init_stderr_logging(level: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .init();
}

/// Log to a file; the terminal belongs to the demo UI.
///
/// The returned guard flushes the writer when dropped.
fn init_file_logging(level: Option<&str>, path: Option<PathBuf>) -> Result<WorkerGuard, String> {
    let path = match path {
        Some(path) => path,
        None => dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR)
            .join("demo.log"),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }
    let file = File::create(&path)
        .map_err(|e| format!("Failed to create log file {}: {}", path.display(), e))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    debug!(path = %path.display(), "logging to file");
    Ok(guard)
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

/// Demo flags layered over the config file.
struct DemoOverrides {
    mode: Option<OpenMode>,
    step: Option<u32>,
    columns: Option<usize>,
    items: Option<usize>,
    bell: bool,
}

fn cmd_demo(
    config: Option<PathBuf>,
    overrides: DemoOverrides,
    log_file: Option<PathBuf>,
    log_level: Option<&str>,
) -> Result<(), String> {
    let _guard = init_file_logging(log_level, log_file)?;

    let mut settings = Settings::discover(config.as_deref()).map_err(|e| e.to_string())?;
    if let Some(mode) = overrides.mode {
        settings.window.open_mode = mode;
    }
    if let Some(step) = overrides.step {
        settings.window.step = step;
    }
    if let Some(columns) = overrides.columns {
        settings.window.columns = columns;
    }
    if let Some(items) = overrides.items {
        settings.demo.commands = (1..=items).map(|i| format!("Item {}", i)).collect();
        settings.demo.help = (1..=items).map(|i| format!("Help for item {}.", i)).collect();
    }
    settings.demo.bell |= overrides.bell;
    settings.validate().map_err(|e| e.to_string())?;

    if settings.demo.commands.is_empty() {
        return Err("Nothing to show: the command list is empty".to_string());
    }

    tui::run::run(&settings).map_err(|e| format!("Terminal error: {}", e))
}

fn cmd_simulate(
    config: Option<PathBuf>,
    mode: Option<OpenMode>,
    step: Option<u32>,
    max: Option<u32>,
    height: i32,
    close: bool,
    format: OutputFormat,
) -> Result<(), String> {
    let mut settings = Settings::discover(config.as_deref()).map_err(|e| e.to_string())?;
    let window = &mut settings.window;
    if let Some(mode) = mode {
        window.open_mode = mode;
    }
    if let Some(step) = step {
        window.step = step;
    }
    if let Some(max) = max {
        window.max_openness = max;
    }
    settings.validate().map_err(|e| e.to_string())?;
    if height <= 0 {
        return Err("--height must be > 0".to_string());
    }

    let target = if close { Target::Closed } else { Target::Open };
    let rect = Rect::new(0, 0, 640, height);
    let report = simulate(&settings.window, rect, target).map_err(|e| e.to_string())?;

    print!("{}", format_report(&report, format));
    Ok(())
}

fn cmd_config(config: Option<PathBuf>) -> Result<(), String> {
    let settings = Settings::discover(config.as_deref()).map_err(|e| e.to_string())?;
    if config.is_none() {
        if let Some(path) = Settings::default_path() {
            eprintln!("Config path: {}", path.display());
        }
    }
    print!("{}", settings.to_toml().map_err(|e| e.to_string())?);
    Ok(())
}
