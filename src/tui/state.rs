//! TUI state algebra: pure types, zero effects.
//!
//! The demo scene is a tiny state machine wrapped around one command
//! window. The window owns its own openness and cursor; the scene only
//! decides when to open it, when to close it, and what the choice was.

use crate::config::{Settings, WindowConfig};
use crate::openness::Target;
use crate::types::{Button, Cue, Rect};
use crate::window::{HelpPanel, Metrics, Window};

// ============================================================================
// KEY INPUT
// ============================================================================

/// What a terminal key means before it reaches the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A game button, fed to the window through its input source.
    Button(Button),
    /// A scene-level command that bypasses the window.
    Action(Action),
}

// ============================================================================
// SCENE
// ============================================================================

/// Where the demo scene is in its life.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scene {
    /// Command window is opening; input is not read yet.
    #[default]
    Entering,
    /// Command window is open and taking input.
    Running,
    /// Command window finished closing after a choice.
    Done {
        /// Selected command, None when cancelled.
        choice: Option<usize>,
    },
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic scene action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Accept the highlighted command.
    Confirm,
    /// Back out without a choice.
    Cancel,
    /// Request open, even mid-close.
    ForceOpen,
    /// Request close, even mid-open.
    ForceClose,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure scene transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Scene(Scene),
    Quit,
    Effect(Effect),
}

/// Side effect requested by a pure transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Play `cue`, close the window and block until it is closed, then
    /// land on `Scene::Done`.
    Leave { choice: Option<usize>, cue: Cue },
    /// Ask the window's openness controller for a direction.
    Request(Target),
    /// Show the window again and start opening it.
    Reopen,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub scene: Scene,
    pub window: Window,
    pub commands: Vec<String>,
    /// Last cue played, shown in the status line.
    pub last_cue: Option<Cue>,
    /// Last recoverable error, shown in the status line.
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Build the scene for a terminal of `width` x `height` cells. The
    /// window starts closed; call `window.open()` to begin.
    pub fn new(settings: &Settings, width: u16, height: u16) -> Self {
        let config = WindowConfig {
            metrics: Metrics::TERMINAL,
            ..settings.window.clone()
        };
        let commands = settings.demo.commands.clone();
        let rect = window_rect(&commands, config.columns, width, height);

        let mut window = Window::new(rect, commands.len(), &config);
        window.set_help(HelpPanel::new(settings.demo.help.clone()));
        window.set_index(Some(0));

        App {
            scene: Scene::Entering,
            window,
            commands,
            last_cue: None,
            notice: None,
            should_quit: false,
        }
    }

    /// Re-center the window after a terminal resize.
    pub fn relayout(&mut self, width: u16, height: u16) {
        let columns = self.window.selection().column_count();
        let rect = window_rect(&self.commands, columns, width, height);
        self.window.set_rect(rect);
    }
}

/// Centered command window sized to its labels, leaving room for the
/// title, help and status lines.
pub fn window_rect(commands: &[String], columns: usize, width: u16, height: u16) -> Rect {
    let metrics = Metrics::TERMINAL;
    let columns = columns.max(1) as i32;
    let label_width = commands
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0) as i32;
    let cell_width = label_width + 2 + metrics.column_spacing;
    let inner_width = columns * cell_width - metrics.column_spacing;
    let rows = (commands.len() as i32 + columns - 1) / columns;
    let max_rows = (height as i32 - 6 - 2 * metrics.padding).max(1);
    let inner_height = rows.clamp(1, max_rows) * metrics.row_height;

    let outer_width = inner_width + 2 * metrics.padding;
    let outer_height = inner_height + 2 * metrics.padding;
    Rect::new(
        ((width as i32 - outer_width) / 2).max(0),
        ((height as i32 - outer_height) / 2).max(0),
        outer_width,
        outer_height,
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(commands: &[&str]) -> Settings {
        let mut settings = Settings::default();
        settings.demo.commands = commands.iter().map(|c| c.to_string()).collect();
        settings
    }

    #[test]
    fn app_starts_entering_with_closed_window() {
        let app = App::new(&settings(&["Hi!", "Bye!"]), 80, 24);
        assert_eq!(app.scene, Scene::Entering);
        assert!(app.window.is_closed());
        assert_eq!(app.window.index(), Some(0));
        assert!(!app.should_quit);
    }

    #[test]
    fn window_is_centered_and_sized_to_labels() {
        let commands = vec!["Hi!".to_string(), "Bye!".to_string()];
        let rect = window_rect(&commands, 1, 80, 24);
        // label 4 + cursor margin 2, plus border
        assert_eq!(rect.width, 8);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.x, 36);
        assert_eq!(rect.y, 10);
    }

    #[test]
    fn tall_lists_are_capped_to_the_terminal() {
        let commands: Vec<String> = (0..50).map(|i| format!("Item {}", i)).collect();
        let rect = window_rect(&commands, 1, 80, 24);
        assert_eq!(rect.height, 18);
    }

    #[test]
    fn multi_column_width_includes_spacing() {
        let commands: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let rect = window_rect(&commands, 2, 80, 24);
        // two cells of 3 + 2 spacing, minus trailing spacing, plus border
        assert_eq!(rect.width, 10);
        assert_eq!(rect.height, 4);
    }

    #[test]
    fn page_rows_match_capped_height() {
        let mut settings = Settings::default();
        settings.demo.commands = (0..50).map(|i| format!("Item {}", i)).collect();
        let app = App::new(&settings, 80, 24);
        assert_eq!(app.window.selection().page_row_count(), 16);
    }

    #[test]
    fn default_action_equality() {
        assert_eq!(Action::Confirm, Action::Confirm);
        assert_ne!(Action::ForceOpen, Action::ForceClose);
    }
}
