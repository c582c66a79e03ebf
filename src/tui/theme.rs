//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Cyan: window frame and interactive hints
//! - Reversed: cursor highlight (dimmed on the blink's low half)
//! - Yellow: the last sound cue
//! - Green: finished choice
//! - Dim: status and help text

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// WINDOW
// ============================================================================

/// Border of an open or animating window.
pub const STYLE_FRAME: Style = Style::new().fg(Color::Cyan);

/// Border of an inactive window.
pub const STYLE_FRAME_INACTIVE: Style = Style::new().fg(Color::DarkGray);

/// Unselected command label.
pub const STYLE_ITEM: Style = Style::new().fg(Color::White);

/// Cursor row, bright half of the blink.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Cursor row, dim half of the blink.
pub const STYLE_CURSOR_DIM: Style = Style::new()
    .add_modifier(Modifier::REVERSED)
    .add_modifier(Modifier::DIM);

// ============================================================================
// CHROME
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Help panel text.
pub const STYLE_HELP: Style = Style::new().fg(Color::Cyan);

/// Status line.
pub const STYLE_STATUS: Style = Style::new().fg(Color::DarkGray);

/// Last played cue.
pub const STYLE_CUE: Style = Style::new().fg(Color::Yellow);

/// Result of a finished scene.
pub const STYLE_DONE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Recoverable error notice.
pub const STYLE_NOTICE: Style = Style::new().fg(Color::Red);

/// Cursor opacity below which the dim cursor style is used.
pub const CURSOR_DIM_THRESHOLD: u8 = 192;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_styles_are_reversed() {
        assert!(STYLE_CURSOR.add_modifier.contains(Modifier::REVERSED));
        assert!(STYLE_CURSOR_DIM.add_modifier.contains(Modifier::REVERSED));
        assert!(STYLE_CURSOR_DIM.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn frame_styles_differ_by_activity() {
        assert_eq!(STYLE_FRAME.fg, Some(Color::Cyan));
        assert_eq!(STYLE_FRAME_INACTIVE.fg, Some(Color::DarkGray));
    }
}
