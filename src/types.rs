//! Shared value types for the windowing core.
//!
//! Plain data: geometry, open modes, input directions, audio cues.
//! Everything here is `Copy` and free of behavior beyond small helpers.

use serde::{Deserialize, Serialize};

// ============================================================================
// GEOMETRY
// ============================================================================

/// A point in host screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned rectangle in host screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    /// True if the point lies inside the rectangle (right/bottom edges exclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Same rectangle moved by `(dx, dy)`.
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

// ============================================================================
// OPEN MODES
// ============================================================================

/// How the host animates a window between closed and open.
///
/// `None` keeps the classic behavior: openness still changes, but the
/// window frame is drawn at full size the whole time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    None,
    /// Grows downward from the top edge.
    Top,
    /// Grows outward from the vertical center.
    #[default]
    Center,
    /// Grows upward from the bottom edge.
    Bottom,
}

impl OpenMode {
    /// Whether this mode animates at all.
    pub fn animates(self) -> bool {
        self != OpenMode::None
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Buttons the window cycle reads from the host input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Button {
    Down,
    Left,
    Right,
    Up,
    /// Confirm (C / Enter).
    Confirm,
    /// Cancel (B / Esc).
    Cancel,
    /// Page backward (L).
    PageUp,
    /// Page forward (R).
    PageDown,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Confirm,
        Button::Cancel,
        Button::PageUp,
        Button::PageDown,
    ];
}

/// A cursor direction on the selection grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The button that drives this direction.
    pub fn button(self) -> Button {
        match self {
            Direction::Up => Button::Up,
            Direction::Down => Button::Down,
            Direction::Left => Button::Left,
            Direction::Right => Button::Right,
        }
    }
}

/// A page scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Forward,
    Backward,
}

// ============================================================================
// AUDIO
// ============================================================================

/// Fire-and-forget sound cue requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    CursorMove,
    Confirm,
    Cancel,
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
