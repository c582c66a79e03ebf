//! Seams to the host engine.
//!
//! The window core never reaches for globals. The host hands it a frame
//! pump, an input source and an audio sink, and may compose its own base
//! window behavior in front of the cycle through [`BaseUpdate`].

use std::io;

use crate::types::{Button, Cue, Point};
use crate::window::{Surface, WindowView};

/// Renders one frame and advances host timers and input.
pub trait FramePump {
    /// `view` is the window the caller is waiting on, for hosts that draw it.
    fn advance_frame(&mut self, view: &WindowView) -> io::Result<()>;
}

/// Input state for the current frame.
pub trait InputSource {
    /// Held this frame.
    fn is_pressed(&self, button: Button) -> bool;

    /// Went down this frame.
    fn is_triggered(&self, button: Button) -> bool;

    /// Went down this frame or fired an auto-repeat tick.
    fn is_repeated(&self, button: Button) -> bool;

    fn pointer_clicked(&self) -> bool {
        false
    }

    fn pointer_position(&self) -> Option<Point> {
        None
    }
}

/// Fire-and-forget sound cues.
pub trait AudioCueSink {
    fn play(&mut self, cue: Cue);

    fn play_cursor_move(&mut self) {
        self.play(Cue::CursorMove);
    }

    fn play_confirm(&mut self) {
        self.play(Cue::Confirm);
    }

    fn play_cancel(&mut self) {
        self.play(Cue::Cancel);
    }
}

/// Everything a window reads and writes during its update.
pub trait FrameContext: InputSource + AudioCueSink {}

impl<T: InputSource + AudioCueSink + ?Sized> FrameContext for T {}

/// Host behavior run at the start of every window update, before the
/// openness and cursor logic.
pub trait BaseUpdate {
    fn update(&mut self, surface: &mut Surface);
}

/// Host base update that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBase;

impl BaseUpdate for NoBase {
    fn update(&mut self, _surface: &mut Surface) {}
}

/// Host base update that pulses the cursor highlight.
///
/// Cursor opacity ramps 255 → 127 → 255 over a 40-frame period.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorBlink {
    count: u32,
}

impl CursorBlink {
    pub const PERIOD: u32 = 40;
}

impl BaseUpdate for CursorBlink {
    fn update(&mut self, surface: &mut Surface) {
        self.count = (self.count + 1) % Self::PERIOD;
        let half = Self::PERIOD / 2;
        let distance = self.count.abs_diff(half);
        surface.cursor_opacity = (127 + distance * 128 / half).min(255) as u8;
    }
}
