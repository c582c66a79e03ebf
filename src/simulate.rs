//! Headless ramp simulation.
//!
//! Drives a window through a full open or close with a host that draws
//! nothing and only records what each frame would have shown.

use std::io;

use serde::Serialize;

use crate::blocking::{wait_until_closed, wait_until_open, WaitOptions};
use crate::config::WindowConfig;
use crate::error::WaitError;
use crate::host::{AudioCueSink, FramePump, InputSource};
use crate::openness::Target;
use crate::types::{Button, Cue, OpenMode, Rect};
use crate::window::{Window, WindowView};

/// One pumped frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RampFrame {
    pub frame: u32,
    pub openness: u32,
    /// Height of the drawn frame; 0 when nothing is drawn.
    pub visible_height: i32,
    pub visible_y: Option<i32>,
}

/// Outcome of a simulated transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RampReport {
    pub target: String,
    pub open_mode: OpenMode,
    pub step: u32,
    pub max_openness: u32,
    pub rect: Rect,
    /// Frames pumped before the target was reached.
    pub ticks: u32,
    pub frames: Vec<RampFrame>,
    pub final_openness: u32,
    pub visible_after: bool,
}

/// Host with no display and no input.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    frames: Vec<RampFrame>,
}

impl HeadlessHost {
    pub fn frames(&self) -> &[RampFrame] {
        &self.frames
    }
}

impl FramePump for HeadlessHost {
    fn advance_frame(&mut self, view: &WindowView) -> io::Result<()> {
        self.frames.push(RampFrame {
            frame: self.frames.len() as u32,
            openness: view.openness,
            visible_height: view.frame.map_or(0, |r| r.height),
            visible_y: view.frame.map(|r| r.y),
        });
        Ok(())
    }
}

impl InputSource for HeadlessHost {
    fn is_pressed(&self, _: Button) -> bool {
        false
    }

    fn is_triggered(&self, _: Button) -> bool {
        false
    }

    fn is_repeated(&self, _: Button) -> bool {
        false
    }
}

impl AudioCueSink for HeadlessHost {
    fn play(&mut self, _: Cue) {}
}

/// Open a closed window (or close an open one) and record every frame.
pub fn simulate(config: &WindowConfig, rect: Rect, target: Target) -> Result<RampReport, WaitError> {
    let config = WindowConfig {
        start_open: target == Target::Closed,
        ..config.clone()
    };
    let mut window = Window::new(rect, 0, &config);
    let mut host = HeadlessHost::default();
    let options = WaitOptions::bounded(config.wait_limit);

    let ticks = match target {
        Target::Open => {
            window.open();
            wait_until_open(&mut window, &mut host, &options)?
        }
        Target::Closed => {
            window.close();
            wait_until_closed(&mut window, &mut host, &options)?
        }
    };

    Ok(RampReport {
        target: target.to_string(),
        open_mode: config.open_mode,
        step: window.openness().step(),
        max_openness: window.openness().max(),
        rect,
        ticks,
        frames: host.frames,
        final_openness: window.openness().value(),
        visible_after: window.is_visible(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(step: u32, mode: OpenMode) -> WindowConfig {
        WindowConfig {
            step,
            open_mode: mode,
            ..WindowConfig::default()
        }
    }

    #[test]
    fn open_ramp_records_each_frame() {
        let report = simulate(&config(14, OpenMode::Center), Rect::new(0, 0, 100, 100), Target::Open)
            .unwrap();
        assert_eq!(report.ticks, 19);
        assert_eq!(report.frames.len(), 19);
        assert_eq!(report.final_openness, 255);
        assert_eq!(report.frames[0].visible_height, 0);
        assert_eq!(report.frames[1].openness, 14);
        assert!(report.visible_after);
    }

    #[test]
    fn close_ramp_hides_window() {
        let report = simulate(&config(64, OpenMode::Bottom), Rect::new(0, 0, 100, 100), Target::Closed)
            .unwrap();
        assert_eq!(report.ticks, 4);
        assert_eq!(report.final_openness, 0);
        assert!(!report.visible_after);
        assert_eq!(report.frames[0].visible_height, 100);
        assert_eq!(report.frames[0].visible_y, Some(0));
    }

    #[test]
    fn unanimated_mode_finishes_instantly() {
        let report = simulate(&config(10, OpenMode::None), Rect::new(0, 0, 100, 100), Target::Open)
            .unwrap();
        assert_eq!(report.ticks, 0);
        assert!(report.frames.is_empty());
        assert_eq!(report.final_openness, 255);
    }
}
