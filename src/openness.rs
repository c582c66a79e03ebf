//! Openness controller: a saturating ramp between closed and open.
//!
//! Each window owns one [`Openness`]. A request sets the [`Transition`];
//! every frame [`Openness::tick`] moves the value one step toward the
//! target and falls back to `Idle` at the bound. Because the ramp
//! saturates, any transition finishes within `ceil(max / step)` ticks and
//! ticking an idle controller is a no-op.

use std::fmt;

use tracing::debug;

use crate::types::{OpenMode, Rect};

/// Host convention for a fully open window.
pub const DEFAULT_MAX: u32 = 255;

/// Openness gained or lost per frame unless configured otherwise.
pub const DEFAULT_STEP: u32 = 10;

// ============================================================================
// STATE
// ============================================================================

/// Which way the ramp is currently moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    Idle,
    Opening,
    Closing,
}

impl Transition {
    pub fn is_idle(self) -> bool {
        self == Transition::Idle
    }
}

/// One end of the ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Open,
    Closed,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Open => write!(f, "open"),
            Target::Closed => write!(f, "closed"),
        }
    }
}

/// Openness value plus the transition driving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Openness {
    value: u32,
    max: u32,
    step: u32,
    transition: Transition,
}

impl Openness {
    /// A closed, idle controller. `max` and `step` are raised to at least 1.
    pub fn new(max: u32, step: u32) -> Self {
        Openness {
            value: 0,
            max: max.max(1),
            step: step.max(1),
            transition: Transition::Idle,
        }
    }

    /// A fully open, idle controller.
    pub fn opened(max: u32, step: u32) -> Self {
        let mut openness = Openness::new(max, step);
        openness.value = openness.max;
        openness
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn is_open(&self) -> bool {
        self.value == self.max
    }

    pub fn is_closed(&self) -> bool {
        self.value == 0
    }

    pub fn is_at(&self, target: Target) -> bool {
        match target {
            Target::Open => self.is_open(),
            Target::Closed => self.is_closed(),
        }
    }

    /// Whether the current transition moves toward `target`.
    pub fn is_heading_to(&self, target: Target) -> bool {
        matches!(
            (self.transition, target),
            (Transition::Opening, Target::Open) | (Transition::Closing, Target::Closed)
        )
    }

    /// Start opening. Overrides an in-flight close; the ramp continues
    /// from the current value.
    pub fn request_open(&mut self) {
        if self.transition == Transition::Idle && self.is_open() {
            return;
        }
        if self.transition == Transition::Closing {
            debug!(openness = self.value, "open request overrides close");
        }
        self.transition = Transition::Opening;
    }

    /// Start closing. Overrides an in-flight open.
    pub fn request_close(&mut self) {
        if self.transition == Transition::Idle && self.is_closed() {
            return;
        }
        if self.transition == Transition::Opening {
            debug!(openness = self.value, "close request overrides open");
        }
        self.transition = Transition::Closing;
    }

    /// Advance one frame. Returns whether a transition is still in progress.
    pub fn tick(&mut self) -> bool {
        match self.transition {
            Transition::Idle => {}
            Transition::Opening => {
                self.value = self.value.saturating_add(self.step).min(self.max);
                if self.is_open() {
                    self.transition = Transition::Idle;
                }
            }
            Transition::Closing => {
                self.value = self.value.saturating_sub(self.step);
                if self.is_closed() {
                    self.transition = Transition::Idle;
                }
            }
        }
        !self.transition.is_idle()
    }

    /// Assign the value directly, clamped to `[0, max]`. The transition is
    /// left alone, so an in-flight ramp resumes from here.
    pub fn set_value(&mut self, value: u32) {
        self.value = value.min(self.max);
    }

    /// Jump to `target` and go idle.
    pub fn snap(&mut self, target: Target) {
        self.value = match target {
            Target::Open => self.max,
            Target::Closed => 0,
        };
        self.transition = Transition::Idle;
    }

    /// Upper bound on ticks any transition can take.
    pub fn max_ticks(&self) -> u32 {
        self.max.div_ceil(self.step)
    }
}

// ============================================================================
// OPEN MODE GEOMETRY
// ============================================================================

/// The part of `rect` drawn at the given openness.
///
/// `OpenMode::None` always draws the full frame. Animated modes scale the
/// height by `openness / max` and anchor it at the top, center or bottom;
/// they draw nothing once the scaled height reaches zero.
pub fn visible_rect(rect: Rect, mode: OpenMode, openness: u32, max: u32) -> Option<Rect> {
    if !mode.animates() {
        return Some(rect);
    }
    let max = max.max(1) as i64;
    let openness = (openness as i64).min(max);
    let height = (rect.height.max(0) as i64 * openness / max) as i32;
    if height == 0 {
        return None;
    }
    let y = match mode {
        OpenMode::Top | OpenMode::None => rect.y,
        OpenMode::Center => rect.y + (rect.height - height) / 2,
        OpenMode::Bottom => rect.y + rect.height - height,
    };
    Some(Rect::new(rect.x, y, rect.width, height))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_idle(openness: &mut Openness) -> u32 {
        let mut ticks = 0;
        while !openness.transition().is_idle() {
            openness.tick();
            ticks += 1;
            assert!(ticks <= openness.max_ticks(), "ramp did not converge");
        }
        ticks
    }

    #[test]
    fn new_is_closed_and_idle() {
        let openness = Openness::new(DEFAULT_MAX, DEFAULT_STEP);
        assert!(openness.is_closed());
        assert_eq!(openness.transition(), Transition::Idle);
    }

    #[test]
    fn opened_starts_at_max() {
        let openness = Openness::opened(255, 10);
        assert!(openness.is_open());
        assert_eq!(openness.value(), 255);
    }

    #[test]
    fn step_14_reaches_255_on_tick_19() {
        let mut openness = Openness::new(255, 14);
        openness.request_open();
        for _ in 0..18 {
            assert!(openness.tick());
        }
        assert_eq!(openness.value(), 252);
        assert!(!openness.tick());
        assert_eq!(openness.value(), 255);
        assert_eq!(openness.transition(), Transition::Idle);
    }

    #[test]
    fn opening_converges_within_bound_for_many_steps() {
        for max in [1, 7, 100, 255, 1000] {
            for step in [1, 2, 3, 10, 14, 64, 255, 2000] {
                let mut openness = Openness::new(max, step);
                openness.request_open();
                let ticks = run_until_idle(&mut openness);
                assert_eq!(openness.value(), max);
                assert_eq!(ticks, max.div_ceil(step));
            }
        }
    }

    #[test]
    fn closing_converges_within_bound_for_many_steps() {
        for max in [1, 7, 255] {
            for step in [1, 3, 14, 300] {
                let mut openness = Openness::opened(max, step);
                openness.request_close();
                let ticks = run_until_idle(&mut openness);
                assert_eq!(openness.value(), 0);
                assert_eq!(ticks, max.div_ceil(step));
            }
        }
    }

    #[test]
    fn tick_at_bound_is_noop() {
        let mut openness = Openness::new(255, 14);
        openness.request_open();
        run_until_idle(&mut openness);
        for _ in 0..5 {
            assert!(!openness.tick());
            assert_eq!(openness.value(), 255);
        }
    }

    #[test]
    fn open_request_when_already_open_stays_idle() {
        let mut openness = Openness::opened(255, 10);
        openness.request_open();
        assert_eq!(openness.transition(), Transition::Idle);
    }

    #[test]
    fn close_request_when_already_closed_stays_idle() {
        let mut openness = Openness::new(255, 10);
        openness.request_close();
        assert_eq!(openness.transition(), Transition::Idle);
    }

    #[test]
    fn repeated_open_requests_are_idempotent() {
        let mut openness = Openness::new(255, 10);
        openness.request_open();
        openness.tick();
        openness.request_open();
        assert_eq!(openness.transition(), Transition::Opening);
        assert_eq!(openness.value(), 10);
    }

    #[test]
    fn close_overrides_open_from_current_value() {
        let mut openness = Openness::new(255, 10);
        openness.request_open();
        openness.tick();
        openness.tick();
        openness.tick();
        assert_eq!(openness.value(), 30);

        openness.request_close();
        assert_eq!(openness.transition(), Transition::Closing);
        assert_eq!(openness.value(), 30);
        openness.tick();
        assert_eq!(openness.value(), 20);
        assert_eq!(run_until_idle(&mut openness), 2);
        assert!(openness.is_closed());
    }

    #[test]
    fn open_overrides_close_from_current_value() {
        let mut openness = Openness::opened(100, 30);
        openness.request_close();
        openness.tick();
        assert_eq!(openness.value(), 70);
        openness.request_open();
        openness.tick();
        assert_eq!(openness.value(), 100);
        assert_eq!(openness.transition(), Transition::Idle);
    }

    #[test]
    fn set_value_clamps_and_keeps_transition() {
        let mut openness = Openness::new(255, 10);
        openness.request_open();
        openness.set_value(999);
        assert_eq!(openness.value(), 255);
        assert_eq!(openness.transition(), Transition::Opening);
        assert!(!openness.tick());
    }

    #[test]
    fn snap_jumps_and_goes_idle() {
        let mut openness = Openness::new(255, 10);
        openness.request_open();
        openness.snap(Target::Open);
        assert!(openness.is_open());
        assert!(openness.transition().is_idle());
    }

    #[test]
    fn zero_step_is_raised_to_one() {
        let openness = Openness::new(255, 0);
        assert_eq!(openness.step(), 1);
        assert_eq!(openness.max_ticks(), 255);
    }

    #[test]
    fn heading_matches_transition() {
        let mut openness = Openness::new(255, 10);
        assert!(!openness.is_heading_to(Target::Open));
        openness.request_open();
        assert!(openness.is_heading_to(Target::Open));
        assert!(!openness.is_heading_to(Target::Closed));
    }

    // -- visible_rect --

    const FRAME: Rect = Rect::new(10, 100, 200, 64);

    #[test]
    fn none_mode_always_full_frame() {
        assert_eq!(visible_rect(FRAME, OpenMode::None, 0, 255), Some(FRAME));
        assert_eq!(visible_rect(FRAME, OpenMode::None, 128, 255), Some(FRAME));
    }

    #[test]
    fn animated_modes_hide_when_closed() {
        for mode in [OpenMode::Top, OpenMode::Center, OpenMode::Bottom] {
            assert_eq!(visible_rect(FRAME, mode, 0, 255), None);
            assert_eq!(visible_rect(FRAME, mode, 255, 255), Some(FRAME));
        }
    }

    #[test]
    fn top_mode_anchors_top_edge() {
        let rect = visible_rect(FRAME, OpenMode::Top, 128, 256).unwrap();
        assert_eq!(rect, Rect::new(10, 100, 200, 32));
    }

    #[test]
    fn center_mode_grows_from_middle() {
        let rect = visible_rect(FRAME, OpenMode::Center, 128, 256).unwrap();
        assert_eq!(rect, Rect::new(10, 116, 200, 32));
    }

    #[test]
    fn bottom_mode_anchors_bottom_edge() {
        let rect = visible_rect(FRAME, OpenMode::Bottom, 128, 256).unwrap();
        assert_eq!(rect, Rect::new(10, 132, 200, 32));
    }
}
