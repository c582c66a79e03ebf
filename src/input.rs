//! Per-frame input snapshots and key-repeat timing.
//!
//! [`InputState`] is a ready-made [`InputSource`] for hosts (and tests)
//! that assemble input themselves. [`RepeatTracker`] turns the set of
//! held buttons each frame into press/trigger/repeat flags with the
//! host's auto-repeat cadence. [`HeldButtons`] and [`PressGap`] adapt
//! event-driven keyboards (key down/up, or bare presses) to that model.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use crate::host::InputSource;
use crate::types::{Button, Point};

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Input for a single frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: BTreeSet<Button>,
    triggered: BTreeSet<Button>,
    repeated: BTreeSet<Button>,
    pointer: Option<Point>,
    clicked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame where `button` went down.
    pub fn fresh(button: Button) -> Self {
        let mut state = Self::new();
        state.press(button);
        state
    }

    /// A frame where `button` is held and fires an auto-repeat tick.
    pub fn repeating(button: Button) -> Self {
        let mut state = Self::new();
        state.repeat(button);
        state
    }

    /// Record a fresh press.
    pub fn press(&mut self, button: Button) {
        self.pressed.insert(button);
        self.triggered.insert(button);
        self.repeated.insert(button);
    }

    /// Record an auto-repeat tick of a held button.
    pub fn repeat(&mut self, button: Button) {
        self.pressed.insert(button);
        self.repeated.insert(button);
    }

    /// Record a button held without firing this frame.
    pub fn hold(&mut self, button: Button) {
        self.pressed.insert(button);
    }

    pub fn click(&mut self, position: Point) {
        self.pointer = Some(position);
        self.clicked = true;
    }

    pub fn move_pointer(&mut self, position: Point) {
        self.pointer = Some(position);
    }

    /// Forget everything except the pointer position.
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.triggered.clear();
        self.repeated.clear();
        self.clicked = false;
    }
}

impl InputSource for InputState {
    fn is_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    fn is_triggered(&self, button: Button) -> bool {
        self.triggered.contains(&button)
    }

    fn is_repeated(&self, button: Button) -> bool {
        self.repeated.contains(&button)
    }

    fn pointer_clicked(&self) -> bool {
        self.clicked
    }

    fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }
}

// ============================================================================
// REPEAT TIMING
// ============================================================================

/// Frames before auto-repeat starts, and the interval after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTiming {
    pub delay: u32,
    pub interval: u32,
}

impl RepeatTiming {
    /// Classic cadence: repeat from frame 15, every 4 frames.
    pub const CLASSIC: RepeatTiming = RepeatTiming { delay: 15, interval: 4 };

    /// Later cadence: repeat from frame 23, every 6 frames.
    pub const SLOW: RepeatTiming = RepeatTiming { delay: 23, interval: 6 };
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Derives trigger and repeat flags from held buttons, frame by frame.
///
/// Only the most recently pressed button auto-repeats. Pressing another
/// button takes the repeat over; releasing the repeating one stops it.
#[derive(Debug, Clone, Default)]
pub struct RepeatTracker {
    timing: RepeatTiming,
    held: BTreeSet<Button>,
    repeating: Option<Button>,
    count: u32,
}

impl RepeatTracker {
    pub fn new(timing: RepeatTiming) -> Self {
        RepeatTracker {
            timing,
            ..Default::default()
        }
    }

    /// Feed the buttons held this frame and get the frame's input.
    pub fn update<I>(&mut self, held: I) -> InputState
    where
        I: IntoIterator<Item = Button>,
    {
        let held: BTreeSet<Button> = held.into_iter().collect();
        let mut state = InputState::new();

        let mut candidate = None;
        for &button in &held {
            if self.held.contains(&button) {
                state.hold(button);
            } else {
                state.press(button);
                state.repeated.remove(&button);
                candidate = Some(button);
            }
        }

        if let Some(button) = candidate.filter(|b| Some(*b) != self.repeating) {
            self.repeating = Some(button);
            self.count = 0;
            state.repeated.insert(button);
        } else if let Some(button) = self.repeating.filter(|b| held.contains(b)) {
            self.count += 1;
            if self.count >= self.timing.delay && (self.count + 1) % self.timing.interval == 0 {
                state.repeated.insert(button);
            }
        } else {
            self.repeating = None;
        }

        self.held = held;
        state
    }
}

// ============================================================================
// KEY EVENTS
// ============================================================================

/// Frame input from key-down and key-up events.
///
/// For hosts that report releases. OS auto-repeat is ignored and the
/// [`RepeatTracker`] supplies the cadence. A key pressed and released
/// within one frame still counts as held for that frame.
#[derive(Debug, Clone, Default)]
pub struct HeldButtons {
    tracker: RepeatTracker,
    held: BTreeSet<Button>,
    tapped: BTreeSet<Button>,
}

impl HeldButtons {
    pub fn new(timing: RepeatTiming) -> Self {
        HeldButtons {
            tracker: RepeatTracker::new(timing),
            ..Default::default()
        }
    }

    pub fn key_down(&mut self, button: Button) {
        self.held.insert(button);
        self.tapped.insert(button);
    }

    pub fn key_up(&mut self, button: Button) {
        self.held.remove(&button);
    }

    /// Forget every held key, e.g. when the host loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Close the frame: overwrite the button flags of `input` and keep its
    /// pointer state.
    pub fn apply(&mut self, input: &mut InputState) {
        let down: Vec<Button> = self.held.union(&self.tapped).copied().collect();
        self.tapped.clear();
        let state = self.tracker.update(down);
        input.pressed = state.pressed;
        input.triggered = state.triggered;
        input.repeated = state.repeated;
    }
}

/// Splits bare key presses into fresh presses and OS auto-repeat ticks.
///
/// For hosts that never report releases. A press of the same button within
/// `gap` of its previous press is a repeat tick. The gap must outlast the
/// OS repeat delay, so two quick deliberate taps also read as a repeat.
#[derive(Debug, Clone)]
pub struct PressGap {
    gap: Duration,
    last: BTreeMap<Button, Instant>,
}

impl PressGap {
    /// Longer than common OS repeat delays (250 to 600 ms).
    pub const DEFAULT_GAP: Duration = Duration::from_millis(650);

    pub fn new(gap: Duration) -> Self {
        PressGap {
            gap,
            last: BTreeMap::new(),
        }
    }

    /// Record a press of `button` seen at `now` into `input`.
    pub fn record(&mut self, button: Button, now: Instant, input: &mut InputState) {
        let repeat = self
            .last
            .get(&button)
            .is_some_and(|&at| now.saturating_duration_since(at) <= self.gap);
        self.last.insert(button, now);
        if repeat {
            input.repeat(button);
        } else {
            input.press(button);
        }
    }
}

impl Default for PressGap {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GAP)
    }
}

// ============================================================================
// TESTS
// ============================================================================
