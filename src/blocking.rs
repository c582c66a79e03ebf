//! Blocking waits on a window transition.
//!
//! [`wait_until_open`] and [`wait_until_closed`] pump the host one frame
//! at a time and update the window until its openness reaches the target.
//! They block the calling thread for the whole animation: no other game
//! logic runs until they return.
//!
//! Every wait is bounded. It fails fast when the window is idle short of
//! the target or already moving away from it, even if it still sits at the
//! target. It stops after `max_ticks` frames and checks an optional
//! [`CancelToken`] before each frame.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::error::WaitError;
use crate::host::{FrameContext, FramePump};
use crate::openness::Target;
use crate::selection::Navigator;
use crate::window::Window;

/// Shared flag that stops a wait between frames.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Limits for a blocking wait.
#[derive(Debug, Clone, Default)]
pub struct WaitOptions {
    /// Give up after this many frames. None waits as long as the window
    /// keeps moving toward the target.
    pub max_ticks: Option<u32>,
    pub cancel: Option<CancelToken>,
}

impl WaitOptions {
    pub fn bounded(max_ticks: u32) -> Self {
        WaitOptions {
            max_ticks: Some(max_ticks),
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Pump frames until the window is fully open. Returns the frames pumped.
pub fn wait_until_open<N, H>(
    window: &mut Window<N>,
    host: &mut H,
    options: &WaitOptions,
) -> Result<u32, WaitError>
where
    N: Navigator,
    H: FramePump + FrameContext,
{
    wait_for(window, host, Target::Open, options)
}

/// Pump frames until the window is fully closed, then hide it.
/// Returns the frames pumped.
pub fn wait_until_closed<N, H>(
    window: &mut Window<N>,
    host: &mut H,
    options: &WaitOptions,
) -> Result<u32, WaitError>
where
    N: Navigator,
    H: FramePump + FrameContext,
{
    let ticks = wait_for(window, host, Target::Closed, options)?;
    window.set_visible(false);
    Ok(ticks)
}

fn wait_for<N, H>(
    window: &mut Window<N>,
    host: &mut H,
    target: Target,
    options: &WaitOptions,
) -> Result<u32, WaitError>
where
    N: Navigator,
    H: FramePump + FrameContext,
{
    if !window.open_mode().animates() {
        window.snap(target);
        return Ok(0);
    }

    let mut ticks = 0;
    loop {
        let openness = window.openness();
        let heading = openness.is_heading_to(target);
        if openness.is_at(target) && (heading || openness.transition().is_idle()) {
            break;
        }
        if !heading {
            debug!(%target, ticks, "wait cannot reach target");
            return Err(WaitError::Unreachable { target });
        }
        if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            debug!(%target, ticks, "wait cancelled");
            return Err(WaitError::Cancelled { ticks });
        }
        if options.max_ticks.is_some_and(|max| ticks >= max) {
            debug!(%target, ticks, "wait timed out");
            return Err(WaitError::TimedOut { ticks });
        }

        host.advance_frame(&window.view())?;
        window.update(host);
        ticks += 1;
    }

    debug!(%target, ticks, "wait finished");
    Ok(ticks)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::config::WindowConfig;
    use crate::openness::Transition;
    use crate::host::{AudioCueSink, InputSource};
    use crate::types::{Button, Cue, OpenMode, Rect};
    use crate::window::WindowView;

    /// Host that records every frame it was asked to draw.
    #[derive(Default)]
    struct RecordingHost {
        frames: Vec<WindowView>,
        cancel_after: Option<(usize, CancelToken)>,
        fail_at: Option<usize>,
    }

    impl FramePump for RecordingHost {
        fn advance_frame(&mut self, view: &WindowView) -> io::Result<()> {
            if self.fail_at == Some(self.frames.len()) {
                return Err(io::Error::other("display lost"));
            }
            self.frames.push(view.clone());
            if let Some((after, token)) = &self.cancel_after {
                if self.frames.len() >= *after {
                    token.cancel();
                }
            }
            Ok(())
        }
    }

    impl InputSource for RecordingHost {
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

    impl AudioCueSink for RecordingHost {
        fn play(&mut self, _: Cue) {}
    }

    fn window(start_open: bool, mode: OpenMode) -> Window {
        let config = WindowConfig {
            step: 14,
            start_open,
            open_mode: mode,
            ..WindowConfig::default()
        };
        Window::new(Rect::new(0, 0, 160, 96), 2, &config)
    }

    #[test]
    fn close_pumps_until_closed_then_hides() {
        let mut window = window(true, OpenMode::Center);
        window.close();
        let mut host = RecordingHost::default();

        let ticks = wait_until_closed(&mut window, &mut host, &WaitOptions::bounded(100)).unwrap();

        assert_eq!(ticks, 19);
        assert_eq!(host.frames.len(), 19);
        assert!(window.is_closed());
        assert!(!window.is_visible());
    }

    #[test]
    fn frames_see_monotonic_openness() {
        let mut window = window(false, OpenMode::Bottom);
        window.open();
        let mut host = RecordingHost::default();
        wait_until_open(&mut window, &mut host, &WaitOptions::default()).unwrap();

        let values: Vec<u32> = host.frames.iter().map(|f| f.openness).collect();
        assert_eq!(values.first(), Some(&0));
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(window.is_open());
        assert!(window.is_visible());
    }

    #[test]
    fn already_at_target_pumps_nothing() {
        let mut window = window(false, OpenMode::Center);
        let mut host = RecordingHost::default();
        assert_eq!(wait_until_closed(&mut window, &mut host, &WaitOptions::default()).unwrap(), 0);
        assert!(host.frames.is_empty());
    }

    #[test]
    fn idle_short_of_target_is_unreachable() {
        let mut window = window(true, OpenMode::Center);
        let mut host = RecordingHost::default();
        let err = wait_until_closed(&mut window, &mut host, &WaitOptions::default()).unwrap_err();
        assert!(matches!(err, WaitError::Unreachable { target: Target::Closed }));
        assert!(host.frames.is_empty());
        assert!(window.is_visible());
    }

    #[test]
    fn closed_window_starting_to_open_cannot_be_waited_closed() {
        let mut window = window(false, OpenMode::Center);
        window.open();
        let mut host = RecordingHost::default();
        let err = wait_until_closed(&mut window, &mut host, &WaitOptions::default()).unwrap_err();
        assert!(matches!(err, WaitError::Unreachable { target: Target::Closed }));
        assert!(host.frames.is_empty());
        assert!(window.is_visible());
        assert_eq!(window.transition(), Transition::Opening);
    }

    #[test]
    fn open_window_starting_to_close_cannot_be_waited_open() {
        let mut window = window(true, OpenMode::Center);
        window.close();
        let mut host = RecordingHost::default();
        let err = wait_until_open(&mut window, &mut host, &WaitOptions::default()).unwrap_err();
        assert!(matches!(err, WaitError::Unreachable { target: Target::Open }));
        assert!(host.frames.is_empty());
        assert_eq!(window.openness().value(), 255);
    }

    #[test]
    fn frame_budget_times_out() {
        let mut window = window(false, OpenMode::Top);
        window.open();
        let mut host = RecordingHost::default();
        let err = wait_until_open(&mut window, &mut host, &WaitOptions::bounded(5)).unwrap_err();
        assert!(matches!(err, WaitError::TimedOut { ticks: 5 }));
        assert_eq!(window.openness().value(), 70);
    }

    #[test]
    fn cancel_token_stops_between_frames() {
        let token = CancelToken::new();
        let mut window = window(true, OpenMode::Center);
        window.close();
        let mut host = RecordingHost {
            cancel_after: Some((3, token.clone())),
            ..Default::default()
        };
        let options = WaitOptions::default().with_cancel(token);
        let err = wait_until_closed(&mut window, &mut host, &options).unwrap_err();
        assert!(matches!(err, WaitError::Cancelled { ticks: 3 }));
        assert!(window.is_visible());
    }

    #[test]
    fn unanimated_mode_snaps_without_pumping() {
        let mut window = window(true, OpenMode::None);
        window.close();
        let mut host = RecordingHost::default();
        let ticks = wait_until_closed(&mut window, &mut host, &WaitOptions::default()).unwrap();
        assert_eq!(ticks, 0);
        assert!(host.frames.is_empty());
        assert!(window.is_closed());
        assert!(!window.is_visible());
    }

    #[test]
    fn host_failure_surfaces() {
        let mut window = window(false, OpenMode::Center);
        window.open();
        let mut host = RecordingHost {
            fail_at: Some(2),
            ..Default::default()
        };
        let err = wait_until_open(&mut window, &mut host, &WaitOptions::default()).unwrap_err();
        assert!(matches!(err, WaitError::Host(_)));
    }
}
