//! Pure scene transitions: (Scene, Action, WindowView) → Transition.
//!
//! Fully testable without a terminal. The window handles its own cursor
//! input; this layer only reacts to confirm/cancel and the demo commands.
//! Unhandled actions return the current scene unchanged (no-op).

use crate::host::InputSource;
use crate::openness::Target;
use crate::types::{Button, Cue};
use crate::window::{CyclePhase, WindowView};

use super::state::{Action, Effect, Scene, Transition};

/// Pure state transition function.
pub fn update(scene: Scene, action: &Action, window: &WindowView) -> Transition {
    match action {
        Action::Quit => return Transition::Quit,
        Action::ForceOpen => return Transition::Effect(Effect::Request(Target::Open)),
        Action::ForceClose => return Transition::Effect(Effect::Request(Target::Closed)),
        Action::Confirm | Action::Cancel => {}
    }

    match scene {
        Scene::Entering => Transition::Scene(Scene::Entering),
        Scene::Running => update_running(action, window),
        Scene::Done { .. } => update_done(scene, action),
    }
}

/// Running: confirm or cancel leaves, but only once the window has
/// taken input this frame.
fn update_running(action: &Action, window: &WindowView) -> Transition {
    if window.phase != CyclePhase::AcceptingInput {
        return Transition::Scene(Scene::Running);
    }
    match action {
        Action::Confirm => Transition::Effect(Effect::Leave {
            choice: window.index,
            cue: Cue::Confirm,
        }),
        Action::Cancel => Transition::Effect(Effect::Leave {
            choice: None,
            cue: Cue::Cancel,
        }),
        _ => Transition::Scene(Scene::Running),
    }
}

/// Done: confirm reopens the window, cancel quits.
fn update_done(scene: Scene, action: &Action) -> Transition {
    match action {
        Action::Confirm => Transition::Effect(Effect::Reopen),
        Action::Cancel => Transition::Quit,
        _ => Transition::Scene(scene),
    }
}

/// Per-frame scene progress that needs no input.
///
/// Entering becomes Running once the window is fully open.
pub fn advance(scene: Scene, window: &WindowView) -> Scene {
    match scene {
        Scene::Entering if window.openness == window.max_openness && window.transition.is_idle() => {
            Scene::Running
        }
        other => other,
    }
}

/// Scene actions carried by this frame's game buttons.
pub fn button_actions(input: &impl InputSource) -> Vec<Action> {
    let mut actions = Vec::new();
    if input.is_triggered(Button::Confirm) {
        actions.push(Action::Confirm);
    }
    if input.is_triggered(Button::Cancel) {
        actions.push(Action::Cancel);
    }
    actions
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;
    use crate::input::InputState;
    use crate::openness::Transition as Ramp;
    use crate::types::Rect;
    use crate::window::Window;

    fn view(phase: CyclePhase, index: Option<usize>) -> WindowView {
        let config = WindowConfig {
            start_open: true,
            ..WindowConfig::default()
        };
        let mut window = Window::new(Rect::new(0, 0, 100, 100), 3, &config);
        window.set_index(index);
        let mut view = window.view();
        view.phase = phase;
        view
    }

    #[test]
    fn quit_from_any_scene() {
        let v = view(CyclePhase::AcceptingInput, Some(0));
        for scene in [Scene::Entering, Scene::Running, Scene::Done { choice: None }] {
            assert_eq!(update(scene, &Action::Quit, &v), Transition::Quit);
        }
    }

    #[test]
    fn force_requests_pass_through() {
        let v = view(CyclePhase::TransitioningOpen, Some(0));
        assert_eq!(
            update(Scene::Entering, &Action::ForceClose, &v),
            Transition::Effect(Effect::Request(Target::Closed))
        );
        assert_eq!(
            update(Scene::Running, &Action::ForceOpen, &v),
            Transition::Effect(Effect::Request(Target::Open))
        );
    }

    #[test]
    fn entering_ignores_confirm() {
        let v = view(CyclePhase::TransitioningOpen, Some(0));
        assert_eq!(
            update(Scene::Entering, &Action::Confirm, &v),
            Transition::Scene(Scene::Entering)
        );
    }

    #[test]
    fn running_confirm_leaves_with_choice() {
        let v = view(CyclePhase::AcceptingInput, Some(2));
        assert_eq!(
            update(Scene::Running, &Action::Confirm, &v),
            Transition::Effect(Effect::Leave {
                choice: Some(2),
                cue: Cue::Confirm
            })
        );
    }

    #[test]
    fn running_cancel_leaves_without_choice() {
        let v = view(CyclePhase::AcceptingInput, Some(1));
        assert_eq!(
            update(Scene::Running, &Action::Cancel, &v),
            Transition::Effect(Effect::Leave {
                choice: None,
                cue: Cue::Cancel
            })
        );
    }

    #[test]
    fn running_ignores_confirm_while_window_animates() {
        let v = view(CyclePhase::TransitioningClosed, Some(1));
        assert_eq!(
            update(Scene::Running, &Action::Confirm, &v),
            Transition::Scene(Scene::Running)
        );
    }

    #[test]
    fn done_confirm_reopens_and_cancel_quits() {
        let v = view(CyclePhase::Inactive, Some(0));
        let done = Scene::Done { choice: Some(0) };
        assert_eq!(
            update(done.clone(), &Action::Confirm, &v),
            Transition::Effect(Effect::Reopen)
        );
        assert_eq!(update(done, &Action::Cancel, &v), Transition::Quit);
    }

    #[test]
    fn entering_advances_once_open_and_idle() {
        let mut v = view(CyclePhase::TransitioningOpen, Some(0));
        v.openness = 100;
        v.transition = Ramp::Opening;
        assert_eq!(advance(Scene::Entering, &v), Scene::Entering);

        v.openness = v.max_openness;
        v.transition = Ramp::Idle;
        assert_eq!(advance(Scene::Entering, &v), Scene::Running);
    }

    #[test]
    fn advance_leaves_other_scenes_alone() {
        let v = view(CyclePhase::AcceptingInput, Some(0));
        assert_eq!(advance(Scene::Running, &v), Scene::Running);
        let done = Scene::Done { choice: None };
        assert_eq!(advance(done.clone(), &v), done);
    }

    #[test]
    fn buttons_map_to_actions_on_trigger_only() {
        assert_eq!(button_actions(&InputState::fresh(Button::Confirm)), vec![Action::Confirm]);
        assert_eq!(button_actions(&InputState::fresh(Button::Cancel)), vec![Action::Cancel]);
        assert!(button_actions(&InputState::repeating(Button::Confirm)).is_empty());
        assert!(button_actions(&InputState::fresh(Button::Down)).is_empty());
    }
}
