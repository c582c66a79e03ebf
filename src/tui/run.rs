//! TUI effects boundary: frame loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! The terminal is the host engine: [`TerminalHost`] draws a frame, then
//! collects key and mouse events until the frame's deadline. The same
//! host drives the blocking close wait, so the window keeps animating on
//! screen while the scene is suspended.
//!
//! Key repeat: terminals that support the keyboard enhancement protocol
//! report press, repeat and release, and held keys run through the
//! engine's repeat cadence ([`HeldButtons`]). Elsewhere OS auto-repeat
//! arrives as more presses; [`PressGap`] reads a press shortly after the
//! previous one as a repeat tick, so held keys still stop at list ends.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info, trace, warn};

use crate::blocking::{wait_until_closed, CancelToken, WaitOptions};
use crate::config::Settings;
use crate::error::WaitError;
use crate::host::{AudioCueSink, FramePump, InputSource};
use crate::input::{HeldButtons, InputState, PressGap, RepeatTiming};
use crate::openness::Target;
use crate::types::{Button, Cue, Point};
use crate::window::WindowView;

use super::state::{Action, App, Effect, KeyInput, Scene, Transition};
use super::update::{advance, button_actions, update};
use super::view::{render, Chrome};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a game button or scene action.
///
/// Returns None for keys that don't map to anything.
pub fn map_key(key: KeyEvent) -> Option<KeyInput> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyInput::Action(Action::Quit));
    }

    match key.code {
        // Cursor
        KeyCode::Up | KeyCode::Char('k') => Some(KeyInput::Button(Button::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(KeyInput::Button(Button::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(KeyInput::Button(Button::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(KeyInput::Button(Button::Right)),
        KeyCode::PageUp => Some(KeyInput::Button(Button::PageUp)),
        KeyCode::PageDown => Some(KeyInput::Button(Button::PageDown)),

        // Decision
        KeyCode::Enter | KeyCode::Char(' ') => Some(KeyInput::Button(Button::Confirm)),
        KeyCode::Esc | KeyCode::Backspace => Some(KeyInput::Button(Button::Cancel)),

        // Scene
        KeyCode::Char('o') => Some(KeyInput::Action(Action::ForceOpen)),
        KeyCode::Char('c') => Some(KeyInput::Action(Action::ForceClose)),
        KeyCode::Char('q') => Some(KeyInput::Action(Action::Quit)),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

type Backend = CrosstermBackend<io::Stdout>;

/// Set when key event types (and focus reports) were enabled, so restore
/// knows to turn them off.
static KEY_EVENT_TYPES: AtomicBool = AtomicBool::new(false);

/// Set up the terminal for TUI mode. Returns whether key releases and
/// repeats are reported.
fn setup_terminal() -> io::Result<(Terminal<Backend>, bool)> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let event_types = supports_keyboard_enhancement().unwrap_or(false);
    if event_types {
        io::stdout().execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
        io::stdout().execute(EnableFocusChange)?;
        KEY_EVENT_TYPES.store(true, Ordering::SeqCst);
    }
    debug!(event_types, "keyboard setup");
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok((terminal, event_types))
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    if KEY_EVENT_TYPES.swap(false, Ordering::SeqCst) {
        io::stdout().execute(DisableFocusChange)?;
        io::stdout().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// KEY FEED
// ============================================================================

/// How terminal key events become game buttons.
#[derive(Debug)]
enum KeyFeed {
    /// Press, repeat and release are reported; cadence from the tracker.
    Edges(HeldButtons),
    /// Only presses are reported, OS auto-repeat included.
    Presses(PressGap),
}

impl KeyFeed {
    fn new(event_types: bool) -> Self {
        if event_types {
            KeyFeed::Edges(HeldButtons::new(RepeatTiming::CLASSIC))
        } else {
            KeyFeed::Presses(PressGap::default())
        }
    }

    fn key(&mut self, button: Button, kind: KeyEventKind, now: Instant, input: &mut InputState) {
        match (self, kind) {
            (KeyFeed::Edges(held), KeyEventKind::Press) => held.key_down(button),
            (KeyFeed::Edges(held), KeyEventKind::Release) => held.key_up(button),
            (KeyFeed::Edges(_), KeyEventKind::Repeat) => {}
            (KeyFeed::Presses(_), KeyEventKind::Repeat) => input.repeat(button),
            (KeyFeed::Presses(gap), KeyEventKind::Press) => gap.record(button, now, input),
            (KeyFeed::Presses(_), KeyEventKind::Release) => {}
        }
    }

    /// Finish the frame's button flags.
    fn end_frame(&mut self, input: &mut InputState) {
        if let KeyFeed::Edges(held) = self {
            held.apply(input);
        }
    }
}

// ============================================================================
// HOST
// ============================================================================

/// The terminal as a frame pump, input source and cue sink.
struct TerminalHost {
    terminal: Terminal<Backend>,
    input: InputState,
    keys: KeyFeed,
    /// Scene actions read during the last frame.
    actions: Vec<Action>,
    chrome: Chrome,
    frame_time: Duration,
    bell: bool,
    cancel: CancelToken,
    /// Latest terminal size, if it changed during the last frame.
    resized: Option<(u16, u16)>,
}

impl TerminalHost {
    fn new(terminal: Terminal<Backend>, event_types: bool, settings: &Settings) -> Self {
        let fps = settings.demo.fps.max(1);
        TerminalHost {
            terminal,
            input: InputState::new(),
            keys: KeyFeed::new(event_types),
            actions: Vec::new(),
            chrome: Chrome::default(),
            frame_time: Duration::from_secs(1) / fps,
            bell: settings.demo.bell,
            cancel: CancelToken::new(),
            resized: None,
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                let Some(mapped) = map_key(key) else {
                    return;
                };
                trace!(?mapped, kind = ?key.kind, "key");
                match mapped {
                    KeyInput::Button(button) => {
                        self.keys.key(button, key.kind, Instant::now(), &mut self.input)
                    }
                    KeyInput::Action(action) if key.kind == KeyEventKind::Press => {
                        if action == Action::Quit {
                            self.cancel.cancel();
                        }
                        self.actions.push(action);
                    }
                    KeyInput::Action(_) => {}
                }
            }
            // Releases that happen while unfocused never arrive
            Event::FocusLost => {
                if let KeyFeed::Edges(held) = &mut self.keys {
                    held.release_all();
                }
            }
            Event::Mouse(mouse) => {
                let position = Point::new(mouse.column as i32, mouse.row as i32);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => self.input.click(position),
                    _ => self.input.move_pointer(position),
                }
            }
            Event::Resize(width, height) => self.resized = Some((width, height)),
            _ => {}
        }
    }
}

impl FramePump for TerminalHost {
    /// Draw, then gather events until the frame deadline.
    fn advance_frame(&mut self, view: &WindowView) -> io::Result<()> {
        let deadline = Instant::now() + self.frame_time;
        let chrome = &self.chrome;
        self.terminal.draw(|frame| render(frame, view, chrome))?;

        self.input.clear();
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if event::poll(deadline - now)? {
                self.handle_event(event::read()?);
            }
        }
        self.keys.end_frame(&mut self.input);
        Ok(())
    }
}

impl InputSource for TerminalHost {
    fn is_pressed(&self, button: Button) -> bool {
        self.input.is_pressed(button)
    }

    fn is_triggered(&self, button: Button) -> bool {
        self.input.is_triggered(button)
    }

    fn is_repeated(&self, button: Button) -> bool {
        self.input.is_repeated(button)
    }

    fn pointer_clicked(&self) -> bool {
        self.input.pointer_clicked()
    }

    fn pointer_position(&self) -> Option<Point> {
        self.input.pointer_position()
    }
}

impl AudioCueSink for TerminalHost {
    fn play(&mut self, cue: Cue) {
        trace!(?cue, "cue");
        self.chrome.last_cue = Some(cue);
        if self.bell {
            // Best-effort: a missing bell is not worth aborting the frame
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07").and_then(|()| stdout.flush());
        }
    }
}

// ============================================================================
// FRAME LOOP
// ============================================================================

/// Run the command-window demo until the user quits.
///
/// The window opens on entry; confirm or cancel closes it with a
/// blocking wait and shows the choice.
pub fn run(settings: &Settings) -> io::Result<()> {
    install_panic_hook();
    let (width, height) = crossterm::terminal::size()?;
    let (terminal, event_types) = setup_terminal()?;

    let mut app = App::new(settings, width, height);
    let mut host = TerminalHost::new(terminal, event_types, settings);
    app.window.open();
    info!(commands = app.commands.len(), "demo started");

    let result = frame_loop(&mut app, &mut host, settings);

    restore_terminal()?;
    info!("demo finished");
    result
}

fn frame_loop(app: &mut App, host: &mut TerminalHost, settings: &Settings) -> io::Result<()> {
    let options = WaitOptions::bounded(settings.window.wait_limit).with_cancel(host.cancel.clone());

    while !app.should_quit {
        host.chrome = Chrome::from_app(app);
        host.advance_frame(&app.window.view())?;
        if let Some((width, height)) = host.resized.take() {
            app.relayout(width, height);
        }

        app.window.update(host);
        app.last_cue = host.chrome.last_cue;

        let view = app.window.view();
        app.scene = advance(app.scene.clone(), &view);

        let mut actions = button_actions(&host.input);
        actions.append(&mut host.actions);
        for action in actions {
            match update(app.scene.clone(), &action, &view) {
                Transition::Scene(scene) => app.scene = scene,
                Transition::Quit => app.should_quit = true,
                Transition::Effect(effect) => handle_effect(effect, app, host, &options)?,
            }
            if app.should_quit {
                break;
            }
        }
    }
    Ok(())
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a pure transition.
fn handle_effect(
    effect: Effect,
    app: &mut App,
    host: &mut TerminalHost,
    options: &WaitOptions,
) -> io::Result<()> {
    match effect {
        Effect::Leave { choice, cue } => {
            host.play(cue);
            app.last_cue = Some(cue);
            app.window.close();
            host.chrome = Chrome::from_app(app);

            match wait_until_closed(&mut app.window, host, options) {
                Ok(frames) => {
                    debug!(frames, ?choice, "command window closed");
                    app.scene = Scene::Done { choice };
                }
                Err(WaitError::Cancelled { .. }) => app.should_quit = true,
                Err(WaitError::Host(e)) => return Err(e),
                Err(e) => {
                    warn!(error = %e, "close wait failed, hiding window");
                    app.notice = Some(e.to_string());
                    app.window.snap(Target::Closed);
                    app.window.set_visible(false);
                    app.scene = Scene::Done { choice };
                }
            }
            app.last_cue = host.chrome.last_cue;
        }
        Effect::Request(Target::Open) => app.window.open(),
        Effect::Request(Target::Closed) => app.window.close(),
        Effect::Reopen => {
            app.notice = None;
            app.window.set_visible(true);
            app.window.open();
            app.scene = Scene::Entering;
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
