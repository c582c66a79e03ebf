//! Pure rendering: map a window snapshot and scene chrome to ratatui widgets.
//!
//! The window is drawn at its own screen rect, clipped to the terminal.
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Constraint, Layout, Rect as Area};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::openness::Transition;
use crate::types::{Cue, Rect};
use crate::window::{CyclePhase, WindowView};

use super::state::{App, Scene};
use super::theme;

// ============================================================================
// CHROME
// ============================================================================

/// Everything drawn around the window, copied out of [`App`] so the
/// host can redraw while a blocking wait holds the window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chrome {
    pub labels: Vec<String>,
    pub help: Option<String>,
    pub scene: Scene,
    pub last_cue: Option<Cue>,
    pub notice: Option<String>,
}

impl Chrome {
    pub fn from_app(app: &App) -> Self {
        Chrome {
            labels: app.commands.clone(),
            help: app
                .window
                .help()
                .and_then(|h| h.text())
                .map(str::to_string),
            scene: app.scene.clone(),
            last_cue: app.last_cue,
            notice: app.notice.clone(),
        }
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the scene to the terminal frame.
pub fn render(frame: &mut Frame, view: &WindowView, chrome: &Chrome) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // window
        Constraint::Length(1), // help
        Constraint::Length(1), // status
    ])
    .split(area);

    frame.render_widget(render_title(&chrome.scene), chunks[0]);
    frame.render_widget(render_help(chrome), chunks[2]);
    frame.render_widget(render_status(view, chrome), chunks[3]);

    render_window(view, chrome, frame, chunks[1]);

    if let Scene::Done { choice } = &chrome.scene {
        render_done(*choice, chrome, frame, chunks[1]);
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title(scene: &Scene) -> Paragraph<'static> {
    let hints = match scene {
        Scene::Entering => "[o/c] open/close  [q] quit",
        Scene::Running => "[arrows] move  [enter] confirm  [esc] cancel  [o/c] open/close  [q] quit",
        Scene::Done { .. } => "[enter] reopen  [esc] quit",
    };
    Paragraph::new(Line::from(vec![
        Span::styled(" window-openness ", theme::STYLE_TITLE),
        Span::styled(hints, theme::STYLE_STATUS),
    ]))
}

fn render_help(chrome: &Chrome) -> Paragraph<'_> {
    let text = match &chrome.scene {
        Scene::Running => chrome.help.as_deref().unwrap_or(""),
        _ => "",
    };
    Paragraph::new(Line::styled(format!(" {}", text), theme::STYLE_HELP))
}

fn render_status(view: &WindowView, chrome: &Chrome) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        format!(
            " openness {:>3}/{}  {}  {}",
            view.openness,
            view.max_openness,
            transition_name(view.transition),
            phase_name(view.phase)
        ),
        theme::STYLE_STATUS,
    )];
    if let Some(cue) = chrome.last_cue {
        spans.push(Span::styled(format!("  ♪ {}", cue_name(cue)), theme::STYLE_CUE));
    }
    if let Some(notice) = &chrome.notice {
        spans.push(Span::styled(format!("  {}", notice), theme::STYLE_NOTICE));
    }
    Paragraph::new(Line::from(spans))
}

// ============================================================================
// WINDOW
// ============================================================================

fn render_window(view: &WindowView, chrome: &Chrome, frame: &mut Frame, bounds: Area) {
    let Some(outer) = view.frame.and_then(|r| to_area(r, bounds)) else {
        return;
    };

    let border = if view.active {
        theme::STYLE_FRAME
    } else {
        theme::STYLE_FRAME_INACTIVE
    };
    frame.render_widget(Clear, outer);
    frame.render_widget(Block::bordered().border_style(border), outer);

    if !view.contents_visible {
        return;
    }

    for (index, cell) in &view.page_cells {
        let Some(area) = to_area(*cell, outer) else {
            continue;
        };
        let label = chrome.labels.get(*index).map_or("", String::as_str);
        let style = if view.cursor_rect == Some(*cell) && view.active {
            cursor_style(view.cursor_opacity)
        } else {
            theme::STYLE_ITEM
        };
        frame.render_widget(Paragraph::new(Line::styled(format!(" {}", label), style)), area);
    }
}

fn render_done(choice: Option<usize>, chrome: &Chrome, frame: &mut Frame, area: Area) {
    let text = match choice.and_then(|i| chrome.labels.get(i)) {
        Some(label) => format!("You chose: {}", label),
        None => "Cancelled.".to_string(),
    };
    let row = Area::new(area.x, area.y + area.height / 2, area.width, 1).intersection(area);
    frame.render_widget(
        Paragraph::new(Line::styled(text, theme::STYLE_DONE)).centered(),
        row,
    );
}

fn cursor_style(opacity: u8) -> ratatui::style::Style {
    if opacity < theme::CURSOR_DIM_THRESHOLD {
        theme::STYLE_CURSOR_DIM
    } else {
        theme::STYLE_CURSOR
    }
}

/// Clip a window-space rect to a terminal area. None if nothing is left.
fn to_area(rect: Rect, bounds: Area) -> Option<Area> {
    if rect.is_empty() {
        return None;
    }
    let clamp = |v: i32| v.clamp(0, u16::MAX as i32) as u16;
    let x = clamp(rect.x);
    let y = clamp(rect.y);
    let right = clamp(rect.x.saturating_add(rect.width));
    let bottom = clamp(rect.y.saturating_add(rect.height));
    let area = Area::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y)).intersection(bounds);
    (!area.is_empty()).then_some(area)
}

// ============================================================================
// LABELS
// ============================================================================

fn transition_name(transition: Transition) -> &'static str {
    match transition {
        Transition::Idle => "idle",
        Transition::Opening => "opening",
        Transition::Closing => "closing",
    }
}

fn phase_name(phase: CyclePhase) -> &'static str {
    match phase {
        CyclePhase::TransitioningOpen => "animating open",
        CyclePhase::TransitioningClosed => "animating closed",
        CyclePhase::AcceptingInput => "input",
        CyclePhase::Inactive => "inactive",
    }
}

fn cue_name(cue: Cue) -> &'static str {
    match cue {
        Cue::CursorMove => "cursor",
        Cue::Confirm => "confirm",
        Cue::Cancel => "cancel",
    }
}

// ============================================================================
// TESTS
// ============================================================================
