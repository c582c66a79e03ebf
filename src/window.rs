//! Selectable window: openness ramp + cursor navigation, updated per frame.
//!
//! [`Window::update`] is the per-frame cycle. It runs the host base
//! update, then either advances an open/close transition or handles
//! cursor input, never both in the same frame. Cursor geometry and the
//! help panel are refreshed after input.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WindowConfig;
use crate::host::{BaseUpdate, CursorBlink, FrameContext};
use crate::openness::{visible_rect, Openness, Target, Transition};
use crate::selection::{Moved, Navigator, SelectionState};
use crate::types::{Button, Direction, OpenMode, PageDirection, Point, Rect};

// ============================================================================
// LAYOUT
// ============================================================================

/// Layout constants for contents and cursor cells.
///
/// Defaults follow the classic 640x480 window skin: a 16px border and 32px
/// rows, with a 32px gap between columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Border between the frame and the contents, on every side.
    pub padding: i32,
    pub row_height: i32,
    /// Horizontal gap between cursor cells.
    pub column_spacing: i32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            padding: 16,
            row_height: 32,
            column_spacing: 32,
        }
    }
}

impl Metrics {
    /// One terminal cell border, one line per row.
    pub const TERMINAL: Metrics = Metrics {
        padding: 1,
        row_height: 1,
        column_spacing: 2,
    };
}

/// Mutable render state the host draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub rect: Rect,
    pub visible: bool,
    /// Cursor highlight relative to the contents origin. None hides it.
    pub cursor_rect: Option<Rect>,
    pub cursor_opacity: u8,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            visible: true,
            cursor_rect: None,
            cursor_opacity: 255,
        }
    }
}

// ============================================================================
// HELP
// ============================================================================

/// Help text per item, following the cursor of an active window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpPanel {
    entries: Vec<String>,
    current: Option<usize>,
}

impl HelpPanel {
    pub fn new(entries: Vec<String>) -> Self {
        HelpPanel { entries, current: None }
    }

    pub fn show(&mut self, index: Option<usize>) {
        self.current = index;
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Text for the current item, if there is one.
    pub fn text(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }
}

// ============================================================================
// CYCLE
// ============================================================================

/// What a frame of [`Window::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    TransitioningOpen,
    TransitioningClosed,
    AcceptingInput,
    #[default]
    Inactive,
}

/// Read-only snapshot handed to the frame pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowView {
    pub rect: Rect,
    /// Frame actually drawn at the current openness. None when hidden.
    pub frame: Option<Rect>,
    /// Whether items should be drawn this frame.
    pub contents_visible: bool,
    pub openness: u32,
    pub max_openness: u32,
    pub transition: Transition,
    pub open_mode: OpenMode,
    pub phase: CyclePhase,
    pub index: Option<usize>,
    pub top_row: usize,
    pub page_row_count: usize,
    pub column_count: usize,
    pub item_count: usize,
    /// Items on the current page with their cells in screen coordinates.
    pub page_cells: Vec<(usize, Rect)>,
    /// Cursor highlight in screen coordinates.
    pub cursor_rect: Option<Rect>,
    pub cursor_opacity: u8,
    pub active: bool,
}

/// A selectable window.
pub struct Window<N: Navigator = SelectionState> {
    openness: Openness,
    open_mode: OpenMode,
    active: bool,
    surface: Surface,
    navigator: N,
    metrics: Metrics,
    help: Option<HelpPanel>,
    base: Box<dyn BaseUpdate>,
    phase: CyclePhase,
}

impl Window<SelectionState> {
    /// A window over `item_count` items with no selection.
    pub fn new(rect: Rect, item_count: usize, config: &WindowConfig) -> Self {
        Window::with_navigator(rect, SelectionState::new(item_count, config.columns), config)
    }
}

impl<N: Navigator> Window<N> {
    pub fn with_navigator(rect: Rect, mut navigator: N, config: &WindowConfig) -> Self {
        navigator.selection_mut().set_column_count(config.columns);
        let openness = if config.start_open {
            Openness::opened(config.max_openness, config.step)
        } else {
            Openness::new(config.max_openness, config.step)
        };
        let mut window = Window {
            openness,
            open_mode: config.open_mode,
            active: true,
            surface: Surface::default(),
            navigator,
            metrics: config.metrics,
            help: None,
            base: Box::new(CursorBlink::default()),
            phase: CyclePhase::Inactive,
        };
        window.set_rect(rect);
        window
    }

    // -- Openness --

    pub fn open(&mut self) {
        self.openness.request_open();
    }

    pub fn close(&mut self) {
        self.openness.request_close();
    }

    pub fn openness(&self) -> &Openness {
        &self.openness
    }

    pub fn set_openness(&mut self, value: u32) {
        self.openness.set_value(value);
    }

    pub fn transition(&self) -> Transition {
        self.openness.transition()
    }

    pub fn is_open(&self) -> bool {
        self.openness.is_open()
    }

    pub fn is_closed(&self) -> bool {
        self.openness.is_closed()
    }

    /// Jump straight to `target` without animating.
    pub fn snap(&mut self, target: Target) {
        self.openness.snap(target);
    }

    pub fn open_mode(&self) -> OpenMode {
        self.open_mode
    }

    pub fn set_open_mode(&mut self, mode: OpenMode) {
        self.open_mode = mode;
    }

    // -- Flags and geometry --

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_visible(&self) -> bool {
        self.surface.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.surface.visible = visible;
    }

    pub fn rect(&self) -> Rect {
        self.surface.rect
    }

    /// Move or resize the window. The page height follows the new size.
    pub fn set_rect(&mut self, rect: Rect) {
        self.surface.rect = rect;
        let inner_height = rect.height - 2 * self.metrics.padding;
        let rows = (inner_height / self.metrics.row_height.max(1)).max(1) as usize;
        self.navigator.selection_mut().set_page_row_count(rows);
        self.refresh_cursor();
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Contents area in screen coordinates.
    pub fn contents_rect(&self) -> Rect {
        let rect = self.surface.rect;
        let padding = self.metrics.padding;
        Rect::new(
            rect.x + padding,
            rect.y + padding,
            rect.width - 2 * padding,
            rect.height - 2 * padding,
        )
    }

    /// Frame drawn at the current openness.
    pub fn frame(&self) -> Option<Rect> {
        if !self.surface.visible {
            return None;
        }
        visible_rect(
            self.surface.rect,
            self.open_mode,
            self.openness.value(),
            self.openness.max(),
        )
    }

    // -- Selection --

    pub fn selection(&self) -> &SelectionState {
        self.navigator.selection()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn index(&self) -> Option<usize> {
        self.selection().index()
    }

    /// Select an item (clamped) and bring it into view.
    pub fn set_index(&mut self, index: Option<usize>) {
        self.navigator.selection_mut().set_index(index);
        self.refresh_help();
        self.refresh_cursor();
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        self.navigator.selection_mut().set_item_count(item_count);
        self.refresh_cursor();
    }

    pub fn set_help(&mut self, help: HelpPanel) {
        self.help = Some(help);
        self.refresh_help();
    }

    pub fn help(&self) -> Option<&HelpPanel> {
        self.help.as_ref()
    }

    /// Replace the host base update run at the start of every frame.
    pub fn set_base(&mut self, base: Box<dyn BaseUpdate>) {
        self.base = base;
    }

    /// Cell of item `index` relative to the contents origin, given the
    /// current scroll position.
    pub fn item_rect(&self, index: usize) -> Rect {
        let selection = self.selection();
        let columns = selection.column_count() as i32;
        let spacing = self.metrics.column_spacing;
        let inner_width = self.surface.rect.width - 2 * self.metrics.padding;
        let cell_width = (inner_width + spacing) / columns;
        let row = (index / selection.column_count()) as i32 - selection.top_row() as i32;
        let column = (index % selection.column_count()) as i32;
        Rect::new(
            column * cell_width,
            row * self.metrics.row_height,
            cell_width - spacing,
            self.metrics.row_height,
        )
    }

    /// The item under a screen position, among those on the current page.
    pub fn item_at(&self, point: Point) -> Option<usize> {
        if !self.surface.visible || !self.is_open() {
            return None;
        }
        let contents = self.contents_rect();
        self.page_items().find(|&i| {
            self.item_rect(i)
                .offset(contents.x, contents.y)
                .contains(point)
        })
    }

    /// Indices of the items on the current page.
    pub fn page_items(&self) -> std::ops::Range<usize> {
        let selection = self.selection();
        let first = selection.top_row() * selection.column_count();
        let last = (first + selection.page_item_count()).min(selection.item_count());
        first..last.max(first)
    }

    // -- Per-frame cycle --

    /// Run one frame.
    ///
    /// A frame that starts with a transition in flight only advances the
    /// openness, including the frame that reaches the bound, so cursor
    /// input is never read while the window is animating.
    pub fn update<C: FrameContext + ?Sized>(&mut self, ctx: &mut C) -> CyclePhase {
        self.base.update(&mut self.surface);

        let animating = match self.openness.transition() {
            Transition::Opening => Some(CyclePhase::TransitioningOpen),
            Transition::Closing => Some(CyclePhase::TransitioningClosed),
            Transition::Idle => None,
        };
        if let Some(phase) = animating {
            if !self.openness.tick() {
                debug!(openness = self.openness.value(), "transition finished");
            }
            self.phase = phase;
            return phase;
        }

        self.phase = if self.active && self.selection().accepts_input() {
            self.handle_cursor_input(ctx);
            self.refresh_help();
            self.refresh_cursor();
            CyclePhase::AcceptingInput
        } else {
            self.refresh_cursor();
            CyclePhase::Inactive
        };
        self.phase
    }

    /// Phase reported by the last update.
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn view(&self) -> WindowView {
        let selection = self.selection();
        let contents = self.contents_rect();
        let page_cells = self
            .page_items()
            .map(|i| (i, self.item_rect(i).offset(contents.x, contents.y)))
            .collect();
        WindowView {
            rect: self.surface.rect,
            frame: self.frame(),
            contents_visible: self.surface.visible
                && (!self.open_mode.animates() || self.is_open()),
            openness: self.openness.value(),
            max_openness: self.openness.max(),
            transition: self.openness.transition(),
            open_mode: self.open_mode,
            phase: self.phase,
            index: selection.index(),
            top_row: selection.top_row(),
            page_row_count: selection.page_row_count(),
            column_count: selection.column_count(),
            item_count: selection.item_count(),
            page_cells,
            cursor_rect: self
                .surface
                .cursor_rect
                .map(|r| r.offset(contents.x, contents.y)),
            cursor_opacity: self.surface.cursor_opacity,
            active: self.active,
        }
    }

    fn handle_cursor_input<C: FrameContext + ?Sized>(&mut self, ctx: &mut C) {
        for direction in [Direction::Down, Direction::Up, Direction::Right, Direction::Left] {
            let button = direction.button();
            if ctx.is_repeated(button) {
                let repeating = !ctx.is_triggered(button);
                let moved = self.navigator.directional(direction, repeating);
                Self::cue_move(moved, ctx);
            }
        }
        if ctx.is_repeated(Button::PageDown) {
            let moved = self.navigator.page(PageDirection::Forward);
            Self::cue_move(moved, ctx);
        }
        if ctx.is_repeated(Button::PageUp) {
            let moved = self.navigator.page(PageDirection::Backward);
            Self::cue_move(moved, ctx);
        }
        if ctx.pointer_clicked() {
            if let Some(item) = ctx.pointer_position().and_then(|p| self.item_at(p)) {
                let moved = self.navigator.select_at(item);
                Self::cue_move(moved, ctx);
            }
        }
    }

    fn cue_move<C: FrameContext + ?Sized>(moved: Option<Moved>, ctx: &mut C) {
        if moved.is_some() {
            ctx.play_cursor_move();
        }
    }

    fn refresh_help(&mut self) {
        if !self.active {
            return;
        }
        let index = self.navigator.selection().index();
        if let Some(help) = self.help.as_mut() {
            help.show(index);
        }
    }

    fn refresh_cursor(&mut self) {
        self.navigator.selection_mut().ensure_cursor_visible();
        self.surface.cursor_rect = self.index().map(|i| self.item_rect(i));
    }
}

impl<N: Navigator + fmt::Debug> fmt::Debug for Window<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("openness", &self.openness)
            .field("open_mode", &self.open_mode)
            .field("active", &self.active)
            .field("surface", &self.surface)
            .field("navigator", &self.navigator)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
