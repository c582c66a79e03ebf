//! Selection navigator: a cursor over a grid of selectable items.
//!
//! Items are laid out row-major in `column_count` columns. Vertical moves
//! wrap around the grid, horizontal moves clamp at the ends, and page
//! moves jump `page_row_count` rows while scrolling the view.
//!
//! The navigator is pure: a successful move returns [`Moved`] and the
//! caller decides what to do with it (the window cycle plays a cursor cue).
//! Input on an empty list or without a selection is ignored.

use tracing::trace;

use crate::types::{Direction, PageDirection};

/// A successful cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved {
    pub from: usize,
    pub to: usize,
}

// ============================================================================
// NAVIGATOR SEAM
// ============================================================================

/// Interprets cursor input against a [`SelectionState`].
///
/// [`SelectionState`] implements this directly. The trait exists so the
/// window cycle can be driven with a wrapped navigator (for example one
/// that counts calls).
pub trait Navigator {
    fn selection(&self) -> &SelectionState;

    fn selection_mut(&mut self) -> &mut SelectionState;

    /// Handle an arrow press. `repeating` is true for auto-repeat ticks and
    /// false for the frame the button went down.
    fn directional(&mut self, direction: Direction, repeating: bool) -> Option<Moved>;

    fn page(&mut self, direction: PageDirection) -> Option<Moved>;

    /// Move the cursor straight to `item` (pointer selection).
    fn select_at(&mut self, item: usize) -> Option<Moved>;
}

// ============================================================================
// STATE
// ============================================================================

/// Cursor position and grid shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    index: Option<usize>,
    item_count: usize,
    column_count: usize,
    top_row: usize,
    page_row_count: usize,
}

impl SelectionState {
    /// A grid with no selection. `column_count` is raised to at least 1.
    pub fn new(item_count: usize, column_count: usize) -> Self {
        SelectionState {
            index: None,
            item_count,
            column_count: column_count.max(1),
            top_row: 0,
            page_row_count: 1,
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn top_row(&self) -> usize {
        self.top_row
    }

    pub fn page_row_count(&self) -> usize {
        self.page_row_count
    }

    pub fn row_count(&self) -> usize {
        self.item_count.div_ceil(self.column_count)
    }

    pub fn page_item_count(&self) -> usize {
        self.page_row_count * self.column_count
    }

    /// Whether cursor input would be accepted at all.
    pub fn accepts_input(&self) -> bool {
        self.item_count > 0 && self.index.is_some()
    }

    /// Select `index`, clamped to the last item. An empty list has no selection.
    pub fn set_index(&mut self, index: Option<usize>) {
        self.index = match index {
            Some(_) if self.item_count == 0 => None,
            Some(i) => Some(i.min(self.item_count - 1)),
            None => None,
        };
    }

    /// Change the item count, re-clamping the cursor and scroll position.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.set_index(self.index);
        self.set_top_row(self.top_row);
    }

    pub fn set_column_count(&mut self, column_count: usize) {
        self.column_count = column_count.max(1);
        self.set_top_row(self.top_row);
    }

    pub fn set_page_row_count(&mut self, page_row_count: usize) {
        self.page_row_count = page_row_count.max(1);
    }

    /// Scroll to `row`, clamped to the last row.
    pub fn set_top_row(&mut self, row: usize) {
        self.top_row = row.min(self.row_count().saturating_sub(1));
    }

    /// Scroll so the selected row is inside the page.
    pub fn ensure_cursor_visible(&mut self) {
        let Some(index) = self.index else {
            return;
        };
        let row = index / self.column_count;
        if row < self.top_row {
            self.top_row = row;
        } else if row > self.top_row + (self.page_row_count - 1) {
            self.top_row = row - (self.page_row_count - 1);
        }
    }

    /// Selected `(row, column)`.
    pub fn cursor_cell(&self) -> Option<(usize, usize)> {
        self.index
            .map(|i| (i / self.column_count, i % self.column_count))
    }

    fn moved(&mut self, from: usize, to: usize) -> Option<Moved> {
        self.index = Some(to);
        trace!(from, to, "cursor moved");
        Some(Moved { from, to })
    }
}

impl Navigator for SelectionState {
    fn selection(&self) -> &SelectionState {
        self
    }

    fn selection_mut(&mut self) -> &mut SelectionState {
        self
    }

    fn directional(&mut self, direction: Direction, repeating: bool) -> Option<Moved> {
        let index = self.index.filter(|_| self.item_count > 0)?;
        let items = self.item_count;
        let columns = self.column_count;
        let single_column_press = columns == 1 && !repeating;

        match direction {
            Direction::Down => {
                if single_column_press || index + columns < items {
                    self.moved(index, (index + columns) % items)
                } else {
                    None
                }
            }
            Direction::Up => {
                if single_column_press || index >= columns {
                    let to = (index as i64 - columns as i64).rem_euclid(items as i64);
                    self.moved(index, to as usize)
                } else {
                    None
                }
            }
            Direction::Right => {
                if columns >= 2 && index + 1 < items {
                    self.moved(index, index + 1)
                } else {
                    None
                }
            }
            Direction::Left => {
                if columns >= 2 && index > 0 {
                    self.moved(index, index - 1)
                } else {
                    None
                }
            }
        }
    }

    fn page(&mut self, direction: PageDirection) -> Option<Moved> {
        let index = self.index.filter(|_| self.item_count > 0)?;
        let page_items = self.page_item_count();

        match direction {
            PageDirection::Forward => {
                if self.top_row + (self.page_row_count - 1) < self.row_count() - 1 {
                    let to = (index + page_items).min(self.item_count - 1);
                    self.set_top_row(self.top_row + self.page_row_count);
                    self.moved(index, to)
                } else {
                    None
                }
            }
            PageDirection::Backward => {
                if self.top_row > 0 {
                    let to = index.saturating_sub(page_items);
                    self.top_row = self.top_row.saturating_sub(self.page_row_count);
                    self.moved(index, to)
                } else {
                    None
                }
            }
        }
    }

    fn select_at(&mut self, item: usize) -> Option<Moved> {
        let index = self.index.filter(|_| self.item_count > 0)?;
        if item >= self.item_count || item == index {
            return None;
        }
        self.moved(index, item)
    }
}

// ============================================================================
// TESTS
// ============================================================================
