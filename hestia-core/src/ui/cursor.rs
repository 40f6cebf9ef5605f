//! Cursor movement over a menu page

use crate::config::VISIBLE_ROWS;

use super::page::Page;

/// Cursor position on a page
///
/// `selected` is always a valid row of `page`, and `scroll` keeps the
/// selected row inside the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    pub page: Page,
    pub selected: usize,
    pub scroll: usize,
}

impl Cursor {
    /// Cursor at the top of a page
    pub fn top_of(page: Page) -> Self {
        Self {
            page,
            selected: 0,
            scroll: 0,
        }
    }

    /// Move the selection by one row with wrap-around, then pull the
    /// scroll window the minimal distance needed to keep it visible.
    pub fn step(&mut self, delta: i8) {
        let count = self.page.item_count();
        if delta < 0 {
            self.selected = if self.selected == 0 {
                count - 1
            } else {
                self.selected - 1
            };
        } else if delta > 0 {
            self.selected = if self.selected + 1 >= count {
                0
            } else {
                self.selected + 1
            };
        }
        self.adjust_scroll();
    }

    fn adjust_scroll(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + VISIBLE_ROWS {
            self.scroll = self.selected - VISIBLE_ROWS + 1;
        }
    }
}
