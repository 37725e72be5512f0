//! Card grid geometry
//!
//! Maps pet indices to screen cells and back, for drawing, scrolling and
//! mouse hit-testing. The rightmost column is kept free for the scrollbar.

use ratatui::layout::Rect;

/// Card height including borders
pub const CARD_HEIGHT: u16 = 8;
const SCROLLBAR_WIDTH: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardGrid {
    pub area: Rect,
    pub columns: u16,
}

impl CardGrid {
    pub fn new(area: Rect, columns: u16) -> Self {
        Self {
            area,
            columns: columns.max(1),
        }
    }

    fn columns(&self) -> usize {
        self.columns.max(1) as usize
    }

    pub fn card_width(&self) -> u16 {
        self.area.width.saturating_sub(SCROLLBAR_WIDTH) / self.columns.max(1)
    }

    /// Rows that fit on screen (at least one)
    pub fn visible_rows(&self) -> usize {
        (self.area.height / CARD_HEIGHT).max(1) as usize
    }

    pub fn total_rows(&self, count: usize) -> usize {
        count.div_ceil(self.columns())
    }

    pub fn max_scroll(&self, count: usize) -> usize {
        self.total_rows(count).saturating_sub(self.visible_rows())
    }

    /// Screen rect of the card at `visible_row`, `col`
    pub fn card_rect(&self, visible_row: usize, col: usize) -> Rect {
        let width = self.card_width();
        Rect {
            x: self.area.x + col as u16 * width,
            y: self.area.y + visible_row as u16 * CARD_HEIGHT,
            width,
            height: CARD_HEIGHT.min(self.area.height),
        }
    }

    /// Index of the card under a screen position
    pub fn hit(&self, x: u16, y: u16, scroll: usize, count: usize) -> Option<usize> {
        let width = self.card_width();
        if width == 0 || x < self.area.x || y < self.area.y {
            return None;
        }

        let col = ((x - self.area.x) / width) as usize;
        let row = ((y - self.area.y) / CARD_HEIGHT) as usize;
        if col >= self.columns() || row >= self.visible_rows() || y >= self.area.bottom() {
            return None;
        }

        let idx = (scroll + row) * self.columns() + col;
        (idx < count).then_some(idx)
    }

    /// Scroll offset that keeps the cursor's row on screen
    pub fn scroll_for_cursor(&self, cursor: usize, scroll: usize) -> usize {
        let row = cursor / self.columns();
        let visible = self.visible_rows();
        if row < scroll {
            row
        } else if row >= scroll + visible {
            row + 1 - visible
        } else {
            scroll
        }
    }
}
