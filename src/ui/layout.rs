//! Line-based layout of the scrolled catalog content.
//!
//! Content from the top: the title, a blank line, the control header
//! (search + filter buttons), a blank line, then the card grid or the
//! no-results panel. The header keeps its slot in the content even when it
//! is pinned, so pinning never shifts the cards.

use unicode_width::UnicodeWidthStr;

use crate::catalog::{ALL_TOPICS, Technology};
use crate::sticky::ViewportGeometry;

pub const TITLE: &str = "Interactive Library";
/// First content line of the control header.
pub const HEADER_TOP: usize = 2;
pub const NO_RESULTS_HEIGHT: usize = 12;
/// Blank lines between card rows.
pub const ROW_GAP: usize = 1;
pub const MIN_CARD_HEIGHT: usize = 8;
/// Header rows before the first row of filter buttons: border, search, label.
pub const HEADER_BUTTONS_TOP: usize = 3;

/// Pixel size of one terminal cell, used to express the terminal as a
/// display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width_px: u16,
    pub height_px: u16,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width_px: 10,
            height_px: 20,
        }
    }
}

impl CellSize {
    /// Parse `WxH`, e.g. `10x20`. Zero sizes are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.split_once(['x', 'X'])?;
        let width_px = w.trim().parse::<u16>().ok().filter(|v| *v > 0)?;
        let height_px = h.trim().parse::<u16>().ok().filter(|v| *v > 0)?;
        Some(Self {
            width_px,
            height_px,
        })
    }

    pub fn geometry(self, columns: u16, rows: u16) -> ViewportGeometry {
        ViewportGeometry::new(
            i32::from(columns) * i32::from(self.width_px),
            i32::from(rows) * i32::from(self.height_px),
        )
    }

    pub fn offset_px(self, lines: usize) -> i64 {
        i64::try_from(lines)
            .unwrap_or(i64::MAX)
            .saturating_mul(i64::from(self.height_px))
    }

    /// Card height in rows for a pixel height estimate.
    pub fn card_rows(self, height_px: i32) -> usize {
        let rows = height_px / i32::from(self.height_px.max(1));
        usize::try_from(rows).unwrap_or(0).max(MIN_CARD_HEIGHT)
    }
}

/// Text of a filter button, including its icon.
pub fn filter_button_text(name: &str) -> String {
    if name == ALL_TOPICS {
        format!(" 🔍 {name} ")
    } else {
        format!(" {} {name} ", Technology::from_topic(name).icon())
    }
}

/// Position of one filter button inside the header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    /// Index into the filter labels (0 is "All").
    pub index: usize,
    /// Button row, counted from the first row of buttons.
    pub row: usize,
    /// Column offset from the header's left edge.
    pub x: u16,
    pub width: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogLayout {
    pub width: u16,
    pub buttons: Vec<FilterButton>,
    pub header_height: usize,
    pub cards_per_row: usize,
    pub card_width: u16,
    pub card_height: usize,
    pub result_count: usize,
}

impl CatalogLayout {
    pub fn compute(
        width: u16,
        labels: &[&str],
        cards_per_row: usize,
        card_height: usize,
        result_count: usize,
    ) -> Self {
        let buttons = wrap_buttons(width, labels);
        let button_rows = buttons.last().map_or(1, |b| b.row + 1);
        let cards_per_row = cards_per_row.max(1);
        #[allow(clippy::cast_possible_truncation)]
        // cards_per_row is derived from the terminal width, so it fits in u16.
        let card_width = (width / (cards_per_row as u16).max(1)).max(1);
        Self {
            width,
            buttons,
            header_height: HEADER_BUTTONS_TOP + button_rows + 1,
            cards_per_row,
            card_width,
            card_height: card_height.max(MIN_CARD_HEIGHT),
            result_count,
        }
    }

    /// First content line below the header.
    pub const fn header_bottom(&self) -> usize {
        HEADER_TOP + self.header_height
    }

    pub const fn grid_top(&self) -> usize {
        self.header_bottom() + 1
    }

    pub const fn grid_rows(&self) -> usize {
        self.result_count.div_ceil(self.cards_per_row)
    }

    const fn row_stride(&self) -> usize {
        self.card_height + ROW_GAP
    }

    pub const fn total_lines(&self) -> usize {
        if self.result_count == 0 {
            self.grid_top() + NO_RESULTS_HEIGHT
        } else {
            self.grid_top() + self.grid_rows() * self.row_stride()
        }
    }

    /// Content line and column of the card at `index`.
    pub fn card_position(&self, index: usize) -> (usize, u16) {
        let row = index / self.cards_per_row;
        let col = index % self.cards_per_row;
        let x = u16::try_from(col)
            .unwrap_or(u16::MAX)
            .saturating_mul(self.card_width);
        (self.grid_top() + row * self.row_stride(), x)
    }

    /// Results whose card overlaps the content lines `start..end`.
    pub fn cards_in_lines(&self, start: usize, end: usize) -> std::ops::Range<usize> {
        if self.result_count == 0 || end <= self.grid_top() {
            return 0..0;
        }
        let stride = self.row_stride();
        let first_row = start.saturating_sub(self.grid_top()) / stride;
        let last_row = (end - self.grid_top()).div_ceil(stride);
        let first = (first_row * self.cards_per_row).min(self.result_count);
        let last = (last_row * self.cards_per_row).min(self.result_count);
        first..last
    }

    /// First card whose top edge is on or after `line`, falling back to the
    /// card row that contains it.
    pub fn first_card_from(&self, line: usize) -> Option<usize> {
        if self.result_count == 0 {
            return None;
        }
        let stride = self.row_stride();
        let rel = line.saturating_sub(self.grid_top());
        let row = rel.div_ceil(stride);
        let index = row * self.cards_per_row;
        if index < self.result_count {
            Some(index)
        } else {
            Some((rel / stride) * self.cards_per_row).filter(|i| *i < self.result_count)
        }
    }

    /// Filter button under a header-relative cell.
    pub fn button_at(&self, x: u16, header_row: usize) -> Option<usize> {
        let row = header_row.checked_sub(HEADER_BUTTONS_TOP)?;
        self.buttons
            .iter()
            .find(|b| b.row == row && x >= b.x && x < b.x + b.width)
            .map(|b| b.index)
    }
}

fn wrap_buttons(width: u16, labels: &[&str]) -> Vec<FilterButton> {
    // Border plus one column of padding on each side.
    let left = 2u16;
    let right = width.saturating_sub(2).max(left + 1);
    let mut buttons = Vec::with_capacity(labels.len());
    let mut row = 0;
    let mut x = left;
    for (index, label) in labels.iter().enumerate() {
        let w = u16::try_from(filter_button_text(label).width()).unwrap_or(u16::MAX);
        if x > left && x.saturating_add(w) > right {
            row += 1;
            x = left;
        }
        buttons.push(FilterButton {
            index,
            row,
            x,
            width: w,
        });
        x = x.saturating_add(w).saturating_add(1);
    }
    buttons
}
