//! The scrolled window over the catalog content.
//!
//! Scrolling happens in whole terminal lines, but the sticky header reasons
//! in pixels. The [`Viewport`] owns the [`CellSize`] it is measured with and
//! reports its size and offset in both units, so the scroll source and the
//! geometry provider read from one place.

use std::ops::Range;

use crate::sticky::ViewportGeometry;
use crate::ui::layout::CellSize;

/// One scroll request, resolved against the viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMove {
    Up(usize),
    Down(usize),
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    Top,
    Bottom,
}

impl ScrollMove {
    const fn is_upward(self) -> bool {
        matches!(
            self,
            Self::Up(_) | Self::PageUp | Self::HalfPageUp | Self::Top
        )
    }
}

/// Visible rows of the catalog content.
///
/// # Example
///
/// ```
/// use bookstack::ui::layout::CellSize;
/// use bookstack::ui::viewport::{ScrollMove, Viewport};
///
/// let mut vp = Viewport::new(130, 45, CellSize::default());
/// vp.set_total_lines(83);
/// vp.scroll(ScrollMove::Down(6));
/// assert_eq!(vp.offset(), 6);
/// assert_eq!(vp.offset_px(), 120);
/// assert_eq!(vp.surface_geometry().height, 900);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    columns: u16,
    rows: u16,
    offset: usize,
    total_lines: usize,
    cell: CellSize,
}

impl Viewport {
    /// An empty viewport of `columns` x `rows` cells.
    pub const fn new(columns: u16, rows: u16, cell: CellSize) -> Self {
        Self {
            columns,
            rows,
            offset: 0,
            total_lines: 0,
            cell,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.columns
    }

    pub const fn height(&self) -> u16 {
        self.rows
    }

    pub const fn cell_size(&self) -> CellSize {
        self.cell
    }

    pub fn set_cell_size(&mut self, cell: CellSize) {
        self.cell = cell;
    }

    /// Offset of the first visible line, in pixels.
    pub fn offset_px(&self) -> i64 {
        self.cell.offset_px(self.offset)
    }

    /// Pixel size of the visible area, as a display surface reports it.
    pub fn surface_geometry(&self) -> ViewportGeometry {
        self.cell.geometry(self.columns, self.rows)
    }

    /// Content lines currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        let end = self
            .offset
            .saturating_add(usize::from(self.rows))
            .min(self.total_lines);
        self.offset.min(end)..end
    }

    /// Position through the content, 0-100. Content that fits reads 100.
    pub fn scroll_percent(&self) -> u8 {
        let max = self.max_offset();
        if max == 0 {
            return 100;
        }
        let percent = self.offset.saturating_mul(100).saturating_add(max / 2) / max;
        u8::try_from(percent.min(100)).unwrap_or(100)
    }

    /// Whether `mv` would move the offset at all.
    pub fn can_scroll(&self, mv: ScrollMove) -> bool {
        if mv.is_upward() {
            self.offset > 0
        } else {
            self.offset < self.max_offset()
        }
    }

    pub fn scroll(&mut self, mv: ScrollMove) {
        let page = usize::from(self.rows);
        self.offset = match mv {
            ScrollMove::Up(n) => self.offset.saturating_sub(n),
            ScrollMove::Down(n) => self.offset.saturating_add(n),
            ScrollMove::PageUp => self.offset.saturating_sub(page),
            ScrollMove::PageDown => self.offset.saturating_add(page),
            ScrollMove::HalfPageUp => self.offset.saturating_sub(page / 2),
            ScrollMove::HalfPageDown => self.offset.saturating_add(page / 2),
            ScrollMove::Top => 0,
            ScrollMove::Bottom => usize::MAX,
        }
        .min(self.max_offset());
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the content length after a relayout; the offset stays in range.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.rows as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport(rows: u16, total_lines: usize) -> Viewport {
        let mut vp = Viewport::new(130, rows, CellSize::default());
        vp.set_total_lines(total_lines);
        vp
    }

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = viewport(45, 83);
        assert_eq!(vp.offset_px(), 0);
        assert!(!vp.can_scroll(ScrollMove::Up(1)));
        assert!(vp.can_scroll(ScrollMove::PageDown));
    }

    #[test]
    fn test_pixel_geometry_follows_cell_size() {
        let mut vp = viewport(45, 83);
        assert_eq!(vp.surface_geometry(), ViewportGeometry::new(1300, 900));
        vp.scroll(ScrollMove::Down(5));
        assert_eq!(vp.offset_px(), 100);

        vp.set_cell_size(CellSize::parse("8x16").unwrap());
        assert_eq!(vp.surface_geometry(), ViewportGeometry::new(1040, 720));
        assert_eq!(vp.offset_px(), 80);
    }

    #[test]
    fn test_page_moves_use_viewport_height() {
        let mut vp = viewport(24, 100);
        vp.scroll(ScrollMove::PageDown);
        assert_eq!(vp.offset(), 24);
        vp.scroll(ScrollMove::HalfPageDown);
        assert_eq!(vp.offset(), 36);
        vp.scroll(ScrollMove::HalfPageUp);
        vp.scroll(ScrollMove::PageUp);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_bottom_stops_at_last_full_page() {
        let mut vp = viewport(45, 83);
        vp.scroll(ScrollMove::Bottom);
        assert_eq!(vp.offset(), 38);
        assert_eq!(vp.visible_range(), 38..83);
        assert_eq!(vp.scroll_percent(), 100);
        assert!(!vp.can_scroll(ScrollMove::Down(1)));
        vp.scroll(ScrollMove::Top);
        assert_eq!(vp.scroll_percent(), 0);
    }

    #[test]
    fn test_short_content_cannot_scroll() {
        let vp = viewport(45, 20);
        assert_eq!(vp.visible_range(), 0..20);
        assert_eq!(vp.scroll_percent(), 100);
        assert!(!vp.can_scroll(ScrollMove::Bottom));
    }

    #[test]
    fn test_narrowing_results_pulls_offset_back() {
        let mut vp = viewport(24, 100);
        vp.scroll(ScrollMove::Down(80));
        vp.set_total_lines(50);
        assert_eq!(vp.offset(), 26);
        vp.set_total_lines(10);
        assert_eq!(vp.offset_px(), 0);
    }

    #[test]
    fn test_taller_terminal_keeps_valid_offset() {
        let mut vp = viewport(24, 100);
        vp.scroll(ScrollMove::Down(50));
        vp.resize(130, 60);
        assert_eq!(vp.offset(), 40);
    }

    proptest! {
        #[test]
        fn prop_scroll_stays_within_content(
            total_lines in 0..10000usize,
            rows in 1..100u16,
            lines in 0..10000usize,
        ) {
            let mut vp = viewport(rows, total_lines);
            vp.scroll(ScrollMove::Down(lines));
            prop_assert!(vp.offset() <= total_lines.saturating_sub(usize::from(rows)));
            let range = vp.visible_range();
            prop_assert!(range.start <= range.end);
            prop_assert!(range.end <= total_lines);
            prop_assert!(vp.scroll_percent() <= 100);
            prop_assert_eq!(vp.offset_px(), i64::try_from(vp.offset()).unwrap() * 20);
        }
    }
}
