//! Viewport geometry and the sticky-header result threshold.
//!
//! [`StickyThresholds`] models the responsive card grid: how tall a card is
//! and how many fit in a row at each width breakpoint. From that it derives
//! the minimum number of filtered results that make a pinned header worth
//! having.

/// Display surface dimensions in pixels.
///
/// Signed so that a surface which has not been laid out yet (zero or
/// negative size) is representable; the estimator clamps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportGeometry {
    pub width: i32,
    pub height: i32,
}

impl ViewportGeometry {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Width classes at which card size and column count change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Wide,
    Tablet,
    SmallTablet,
    Mobile,
}

impl Breakpoint {
    pub const fn for_width(width: i32) -> Self {
        if width >= 1200 {
            Self::Wide
        } else if width >= 768 {
            Self::Tablet
        } else if width >= 600 {
            Self::SmallTablet
        } else {
            Self::Mobile
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Wide => 0,
            Self::Tablet => 1,
            Self::SmallTablet => 2,
            Self::Mobile => 3,
        }
    }

    /// Horizontal page padding subtracted before columns are counted.
    /// `None` means the layout is always a single column.
    const fn grid_gutter(self) -> Option<i32> {
        match self {
            Self::Wide => Some(100),
            Self::Tablet => Some(80),
            Self::SmallTablet => Some(60),
            Self::Mobile => None,
        }
    }
}

/// Tunable layout model behind [`StickyThresholds::min_results`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickyThresholds {
    /// Estimated rendered card height per breakpoint, widest first.
    pub card_heights: [i32; 4],
    /// Width of one grid column including its gap.
    pub column_width: i32,
    /// Vertical space reserved for the title and control header.
    pub chrome_height: i32,
    /// The threshold never drops below this.
    pub min_floor: usize,
}

impl Default for StickyThresholds {
    fn default() -> Self {
        Self {
            card_heights: [280, 260, 240, 220],
            column_width: 270,
            chrome_height: 300,
            min_floor: 3,
        }
    }
}

impl StickyThresholds {
    pub fn with_card_heights(mut self, card_heights: [i32; 4]) -> Self {
        self.card_heights = card_heights;
        self
    }

    pub const fn estimated_card_height(&self, width: i32) -> i32 {
        let height = self.card_heights[Breakpoint::for_width(width).index()];
        if height < 1 { 1 } else { height }
    }

    /// Grid columns at this width, never negative.
    pub fn cards_per_row(&self, width: i32) -> usize {
        match Breakpoint::for_width(width).grid_gutter() {
            None => 1,
            Some(gutter) => {
                let columns = (width - gutter).div_euclid(self.column_width.max(1));
                usize::try_from(columns).unwrap_or(0)
            }
        }
    }

    /// Full card rows that fit below the chrome, never negative.
    pub fn rows_that_fit(&self, geometry: ViewportGeometry) -> usize {
        let available = geometry.height.saturating_sub(self.chrome_height);
        let rows = available.div_euclid(self.estimated_card_height(geometry.width));
        usize::try_from(rows).unwrap_or(0)
    }

    /// Minimum filtered-result count before the header may pin.
    ///
    /// One row more than a screenful is required, so a pinned header always
    /// has content to scroll past.
    ///
    /// ```
    /// use bookstack::sticky::{StickyThresholds, ViewportGeometry};
    ///
    /// let t = StickyThresholds::default();
    /// assert_eq!(t.min_results(ViewportGeometry::new(1300, 900)), 12);
    /// assert_eq!(t.min_results(ViewportGeometry::new(0, 0)), 3);
    /// ```
    pub fn min_results(&self, geometry: ViewportGeometry) -> usize {
        let per_row = self.cards_per_row(geometry.width);
        let rows = self.rows_that_fit(geometry);
        per_row.saturating_mul(rows + 1).max(self.min_floor)
    }
}
