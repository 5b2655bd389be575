use super::direction::ScrollDirection;
use crate::perf::CatalogEvent;

/// Default scroll offset, in pixels, past which the header may pin.
pub const DEFAULT_PIN_OFFSET: i64 = 100;

/// Visual state of the control header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StickyState {
    /// Scrolls with the content.
    #[default]
    Normal,
    /// Fixed to the top of the viewport.
    PinnedVisible,
    /// Logically pinned but slid out of view while scrolling down.
    PinnedHidden,
}

impl StickyState {
    pub const fn is_pinned(self) -> bool {
        matches!(self, Self::PinnedVisible | Self::PinnedHidden)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::PinnedHidden)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::PinnedVisible => "pinned",
            Self::PinnedHidden => "pinned/hidden",
        }
    }
}

/// Everything the header state is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickyInputs {
    pub scroll_offset: i64,
    pub filtered_count: usize,
    pub min_results: usize,
    pub direction: ScrollDirection,
}

impl StickyInputs {
    pub const fn has_enough_content(&self) -> bool {
        self.filtered_count >= self.min_results
    }
}

/// Derives [`StickyState`] from current inputs.
///
/// The state is recomputed from scratch on every event; the stored copy only
/// exists so transitions can be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickyHeaderController {
    state: StickyState,
    pin_offset: i64,
}

impl Default for StickyHeaderController {
    fn default() -> Self {
        Self::new(DEFAULT_PIN_OFFSET)
    }
}

impl StickyHeaderController {
    pub const fn new(pin_offset: i64) -> Self {
        Self {
            state: StickyState::Normal,
            pin_offset,
        }
    }

    pub const fn state(&self) -> StickyState {
        self.state
    }

    pub const fn pin_offset(&self) -> i64 {
        self.pin_offset
    }

    /// Pure state derivation, independent of the stored state.
    pub const fn derive(&self, inputs: &StickyInputs) -> StickyState {
        if !inputs.has_enough_content() || inputs.scroll_offset <= self.pin_offset {
            return StickyState::Normal;
        }
        match inputs.direction {
            ScrollDirection::Up => StickyState::PinnedVisible,
            ScrollDirection::Down => StickyState::PinnedHidden,
        }
    }

    /// Recompute the state; returns it along with whether it changed.
    pub fn update(&mut self, inputs: &StickyInputs) -> (StickyState, bool) {
        let next = self.derive(inputs);
        let changed = next != self.state;
        if changed {
            tracing::debug!(
                from = self.state.label(),
                to = next.label(),
                offset = inputs.scroll_offset,
                filtered = inputs.filtered_count,
                min_results = inputs.min_results,
                "sticky header transition"
            );
            crate::perf::record(&CatalogEvent::Transition {
                from: self.state,
                to: next,
                inputs,
            });
            self.state = next;
        }
        (next, changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sticky::ScrollDirectionTracker;
    use proptest::prelude::*;

    fn inputs(offset: i64, filtered: usize, min: usize, direction: ScrollDirection) -> StickyInputs {
        StickyInputs {
            scroll_offset: offset,
            filtered_count: filtered,
            min_results: min,
            direction,
        }
    }

    #[test]
    fn test_initial_state_is_normal() {
        assert_eq!(StickyHeaderController::default().state(), StickyState::Normal);
    }

    #[test]
    fn test_not_enough_content_stays_normal_even_when_scrolled() {
        let mut ctl = StickyHeaderController::default();
        let (state, _) = ctl.update(&inputs(500, 2, 12, ScrollDirection::Up));
        assert_eq!(state, StickyState::Normal);
    }

    #[test]
    fn test_pins_past_offset_with_enough_content() {
        let mut ctl = StickyHeaderController::default();
        let (state, changed) = ctl.update(&inputs(150, 20, 12, ScrollDirection::Up));
        assert_eq!(state, StickyState::PinnedVisible);
        assert!(changed);
        assert!(state.is_pinned());
        assert!(!state.is_hidden());
    }

    #[test]
    fn test_offset_at_threshold_is_normal() {
        let ctl = StickyHeaderController::default();
        assert_eq!(ctl.derive(&inputs(100, 20, 12, ScrollDirection::Up)), StickyState::Normal);
        assert_eq!(
            ctl.derive(&inputs(101, 20, 12, ScrollDirection::Up)),
            StickyState::PinnedVisible
        );
    }

    #[test]
    fn test_exact_min_results_counts_as_enough() {
        let ctl = StickyHeaderController::default();
        assert_eq!(
            ctl.derive(&inputs(300, 12, 12, ScrollDirection::Up)),
            StickyState::PinnedVisible
        );
    }

    #[test]
    fn test_direction_flips_hide_and_reveal_pinned_header() {
        let mut ctl = StickyHeaderController::default();
        let mut tracker = ScrollDirectionTracker::default();
        tracker.observe(400);
        let mut seen = Vec::new();
        for offset in [150, 200, 160] {
            let direction = tracker.observe(offset);
            let (state, _) = ctl.update(&inputs(offset, 20, 12, direction));
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                StickyState::PinnedVisible,
                StickyState::PinnedHidden,
                StickyState::PinnedVisible
            ]
        );
    }

    #[test]
    fn test_content_shrinking_forces_normal() {
        let mut ctl = StickyHeaderController::default();
        ctl.update(&inputs(600, 20, 12, ScrollDirection::Down));
        assert_eq!(ctl.state(), StickyState::PinnedHidden);
        let (state, changed) = ctl.update(&inputs(600, 3, 12, ScrollDirection::Down));
        assert_eq!(state, StickyState::Normal);
        assert!(changed);
    }

    #[test]
    fn test_scrolling_back_to_top_unpins() {
        let mut ctl = StickyHeaderController::default();
        ctl.update(&inputs(600, 20, 12, ScrollDirection::Up));
        let (state, _) = ctl.update(&inputs(40, 20, 12, ScrollDirection::Up));
        assert_eq!(state, StickyState::Normal);
    }

    #[test]
    fn test_repeated_update_reports_no_change() {
        let mut ctl = StickyHeaderController::default();
        let i = inputs(600, 20, 12, ScrollDirection::Up);
        ctl.update(&i);
        let (_, changed) = ctl.update(&i);
        assert!(!changed);
    }

    #[test]
    fn test_custom_pin_offset() {
        let ctl = StickyHeaderController::new(400);
        assert_eq!(ctl.derive(&inputs(300, 20, 12, ScrollDirection::Up)), StickyState::Normal);
        assert_eq!(
            ctl.derive(&inputs(401, 20, 12, ScrollDirection::Up)),
            StickyState::PinnedVisible
        );
    }

    fn direction_strategy() -> impl Strategy<Value = ScrollDirection> {
        prop_oneof![Just(ScrollDirection::Up), Just(ScrollDirection::Down)]
    }

    proptest! {
        #[test]
        fn prop_normal_without_enough_content(
            history in proptest::collection::vec((0i64..5000, 0usize..40, direction_strategy()), 0..20),
            offset in -100i64..5000,
            min in 1usize..40,
            direction in direction_strategy(),
        ) {
            let mut ctl = StickyHeaderController::default();
            for (o, filtered, d) in history {
                ctl.update(&inputs(o, filtered, 12, d));
            }
            let filtered = min - 1;
            let (state, _) = ctl.update(&inputs(offset, filtered, min, direction));
            prop_assert_eq!(state, StickyState::Normal);
        }
    }
}
