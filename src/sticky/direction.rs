/// Default dead-zone, in pixels, a scroll move must exceed to count.
pub const DEFAULT_DEAD_ZONE: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    #[default]
    Up,
    Down,
}

/// Classifies a stream of scroll offsets as moving up or down.
///
/// Moves of at most `dead_zone` pixels from the last accepted sample are
/// ignored entirely: neither the direction nor the reference offset change.
/// Small jitter therefore accumulates until it crosses the dead-zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollDirectionTracker {
    previous: i64,
    direction: ScrollDirection,
    dead_zone: u32,
}

impl Default for ScrollDirectionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DEAD_ZONE)
    }
}

impl ScrollDirectionTracker {
    pub const fn new(dead_zone: u32) -> Self {
        Self {
            previous: 0,
            direction: ScrollDirection::Up,
            dead_zone,
        }
    }

    pub const fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Offset of the last sample that crossed the dead-zone.
    pub const fn reference_offset(&self) -> i64 {
        self.previous
    }

    pub const fn dead_zone(&self) -> u32 {
        self.dead_zone
    }

    /// Feed one scroll sample; returns the (possibly unchanged) direction.
    pub fn observe(&mut self, offset: i64) -> ScrollDirection {
        if self.previous.abs_diff(offset) > u64::from(self.dead_zone) {
            self.direction = if self.previous > offset {
                ScrollDirection::Up
            } else {
                ScrollDirection::Down
            };
            self.previous = offset;
        }
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_direction_is_up() {
        let tracker = ScrollDirectionTracker::default();
        assert_eq!(tracker.direction(), ScrollDirection::Up);
        assert_eq!(tracker.reference_offset(), 0);
    }

    #[test]
    fn test_scrolling_down_past_dead_zone() {
        let mut tracker = ScrollDirectionTracker::default();
        assert_eq!(tracker.observe(50), ScrollDirection::Down);
        assert_eq!(tracker.reference_offset(), 50);
    }

    #[test]
    fn test_scrolling_up_past_dead_zone() {
        let mut tracker = ScrollDirectionTracker::default();
        tracker.observe(200);
        assert_eq!(tracker.observe(150), ScrollDirection::Up);
        assert_eq!(tracker.reference_offset(), 150);
    }

    #[test]
    fn test_move_inside_dead_zone_is_ignored() {
        let mut tracker = ScrollDirectionTracker::default();
        tracker.observe(100);
        assert_eq!(tracker.observe(95), ScrollDirection::Down);
        assert_eq!(tracker.reference_offset(), 100);
        // Exactly the dead-zone is still inside it.
        assert_eq!(tracker.observe(90), ScrollDirection::Down);
        assert_eq!(tracker.reference_offset(), 100);
    }

    #[test]
    fn test_jitter_accumulates_until_threshold() {
        let mut tracker = ScrollDirectionTracker::default();
        for offset in [4, 8, 10] {
            tracker.observe(offset);
            assert_eq!(tracker.reference_offset(), 0);
        }
        assert_eq!(tracker.observe(11), ScrollDirection::Down);
        assert_eq!(tracker.reference_offset(), 11);
    }

    #[test]
    fn test_custom_dead_zone() {
        let mut tracker = ScrollDirectionTracker::new(40);
        tracker.observe(30);
        assert_eq!(tracker.direction(), ScrollDirection::Up);
        tracker.observe(41);
        assert_eq!(tracker.direction(), ScrollDirection::Down);
    }
}
