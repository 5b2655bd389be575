//! Adaptive sticky-header logic.
//!
//! - [`StickyThresholds`]: how many results a viewport needs before pinning
//! - [`ScrollDirectionTracker`]: up/down classification with a dead-zone
//! - [`StickyHeaderController`]: Normal / PinnedVisible / PinnedHidden
//! - [`HeaderSignals`]: scoped subscriptions to geometry and scroll sources

mod controller;
mod direction;
mod geometry;
mod sources;

pub use controller::{DEFAULT_PIN_OFFSET, StickyHeaderController, StickyInputs, StickyState};
pub use direction::{DEFAULT_DEAD_ZONE, ScrollDirection, ScrollDirectionTracker};
pub use geometry::{Breakpoint, StickyThresholds, ViewportGeometry};
pub use sources::{
    HeaderEvent, HeaderSignals, ScrollSignalSource, SignalSurface, ViewportGeometryProvider,
};
