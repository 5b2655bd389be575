// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. catalog::CatalogError)
    clippy::module_name_repetitions
)]

//! # Bookstack
//!
//! A terminal browser for curated book catalogs.
//!
//! Bookstack shows a catalog of learning resources as a card grid with:
//! - Multi-select category filters with an "All" sentinel
//! - Case-insensitive search over titles and authors
//! - An adaptive sticky control header that pins only when enough results
//!   exist, hides while scrolling down and reappears while scrolling up
//! - File watching for live catalog edits
//!
//! ## Architecture
//!
//! Bookstack uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`catalog`]: Catalog data and the filter pipeline
//! - [`sticky`]: Result threshold, scroll direction and header state
//! - [`signal`]: Scoped listener registration for viewport sources
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved default flags
//! - [`watcher`]: File watching

pub mod app;
pub mod catalog;
pub mod config;
pub mod perf;
pub mod signal;
pub mod sticky;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::catalog::{Catalog, FilterSelection, SearchQuery, filter_catalog};
    pub use crate::sticky::{StickyState, StickyThresholds, ViewportGeometry};
    pub use crate::ui::viewport::Viewport;
}
