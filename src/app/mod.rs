//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{InputFocus, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::sticky::{DEFAULT_DEAD_ZONE, DEFAULT_PIN_OFFSET, StickyThresholds};
use crate::ui::layout::CellSize;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    catalog: Catalog,
    catalog_path: Option<PathBuf>,
    watch_enabled: bool,
    mouse_enabled: bool,
    cell_size: CellSize,
    thresholds: StickyThresholds,
    dead_zone: u32,
    pin_offset: i64,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application for an already loaded catalog.
    ///
    /// `catalog_path` is `None` for the bundled catalog, which cannot be
    /// watched.
    pub fn new(catalog: Catalog, catalog_path: Option<PathBuf>) -> Self {
        Self {
            catalog,
            catalog_path,
            watch_enabled: false,
            mouse_enabled: true,
            cell_size: CellSize::default(),
            thresholds: StickyThresholds::default(),
            dead_zone: DEFAULT_DEAD_ZONE,
            pin_offset: DEFAULT_PIN_OFFSET,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable file watching.
    pub fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Enable or disable mouse capture.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Pixel size of one terminal cell.
    pub const fn with_cell_size(mut self, cell_size: CellSize) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Per-breakpoint card height estimates, widest first.
    pub fn with_card_heights(mut self, card_heights: [i32; 4]) -> Self {
        self.thresholds = self.thresholds.with_card_heights(card_heights);
        self
    }

    /// Scroll distance (pixels) below which direction changes are ignored.
    pub const fn with_dead_zone(mut self, dead_zone: u32) -> Self {
        self.dead_zone = dead_zone;
        self
    }

    /// Scroll offset (pixels) past which the header may pin.
    pub const fn with_pin_offset(mut self, pin_offset: i64) -> Self {
        self.pin_offset = pin_offset;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
