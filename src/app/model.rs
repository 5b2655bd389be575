use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::catalog::{
    ALL_TOPICS, Catalog, CatalogError, FilterSelection, MatchedItem, SearchQuery, filter_catalog,
};
use crate::perf::CatalogEvent;
use crate::sticky::{
    DEFAULT_DEAD_ZONE, DEFAULT_PIN_OFFSET, ScrollDirection, ScrollDirectionTracker,
    StickyHeaderController, StickyInputs, StickyState, StickyThresholds, ViewportGeometry,
};
use crate::ui::layout::{CatalogLayout, CellSize};
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which part of the screen receives typed keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFocus {
    #[default]
    Content,
    /// Typing edits the search query.
    Search,
    /// Left/right move over the filter buttons.
    Filters,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. Sticky-header state
/// is derived: every filter, scroll and geometry change recomputes it from
/// the current inputs.
pub struct Model {
    /// Loaded catalog (immutable between reloads)
    pub catalog: Catalog,
    /// Catalog file, `None` for the bundled catalog
    pub catalog_path: Option<PathBuf>,
    /// Active category filters
    pub selection: FilterSelection,
    /// Current search text
    pub query: SearchQuery,
    pub focus: InputFocus,
    /// Focused filter button (0 is "All")
    pub filter_cursor: usize,
    /// Viewport managing scroll position
    pub viewport: Viewport,
    /// Line layout of header and card grid
    pub layout: CatalogLayout,
    pub thresholds: StickyThresholds,
    geometry: ViewportGeometry,
    min_results: usize,
    filtered_count: usize,
    tracker: ScrollDirectionTracker,
    /// Last scroll offset delivered by the scroll source, in pixels
    scroll_sample: i64,
    sticky: StickyHeaderController,
    /// Whether file watching is enabled
    pub watch_enabled: bool,
    pub mouse_enabled: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("catalog_path", &self.catalog_path)
            .field("selection", &self.selection)
            .field("query", &self.query.as_str())
            .field("filtered_count", &self.filtered_count)
            .field("min_results", &self.min_results)
            .field("sticky", &self.sticky.state())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model over `catalog` for a terminal of `terminal_size`.
    ///
    /// One row is reserved for the status bar; the rest is the scrolled
    /// viewport whose pixel geometry feeds the sticky threshold.
    pub fn new(catalog: Catalog, catalog_path: Option<PathBuf>, terminal_size: (u16, u16)) -> Self {
        let (width, height) = (terminal_size.0, terminal_size.1.saturating_sub(1));
        let viewport = Viewport::new(width, height, CellSize::default());
        let mut model = Self {
            catalog,
            catalog_path,
            selection: FilterSelection::default(),
            query: SearchQuery::default(),
            focus: InputFocus::Content,
            filter_cursor: 0,
            geometry: viewport.surface_geometry(),
            viewport,
            layout: CatalogLayout::default(),
            thresholds: StickyThresholds::default(),
            min_results: 0,
            filtered_count: 0,
            tracker: ScrollDirectionTracker::new(DEFAULT_DEAD_ZONE),
            scroll_sample: 0,
            sticky: StickyHeaderController::new(DEFAULT_PIN_OFFSET),
            watch_enabled: false,
            mouse_enabled: true,
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            toast: None,
            should_quit: false,
        };
        model.min_results = model.thresholds.min_results(model.geometry);
        model.refilter();
        model
    }

    /// Use a different pixel size per terminal cell.
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: CellSize) -> Self {
        self.viewport.set_cell_size(cell_size);
        self.apply_geometry(self.viewport.surface_geometry());
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: StickyThresholds) -> Self {
        self.thresholds = thresholds;
        self.apply_geometry(self.geometry);
        self
    }

    #[must_use]
    pub fn with_dead_zone(mut self, dead_zone: u32) -> Self {
        self.tracker = ScrollDirectionTracker::new(dead_zone);
        self
    }

    #[must_use]
    pub fn with_pin_offset(mut self, pin_offset: i64) -> Self {
        self.sticky = StickyHeaderController::new(pin_offset);
        self.refresh_sticky();
        self
    }

    /// Filter button labels: "All" followed by the catalog's topics.
    pub fn filter_labels(&self) -> Vec<&str> {
        std::iter::once(ALL_TOPICS)
            .chain(self.catalog.topics())
            .collect()
    }

    /// Items passing the current selection and search, in catalog order.
    pub fn matched(&self) -> Vec<MatchedItem<'_>> {
        filter_catalog(&self.catalog, &self.selection, &self.query)
    }

    pub const fn filtered_count(&self) -> usize {
        self.filtered_count
    }

    pub const fn min_results(&self) -> usize {
        self.min_results
    }

    pub const fn geometry(&self) -> ViewportGeometry {
        self.geometry
    }

    pub const fn sticky_state(&self) -> StickyState {
        self.sticky.state()
    }

    pub const fn scroll_direction(&self) -> ScrollDirection {
        self.tracker.direction()
    }

    /// Re-run the filter pipeline and everything derived from its result.
    pub(super) fn refilter(&mut self) {
        let count = self.matched().len();
        if count != self.filtered_count {
            crate::perf::record(&CatalogEvent::Filtered {
                selection: &self.selection,
                query: self.query.as_str(),
                count,
            });
        }
        self.filtered_count = count;
        self.relayout();
    }

    pub(super) fn relayout(&mut self) {
        let cards_per_row = self.thresholds.cards_per_row(self.geometry.width).max(1);
        let card_height = self
            .viewport
            .cell_size()
            .card_rows(self.thresholds.estimated_card_height(self.geometry.width));
        let layout = CatalogLayout::compute(
            self.viewport.width(),
            &self.filter_labels(),
            cards_per_row,
            card_height,
            self.filtered_count,
        );
        self.viewport.set_total_lines(layout.total_lines());
        self.layout = layout;
        self.filter_cursor = self.filter_cursor.min(self.catalog.categories().len());
        self.refresh_sticky();
    }

    /// Adopt a freshly sampled viewport geometry and its threshold.
    pub(super) fn apply_geometry(&mut self, geometry: ViewportGeometry) {
        self.geometry = geometry;
        let min_results = self.thresholds.min_results(geometry);
        if min_results != self.min_results {
            crate::perf::record(&CatalogEvent::Threshold {
                geometry,
                min_results,
            });
        }
        self.min_results = min_results;
        self.relayout();
    }

    /// Feed one scroll sample to the direction tracker.
    pub(super) fn observe_scroll(&mut self, offset: i64) {
        self.scroll_sample = offset;
        self.tracker.observe(offset);
        self.refresh_sticky();
    }

    pub(super) fn refresh_sticky(&mut self) {
        let inputs = StickyInputs {
            scroll_offset: self.scroll_sample,
            filtered_count: self.filtered_count,
            min_results: self.min_results,
            direction: self.tracker.direction(),
        };
        self.sticky.update(&inputs);
    }

    /// Toggle a filter by name. Names that are neither "All" nor a catalog
    /// topic are ignored, so the selection never holds a filter that can't
    /// match.
    pub(super) fn toggle_topic(&mut self, name: &str) -> bool {
        if name != ALL_TOPICS && !self.catalog.contains_topic(name) {
            tracing::debug!(topic = name, "ignoring toggle of unknown topic");
            return false;
        }
        self.selection.toggle(name);
        self.refilter();
        true
    }

    /// Label of the filter button under the cursor.
    pub fn focused_filter(&self) -> Option<&str> {
        self.filter_labels().get(self.filter_cursor).copied()
    }

    /// Swap in a newly loaded catalog, dropping filters whose topic vanished.
    pub(super) fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        let catalog = &self.catalog;
        self.selection.retain(|topic| catalog.contains_topic(topic));
        self.refilter();
    }

    pub(super) fn reload_from_disk(&mut self) -> Result<(), CatalogError> {
        let catalog = match &self.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::bundled()?,
        };
        self.replace_catalog(catalog);
        Ok(())
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(Catalog::default(), None, (80, 24))
    }
}
