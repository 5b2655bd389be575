use crate::app::Model;
use crate::app::model::InputFocus;
use crate::sticky::ViewportGeometry;
use crate::ui::viewport::ScrollMove;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up half page
    HalfPageUp,
    /// Scroll down half page
    HalfPageDown,
    /// Go to the top of the catalog
    GoToTop,
    /// Go to the end of the catalog
    GoToBottom,

    // Search
    /// Start editing the search query
    FocusSearch,
    /// Replace the search query
    SearchInput(String),
    /// Keep the query and leave the search field
    SubmitSearch,
    /// Clear the query and leave the search field
    CancelSearch,

    // Filters
    /// Return keyboard focus to the content
    FocusContent,
    /// Focus the filter buttons and move the cursor left (wraps)
    FilterCursorLeft,
    /// Focus the filter buttons and move the cursor right (wraps)
    FilterCursorRight,
    /// Toggle the filter under the cursor
    ToggleFocusedFilter,
    /// Toggle a filter by topic name ("All" resets)
    ToggleFilter(String),
    /// Toggle the n-th filter button (0 is "All")
    ToggleFilterIndex(usize),
    /// Reset filters to "All" and clear the search
    ClearFilters,

    // Links
    /// Open the resource link of the first card on screen
    OpenFirstVisibleLink,

    // File watching
    /// Toggle file watching
    ToggleWatch,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Catalog file changed externally, reload
    FileChanged,
    /// Force reload of the catalog
    ForceReload,

    // Window
    /// Terminal resized (columns, rows)
    Resize(u16, u16),
    /// Viewport geometry sampled by the display surface
    ViewportGeometry(ViewportGeometry),
    /// Scroll offset (pixels) delivered by the scroll source
    ScrollSample(i64),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Navigation
        Message::ScrollUp(n) => model.viewport.scroll(ScrollMove::Up(n)),
        Message::ScrollDown(n) => model.viewport.scroll(ScrollMove::Down(n)),
        Message::PageUp => model.viewport.scroll(ScrollMove::PageUp),
        Message::PageDown => model.viewport.scroll(ScrollMove::PageDown),
        Message::HalfPageUp => model.viewport.scroll(ScrollMove::HalfPageUp),
        Message::HalfPageDown => model.viewport.scroll(ScrollMove::HalfPageDown),
        Message::GoToTop => model.viewport.scroll(ScrollMove::Top),
        Message::GoToBottom => model.viewport.scroll(ScrollMove::Bottom),

        // Search
        Message::FocusSearch => {
            model.focus = InputFocus::Search;
            model.help_visible = false;
        }
        Message::SearchInput(text) => {
            model.query = crate::catalog::SearchQuery::new(text);
            model.refilter();
        }
        Message::SubmitSearch => {
            model.focus = InputFocus::Content;
        }
        Message::CancelSearch => {
            model.focus = InputFocus::Content;
            if !model.query.is_empty() {
                model.query.clear();
                model.refilter();
            }
        }

        // Filters
        Message::FocusContent => {
            model.focus = InputFocus::Content;
        }
        Message::FilterCursorLeft => {
            let count = model.filter_labels().len();
            model.focus = InputFocus::Filters;
            model.filter_cursor = (model.filter_cursor + count - 1) % count;
        }
        Message::FilterCursorRight => {
            let count = model.filter_labels().len();
            model.focus = InputFocus::Filters;
            model.filter_cursor = (model.filter_cursor + 1) % count;
        }
        Message::ToggleFocusedFilter => {
            if let Some(name) = model.focused_filter().map(ToOwned::to_owned) {
                model.toggle_topic(&name);
            }
        }
        Message::ToggleFilter(name) => {
            model.toggle_topic(&name);
        }
        Message::ToggleFilterIndex(index) => {
            if let Some(name) = model.filter_labels().get(index).map(|s| (*s).to_owned()) {
                model.filter_cursor = index;
                model.toggle_topic(&name);
            }
        }
        Message::ClearFilters => {
            model.selection.reset();
            model.query.clear();
            model.refilter();
        }

        Message::ToggleWatch => {
            model.watch_enabled = !model.watch_enabled;
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        // OpenFirstVisibleLink/FileChanged/ForceReload: handled in effects
        // Redraw: no state change needed
        Message::OpenFirstVisibleLink
        | Message::FileChanged
        | Message::ForceReload
        | Message::Redraw => {}

        // Window
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            model.relayout();
        }
        Message::ViewportGeometry(geometry) => {
            model.apply_geometry(geometry);
        }
        Message::ScrollSample(offset) => {
            model.observe_scroll(offset);
        }

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}
