use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{InputFocus, Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let source = model
        .catalog_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map_or_else(|| "bundled".to_string(), |s| s.to_string_lossy().to_string());

    let percent = model.viewport.scroll_percent();
    let results = format!(
        "{}/{} books (pin at {})",
        model.filtered_count(),
        model.catalog.item_count(),
        model.min_results()
    );
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };
    let hint = match model.focus {
        InputFocus::Search => "Enter: keep  Esc: clear",
        InputFocus::Filters => "Space: toggle  Esc: done",
        InputFocus::Content => "?:help",
    };

    let status = format!(
        " {source}  [{percent}%]  {results}  header:{}{watch_indicator}  {hint}",
        model.sticky_state().label()
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
