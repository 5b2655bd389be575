//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's palette, plus the
//! technology brand colors for category badges.

use ratatui::style::{Color, Modifier, Style};

use crate::catalog::Technology;
use crate::sticky::StickyState;

/// Accent shared by the title and active filters.
const ACCENT: Color = Color::Cyan;
const DIM: Color = Color::Indexed(245);

pub fn title_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Border of the control header; a pinned header gets a stronger frame.
pub fn header_border_style(state: StickyState) -> Style {
    if state.is_pinned() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(DIM)
    }
}

pub fn label_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn placeholder_style() -> Style {
    Style::default().fg(DIM).add_modifier(Modifier::ITALIC)
}

pub fn dim_style() -> Style {
    Style::default().fg(DIM)
}

pub fn link_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}

/// Filter button style; `active` buttons are filled, `focused` is reversed.
pub fn filter_button_style(topic: &str, active: bool, focused: bool) -> Style {
    let color = topic_color(topic);
    let base = if active {
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    if focused {
        base.add_modifier(Modifier::REVERSED)
    } else {
        base
    }
}

/// Badge shown on a card for its category.
pub fn badge_style(topic: &str) -> Style {
    Style::default()
        .fg(topic_color(topic))
        .add_modifier(Modifier::BOLD)
}

pub fn card_border_style(topic: &str) -> Style {
    Style::default().fg(topic_color(topic))
}

pub fn card_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn no_results_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Brand color for a topic; "All" and unknown topics use the accent.
pub fn topic_color(topic: &str) -> Color {
    Technology::from_topic(topic).color().unwrap_or(ACCENT)
}
