use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{InputFocus, Model};
use crate::catalog::{MatchedItem, Technology};
use crate::sticky::StickyState;

use super::layout::{
    HEADER_BUTTONS_TOP, HEADER_TOP, NO_RESULTS_HEIGHT, TITLE, filter_button_text,
};
use super::{overlays, status, style};

const SEARCH_PLACEHOLDER: &str = "Title or author";

/// Screen row where the control header's top border is drawn, if it is
/// drawn at all. May be negative while the header scrolls off the top.
pub fn header_screen_top(model: &Model) -> Option<i32> {
    match model.sticky_state() {
        StickyState::PinnedVisible => Some(0),
        StickyState::PinnedHidden => None,
        StickyState::Normal => {
            let top = i64::try_from(HEADER_TOP).unwrap_or(i64::MAX)
                - i64::try_from(model.viewport.offset()).unwrap_or(i64::MAX);
            i32::try_from(top).ok()
        }
    }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let content = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect::new(area.x, area.y + content.height, area.width, 1);

    render_catalog(model, frame, content);

    if model.active_toast().is_some() && content.height > 0 {
        let toast_area = Rect::new(area.x, content.bottom() - 1, area.width, 1);
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_catalog(model: &Model, frame: &mut Frame, area: Rect) {
    let top = model.viewport.offset();
    let bottom = top + usize::from(area.height);
    let layout = &model.layout;
    let state = model.sticky_state();

    let title = Paragraph::new(Line::styled(TITLE, style::title_style()).centered());
    blit(frame, area, top, &render_piece(title, area.width, 1), 0, 0);

    // A pinned header leaves its slot empty so the cards do not shift.
    let header = render_header(model, area.width);
    if !state.is_pinned() {
        blit(frame, area, top, &header, HEADER_TOP, 0);
    }

    if model.filtered_count() == 0 {
        let panel = render_no_results(model, area.width);
        blit(frame, area, top, &panel, layout.grid_top(), 0);
    } else {
        let matched = model.matched();
        let visible = layout.cards_in_lines(top, bottom);
        let card_width = if layout.cards_per_row > 1 {
            layout.card_width.saturating_sub(1).max(1)
        } else {
            layout.card_width
        };
        for index in visible {
            let Some(entry) = matched.get(index) else {
                break;
            };
            let (line, x) = layout.card_position(index);
            let card = render_card(entry, card_width, layout.card_height);
            blit(frame, area, top, &card, line, x);
        }
    }

    if state == StickyState::PinnedVisible {
        // Drawn last so it covers the content scrolled beneath it.
        blit(frame, area, 0, &header, 0, 0);
    }
}

/// Render `widget` into a standalone buffer of the given size.
fn render_piece(widget: impl Widget, width: u16, height: usize) -> Buffer {
    let height = u16::try_from(height).unwrap_or(u16::MAX);
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(buf.area, &mut buf);
    buf
}

/// Copy the rows of `piece` that fall inside the viewport onto the frame.
///
/// `line` is the content line of the piece's first row and `x` its column
/// offset inside `area`; `offset` is the first content line on screen.
fn blit(frame: &mut Frame, area: Rect, offset: usize, piece: &Buffer, line: usize, x: u16) {
    let screen = frame.buffer_mut();
    for row in 0..piece.area.height {
        let content_line = line + usize::from(row);
        if content_line < offset {
            continue;
        }
        let Ok(rel) = u16::try_from(content_line - offset) else {
            break;
        };
        if rel >= area.height {
            break;
        }
        let y = area.y + rel;
        for col in 0..piece.area.width {
            let screen_x = area.x.saturating_add(x).saturating_add(col);
            if screen_x >= area.right() {
                break;
            }
            if let (Some(src), Some(dst)) = (piece.cell((col, row)), screen.cell_mut((screen_x, y)))
            {
                *dst = src.clone();
            }
        }
    }
}

fn render_header(model: &Model, width: u16) -> Buffer {
    let layout = &model.layout;
    let state = model.sticky_state();
    let height = u16::try_from(layout.header_height).unwrap_or(u16::MAX);
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search & filter ")
        .border_style(style::header_border_style(state));
    let inner = block.inner(buf.area);
    block.render(buf.area, &mut buf);
    if inner.width < 2 || inner.height == 0 {
        return buf;
    }

    let searching = model.focus == InputFocus::Search;
    let mut search = vec![Span::styled(" Search: ", style::label_style())];
    if model.query.is_empty() && !searching {
        search.push(Span::styled(SEARCH_PLACEHOLDER, style::placeholder_style()));
    } else {
        search.push(Span::raw(model.query.as_str().to_owned()));
    }
    if searching {
        search.push(Span::styled("▏", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    buf.set_line(inner.x, inner.y, &Line::from(search), inner.width);

    if inner.height > 1 {
        let label = Line::from(vec![
            Span::styled(" Filter by: ", style::label_style()),
            Span::styled(model.selection.to_string(), style::dim_style()),
        ]);
        buf.set_line(inner.x, inner.y + 1, &label, inner.width);
    }

    let labels = model.filter_labels();
    let focused = model.focus == InputFocus::Filters;
    for button in &layout.buttons {
        let Some(name) = labels.get(button.index) else {
            continue;
        };
        let Ok(row) = u16::try_from(HEADER_BUTTONS_TOP + button.row) else {
            continue;
        };
        if row >= height.saturating_sub(1) {
            continue;
        }
        let button_style = style::filter_button_style(
            name,
            model.selection.contains(name),
            focused && model.filter_cursor == button.index,
        );
        let max = inner.right().saturating_sub(button.x);
        buf.set_stringn(button.x, row, filter_button_text(name), usize::from(max), button_style);
    }
    buf
}

fn render_card(entry: &MatchedItem<'_>, width: u16, height: usize) -> Buffer {
    let height = u16::try_from(height).unwrap_or(u16::MAX);
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    let item = entry.item;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style::card_border_style(entry.topic));
    let inner = block.inner(buf.area);
    block.render(buf.area, &mut buf);
    if inner.height == 0 || inner.width == 0 {
        return buf;
    }

    let badge = format!("{} {}", Technology::from_topic(entry.topic).icon(), entry.topic);
    let lines = vec![
        Line::styled(badge, style::badge_style(entry.topic)),
        Line::styled(item.title.clone(), style::card_title_style()),
        Line::from(vec![
            Span::styled("Author: ", style::label_style()),
            Span::raw(item.author.clone()),
        ]),
        Line::from(vec![
            Span::styled("Publisher: ", style::label_style()),
            Span::raw(item.publisher.clone()),
            Span::raw(" · "),
            Span::styled("Edition: ", style::label_style()),
            Span::raw(item.edition.clone()),
        ]),
        Line::from(vec![
            Span::styled("Level: ", style::label_style()),
            Span::raw(item.level.clone()),
        ]),
        Line::styled(item.rationale.clone(), style::dim_style()),
    ];
    // The last inner row is reserved for the link.
    let body = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(body, &mut buf);

    if inner.height > 1 && !item.resource_link.is_empty() {
        let link = Line::styled(item.resource_link.clone(), style::link_style());
        buf.set_line(inner.x, inner.bottom() - 1, &link, inner.width);
    }
    buf
}

fn render_no_results(model: &Model, width: u16) -> Buffer {
    let message = if model.query.is_active() {
        format!("Nothing matches \"{}\"", model.query.as_str().trim())
    } else {
        "No books for the selected filters".to_string()
    };
    let mut lines = vec![
        Line::styled("📚 No books found", style::no_results_style()).centered(),
        Line::raw(message).centered(),
        Line::raw(""),
        Line::styled("Try:", style::label_style()),
        Line::raw("  • checking the spelling"),
        Line::raw("  • using more general terms"),
        Line::raw("  • selecting different categories"),
        Line::raw("  • clearing all filters"),
    ];
    if !model.selection.is_all() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Press c to clear filters and search",
            style::link_style(),
        ));
    }
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style::dim_style()),
    );
    render_piece(panel, width, NO_RESULTS_HEIGHT)
}
