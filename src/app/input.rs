use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;

use crate::app::model::InputFocus;
use crate::app::{App, Message, Model};
use crate::ui::viewport::ScrollMove;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || !model.mouse_enabled {
            return None;
        }

        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => {
                let top = crate::ui::header_screen_top(model)?;
                let header_row = usize::try_from(i32::from(mouse.row) - top).ok()?;
                if header_row >= model.layout.header_height {
                    return None;
                }
                model
                    .layout
                    .button_at(mouse.column, header_row)
                    .map(Message::ToggleFilterIndex)
            }
            MouseEventKind::ScrollDown => {
                scroll_if_room(model, ScrollMove::Down(3), Message::ScrollDown(3))
            }
            MouseEventKind::ScrollUp => {
                scroll_if_room(model, ScrollMove::Up(3), Message::ScrollUp(3))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if model.focus == InputFocus::Search {
            return match key.code {
                KeyCode::Esc => Some(Message::CancelSearch),
                KeyCode::Enter => Some(Message::SubmitSearch),
                KeyCode::Backspace => {
                    let mut next = model.query.as_str().to_owned();
                    next.pop();
                    Some(Message::SearchInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = model.query.as_str().to_owned();
                    next.push(c);
                    Some(Message::SearchInput(next))
                }
                _ => None,
            };
        }

        if model.focus == InputFocus::Filters {
            match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => return Some(Message::ToggleFocusedFilter),
                KeyCode::Left => return Some(Message::FilterCursorLeft),
                KeyCode::Right => return Some(Message::FilterCursorRight),
                KeyCode::Esc => return Some(Message::FocusContent),
                _ => {}
            }
        }

        match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => {
                scroll_if_room(model, ScrollMove::Down(1), Message::ScrollDown(1))
            }
            KeyCode::Char('k') | KeyCode::Up => {
                scroll_if_room(model, ScrollMove::Up(1), Message::ScrollUp(1))
            }
            KeyCode::Char(' ') | KeyCode::PageDown => {
                scroll_if_room(model, ScrollMove::PageDown, Message::PageDown)
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                scroll_if_room(model, ScrollMove::PageUp, Message::PageUp)
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                scroll_if_room(model, ScrollMove::HalfPageDown, Message::HalfPageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                scroll_if_room(model, ScrollMove::HalfPageUp, Message::HalfPageUp)
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Redraw)
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            // Filters
            KeyCode::Tab | KeyCode::Char('l') => Some(Message::FilterCursorRight),
            KeyCode::BackTab | KeyCode::Char('h') => Some(Message::FilterCursorLeft),
            KeyCode::Char(c @ '0'..='9') => c
                .to_digit(10)
                .and_then(|d| usize::try_from(d).ok())
                .map(Message::ToggleFilterIndex),
            KeyCode::Char('c') => Some(Message::ClearFilters),
            KeyCode::Esc if model.query.is_active() => Some(Message::CancelSearch),

            // Catalog
            KeyCode::Char('w') => Some(Message::ToggleWatch),
            KeyCode::Char('r' | 'R') => Some(Message::ForceReload),
            KeyCode::Char('o') => Some(Message::OpenFirstVisibleLink),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            // Search
            KeyCode::Char('/') => Some(Message::FocusSearch),

            // Quit
            KeyCode::Char('q') => Some(Message::Quit),

            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// `msg` if the viewport has room for `mv`.
fn scroll_if_room(model: &Model, mv: ScrollMove, msg: Message) -> Option<Message> {
    model.viewport.can_scroll(mv).then_some(msg)
}
