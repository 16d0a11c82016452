use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Message, Model};

use super::event_loop::Timers;

/// Entries scrolled per mouse wheel notch.
const WHEEL_STEP: usize = 1;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        timers: &mut Timers,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(width, height) => {
                tracing::trace!(width, height, "resize queued");
                timers.resize.queue((*width, *height), now_ms);
                None
            }
            Event::Paste(text) => {
                let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
                if pasted.is_empty() {
                    return None;
                }
                Some(Message::SearchInput(format!("{}{pasted}", model.search)))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            return Some(Message::Quit);
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => Some(Message::HideHelp),
                _ => None,
            };
        }

        if ctrl {
            return match key.code {
                KeyCode::Char('u') => Some(Message::ClearSearch),
                KeyCode::Char('p') => Some(Message::TogglePause),
                _ => None,
            };
        }

        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Esc => {
                if model.search.is_empty() {
                    Some(Message::Quit)
                } else {
                    Some(Message::ClearSearch)
                }
            }
            KeyCode::Backspace => {
                let mut text = model.search.clone();
                text.pop().map(|_| Message::SearchInput(text))
            }
            KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Home => Some(Message::GoToTop),
            KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::SearchInput(format!("{}{c}", model.search)))
            }
            _ => None,
        }
    }

    pub(super) const fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_STEP)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_STEP)),
            _ => None,
        }
    }
}
