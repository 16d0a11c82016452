use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::{SEARCH_BAR_HEIGHT, STATUS_BAR_HEIGHT, overlays, rows, status};

/// Areas of the main screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub search: Rect,
    pub list: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

pub fn split_screen(area: Rect, with_toast: bool) -> ScreenLayout {
    let toast_height = u16::from(with_toast);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SEARCH_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(toast_height),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    ScreenLayout {
        search: chunks[0],
        list: chunks[1],
        toast: with_toast.then_some(chunks[2]),
        status: chunks[3],
    }
}

/// Render the complete UI at `now_ms`.
///
/// Painting the newest entry for the first time starts its entrance
/// transition; it shows collapsed in this frame and grows from the next.
pub fn render(model: &mut Model, frame: &mut Frame, now_ms: u64) {
    let _scope = crate::perf::scope("ui::render");
    let area = frame.area();
    let layout = split_screen(area, model.active_toast().is_some());

    status::render_search_input(model, frame, layout.search);
    render_list(model, frame, layout.list, now_ms);
    if let Some(toast_area) = layout.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, layout.status);

    if model.help_visible {
        overlays::render_help_overlay(frame, area);
    }
}

fn render_list(model: &mut Model, frame: &mut Frame, area: Rect, now_ms: u64) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    if model.entries.is_empty() {
        frame.render_widget(
            Paragraph::new("No entries").style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let slots = rows::layout_rows(model, area, now_ms);
    for slot in &slots {
        if slot.height == 0 {
            continue;
        }
        let entry = &model.entries.entries()[slot.index];
        let tone = rows::row_tone(entry, &model.debounced_search, slot.phase);
        let row_area = Rect {
            x: area.x,
            y: slot.y,
            width: area.width,
            height: slot.height,
        };
        let (avatar, avatar_state) = if model.images_enabled {
            let state = model.avatar_state(entry.text());
            (model.avatars.get_mut(entry.text()), state)
        } else {
            (None, None)
        };
        rows::render_row(
            frame,
            row_area,
            entry,
            &model.debounced_search,
            tone,
            avatar,
            avatar_state,
        );
    }

    for slot in slots {
        if slot.phase == crate::animation::EntrancePhase::PendingEntrance {
            model.entrance.mark_painted(slot.id, now_ms);
        }
    }
}
