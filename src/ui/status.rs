use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, ToastLevel};

use super::style;

const SEARCH_PLACEHOLDER: &str = "Write something here...";

pub fn render_search_input(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(style::accent()));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if model.search.is_empty() {
        frame.render_widget(
            Paragraph::new(SEARCH_PLACEHOLDER).style(style::placeholder_style()),
            inner,
        );
        frame.set_cursor_position(Position::new(inner.x, inner.y));
        return;
    }

    // Keep the cursor visible by showing the tail of long input.
    let visible = visible_tail(&model.search, usize::from(inner.width.saturating_sub(1)));
    let cursor_x = u16::try_from(visible.width()).unwrap_or(inner.width);
    frame.render_widget(Paragraph::new(visible), inner);
    frame.set_cursor_position(Position::new(
        inner.x + cursor_x.min(inner.width.saturating_sub(1)),
        inner.y,
    ));
}

/// Longest suffix of `text` that fits in `max_width` columns.
pub fn visible_tail(text: &str, max_width: usize) -> &str {
    if text.width() <= max_width {
        return text;
    }
    let mut width = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    &text[start..]
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let newest = model
        .entries
        .last_inserted_entry()
        .zip(model.entries.last_inserted_index())
        .map_or_else(String::new, |(entry, idx)| {
            format!("  newest: {} @{}", entry.text(), idx)
        });
    let matches = if model.debounced_search.is_empty() {
        String::new()
    } else {
        let count = model.match_count();
        format!("  {count} match{}", if count == 1 { "" } else { "es" })
    };
    let settling = if model.search == model.debounced_search {
        ""
    } else {
        " …"
    };
    let paused = if model.paused { "  [paused]" } else { "" };

    let status = format!(
        " {} entries{}{}{}{}  F1:help",
        model.entries.len(),
        newest,
        matches,
        settling,
        paused
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
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
