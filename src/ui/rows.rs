//! Entry rows: layout, appearance and drawing.
//!
//! Row appearance is a pure function of the entry, the debounced search term
//! and the entry's [`EntrancePhase`]. Precedence:
//! 1. newest entry awaiting its entrance: collapsed
//! 2. debounced term is a substring of the entry text: highlighted
//! 3. otherwise: normal

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::{Resize, StatefulImage};

use crate::animation::EntrancePhase;
use crate::app::Model;
use crate::avatar::AvatarState;
use crate::entry::{Entry, EntryId};

use super::{AVATAR_WIDTH, ROW_GAP, ROW_HEIGHT, style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTone {
    /// Zero-height initial style of a row about to animate in
    Collapsed,
    Highlighted,
    Normal,
}

/// Pick the row tone for `entry`.
pub fn row_tone(entry: &Entry, search: &str, phase: EntrancePhase) -> RowTone {
    if matches!(phase, EntrancePhase::PendingEntrance) {
        RowTone::Collapsed
    } else if entry.matches(search) {
        RowTone::Highlighted
    } else {
        RowTone::Normal
    }
}

/// Placement of one entry row inside the list area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSlot {
    pub index: usize,
    pub id: EntryId,
    pub y: u16,
    pub height: u16,
    pub phase: EntrancePhase,
}

/// Lay out the visible rows of `model` inside `area` at `now_ms`.
///
/// Rows stack from the viewport offset downwards. A collapsed row gets a
/// zero-height slot and no gap; the last row is clipped to the area.
pub fn layout_rows(model: &Model, area: Rect, now_ms: u64) -> Vec<RowSlot> {
    let bottom = area.bottom();
    let mut y = area.y;
    let mut slots = Vec::new();
    for (index, entry) in model
        .entries
        .entries()
        .iter()
        .enumerate()
        .skip(model.viewport.offset())
    {
        if y >= bottom {
            break;
        }
        let phase = model.entrance.phase(entry.id(), now_ms);
        let height = phase.height(ROW_HEIGHT).min(bottom - y);
        slots.push(RowSlot {
            index,
            id: entry.id(),
            y,
            height,
            phase,
        });
        if height > 0 {
            y = y.saturating_add(height + ROW_GAP);
        }
    }
    slots
}

/// Label for `text` with every occurrence of `search` emphasised.
pub fn label_line<'a>(text: &'a str, search: &str, tone: RowTone) -> Line<'a> {
    if tone != RowTone::Highlighted || search.is_empty() {
        return Line::raw(text);
    }
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(search) {
        if pos > 0 {
            spans.push(Span::raw(&rest[..pos]));
        }
        let end = pos + search.len();
        spans.push(Span::styled(&rest[pos..end], style::match_style()));
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        spans.push(Span::raw(rest));
    }
    Line::from(spans)
}

/// Shown in the avatar column when images are disabled or unsupported.
pub const NO_AVATAR_PLACEHOLDER: &str = "bot";

/// Draw one entry row into `area`.
///
/// The avatar is only drawn once the row has reached its full height, so
/// image protocols never render into a half-grown row.
pub fn render_row(
    frame: &mut Frame,
    area: Rect,
    entry: &Entry,
    search: &str,
    tone: RowTone,
    avatar: Option<&mut StatefulProtocol>,
    avatar_state: Option<AvatarState>,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(style::row_style(tone));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(AVATAR_WIDTH),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);
    let (avatar_area, label_area) = (columns[0], columns[2]);

    if area.height >= ROW_HEIGHT {
        match (avatar, avatar_state) {
            (Some(protocol), _) => {
                let image = StatefulImage::default().resize(Resize::Fit(None));
                frame.render_stateful_widget(image, avatar_area, protocol);
            }
            (None, state) => {
                let (glyph, glyph_style) = match state {
                    Some(AvatarState::Loading) => ("…", Style::default()),
                    Some(AvatarState::Failed) => ("×", Style::default()),
                    Some(AvatarState::Ready) => ("", Style::default()),
                    None => (NO_AVATAR_PLACEHOLDER, style::placeholder_style()),
                };
                let middle = Rect {
                    y: avatar_area.y + avatar_area.height / 2,
                    height: 1,
                    ..avatar_area
                };
                frame.render_widget(
                    Paragraph::new(glyph)
                        .style(glyph_style)
                        .alignment(Alignment::Center),
                    middle,
                );
            }
        }
    }

    let label_row = Rect {
        y: label_area.y + label_area.height / 2,
        height: 1,
        ..label_area
    };
    frame.render_widget(Paragraph::new(label_line(entry.text(), search, tone)), label_row);
}
