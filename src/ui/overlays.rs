use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

const HELP_KEYS: &[(&str, &str)] = &[
    ("type", "edit the search"),
    ("Backspace", "delete last character"),
    ("Ctrl+U", "clear the search"),
    ("Esc", "clear the search, quit when empty"),
    ("Up/Down", "scroll one entry"),
    ("PgUp/PgDn", "scroll one page"),
    ("Home/End", "first/last entry"),
    ("Ctrl+P", "pause/resume insertion"),
    ("F1", "toggle this help"),
    ("Ctrl+C", "quit"),
];

pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    #[allow(clippy::cast_possible_truncation)]
    let needed_rows = HELP_KEYS.len() as u16 + 4;
    let popup_width = area.width.saturating_sub(12).clamp(20, 56);
    let popup_height = needed_rows.min(area.height);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let lines: Vec<Line> = HELP_KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:>10}  "),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        })
        .collect();

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
