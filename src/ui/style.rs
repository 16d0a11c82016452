//! Theming and color definitions.
//!
//! Row colors follow the demo's palette: blue rows, orange highlights.
//! Terminals without truecolor get the nearest xterm-256 colors.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};

use super::rows::RowTone;

/// Default row background, `#13b0ff`.
pub const ROW_BLUE: Color = Color::Rgb(0x13, 0xb0, 0xff);
/// Highlighted row background, `#ff9319`.
pub const ROW_ORANGE: Color = Color::Rgb(0xff, 0x93, 0x19);

const ROW_BLUE_256: Color = Color::Indexed(39);
const ROW_ORANGE_256: Color = Color::Indexed(208);

static TRUECOLOR: LazyLock<bool> = LazyLock::new(crate::avatar::supports_truecolor_terminal);

const fn pick(truecolor: bool, rgb: Color, indexed: Color) -> Color {
    if truecolor { rgb } else { indexed }
}

/// Accent color for the search border and row backgrounds.
pub fn accent() -> Color {
    pick(*TRUECOLOR, ROW_BLUE, ROW_BLUE_256)
}

pub fn highlight() -> Color {
    pick(*TRUECOLOR, ROW_ORANGE, ROW_ORANGE_256)
}

/// Background style for a row tone.
pub fn row_style(tone: RowTone) -> Style {
    match tone {
        RowTone::Normal | RowTone::Collapsed => Style::default().bg(accent()).fg(Color::Black),
        RowTone::Highlighted => Style::default().bg(highlight()).fg(Color::Black),
    }
}

/// Style for the part of a label that matches the search term.
pub fn match_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}
