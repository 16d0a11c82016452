//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position over the entry list
//! - [`rows`]: Entry row layout, appearance and drawing
//! - [`style`]: Theming and colors

pub mod rows;
pub mod style;
pub mod viewport;

mod overlays;
mod render;
mod status;

pub use render::render;

/// Rows taken by the search input (border + text + border).
pub const SEARCH_BAR_HEIGHT: u16 = 3;
/// Rows taken by the status bar.
pub const STATUS_BAR_HEIGHT: u16 = 1;
/// Full height of one entry row (border + 3 content rows + border).
pub const ROW_HEIGHT: u16 = 5;
/// Blank rows between entries.
pub const ROW_GAP: u16 = 1;
/// Terminal rows one settled entry occupies, gap included.
pub const ROW_STRIDE: u16 = ROW_HEIGHT + ROW_GAP;
/// Columns reserved for the avatar inside a row.
pub const AVATAR_WIDTH: u16 = 6;

/// Height of the entry list area for a terminal of `terminal_height` rows.
pub const fn list_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(SEARCH_BAR_HEIGHT + STATUS_BAR_HEIGHT)
}
