// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. avatar::AvatarCache)
    clippy::module_name_repetitions
)]

//! # Robolist
//!
//! A terminal demo list with random entries and robot avatars.
//!
//! Robolist renders a scrolling list in the terminal with:
//! - Randomly generated entries, one new entry injected per tick
//! - Avatars fetched from an avatar service (Kitty, Sixel, half-block fallback)
//! - Debounced search highlighting
//! - A one-time expand-in animation for the newest entry
//!
//! ## Architecture
//!
//! Robolist uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`entry`]: Entry generation and the entry list
//! - [`timing`]: Debounce and interval timers
//! - [`animation`]: Entrance animation tracking
//! - [`avatar`]: Avatar fetching and caching
//! - [`ui`]: Terminal UI components

pub mod animation;
pub mod app;
pub mod avatar;
pub mod config;
pub mod entry;
pub mod perf;
pub mod timing;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, update};
    pub use crate::entry::{Entry, EntryId, EntryList};
    pub use crate::ui::viewport::Viewport;
}
