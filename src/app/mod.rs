//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{AVATAR_CACHE_CAPACITY, Model, ToastLevel};
pub use update::{Message, update};

use crate::avatar::DEFAULT_AVATAR_BASE_URL;
use crate::config::{DEFAULT_DEBOUNCE_MS, DEFAULT_TICK_MS};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    tick_ms: u64,
    debounce_ms: u64,
    avatar_base_url: String,
    images_enabled: bool,
    force_half_cell: bool,
    start_paused: bool,
    seed: Option<u64>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an application with the default timings.
    pub fn new() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            avatar_base_url: DEFAULT_AVATAR_BASE_URL.to_string(),
            images_enabled: true,
            force_half_cell: false,
            start_paused: false,
            seed: None,
        }
    }

    /// Set the insertion period.
    pub fn with_tick_ms(mut self, ms: u64) -> Self {
        self.tick_ms = ms.max(1);
        self
    }

    /// Set the search debounce window.
    pub const fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the avatar service base URL.
    pub fn with_avatar_base_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_base_url = url.into();
        self
    }

    /// Enable or disable avatar fetching and rendering.
    pub const fn with_images_enabled(mut self, enabled: bool) -> Self {
        self.images_enabled = enabled;
        self
    }

    /// Force half-block avatar rendering, skipping protocol detection.
    pub const fn with_force_half_cell(mut self, force: bool) -> Self {
        self.force_half_cell = force;
        self
    }

    /// Start with periodic insertion paused.
    pub const fn with_paused(mut self, paused: bool) -> Self {
        self.start_paused = paused;
        self
    }

    /// Seed the entry generator for a reproducible run.
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests;
