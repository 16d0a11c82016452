use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use crate::animation::EntranceTracker;
use crate::avatar::{AvatarCache, AvatarResult, AvatarState};
use crate::entry::{Entry, EntryList};
use crate::ui::viewport::Viewport;

/// Maximum number of decoded avatars kept alive at once.
pub const AVATAR_CACHE_CAPACITY: usize = 256;

/// Entries beyond the visible window whose avatars are fetched ahead of time.
const AVATAR_LOOKAHEAD: usize = 4;

const TOAST_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The entry list and its last-inserted marker
    pub entries: EntryList,
    /// Live search text, updated on every keystroke
    pub search: String,
    /// Search text after the quiescence window; drives highlighting
    pub debounced_search: String,
    /// Entrance animation progress per entry
    pub entrance: EntranceTracker,
    /// Viewport over the entry list
    pub viewport: Viewport,
    /// Whether periodic insertion is paused
    pub paused: bool,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether avatars are fetched and drawn
    pub images_enabled: bool,
    /// Image picker for terminal rendering
    pub picker: Option<Picker>,
    /// Avatar protocols keyed by entry text
    pub avatars: AvatarCache<StatefulProtocol>,
    avatar_states: HashMap<String, AvatarState>,
    toast: Option<Toast>,
    pub(super) rng: StdRng,
    resize_pending: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("entries", &self.entries.len())
            .field("search", &self.search)
            .field("debounced_search", &self.debounced_search)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model with a freshly initialised entry list.
    pub fn new(mut rng: StdRng, terminal_size: (u16, u16), millis: u32) -> Self {
        let entries = EntryList::initialize(&mut rng, millis);
        let list_height = crate::ui::list_height(terminal_size.1);
        Self {
            viewport: Viewport::new(terminal_size.0, list_height, entries.len()),
            entries,
            rng,
            ..Self::default()
        }
    }

    /// Set the image picker.
    #[must_use]
    pub fn with_picker(mut self, picker: Option<Picker>) -> Self {
        self.picker = picker;
        self
    }

    /// Number of entries highlighted by the debounced search.
    pub fn match_count(&self) -> usize {
        self.entries.matching(&self.debounced_search).count()
    }

    /// Entries highlighted by the debounced search.
    pub fn highlighted(&self) -> impl Iterator<Item = &Entry> {
        self.entries.matching(&self.debounced_search)
    }

    pub fn avatar_state(&self, key: &str) -> Option<AvatarState> {
        self.avatar_states.get(key).copied()
    }

    /// Keys of visible (or nearly visible) entries that still need an avatar.
    ///
    /// Returned keys are marked as loading, so each is handed out once until
    /// its avatar is evicted from the cache.
    pub fn avatars_to_request(&mut self) -> Vec<String> {
        if !self.images_enabled || self.picker.is_none() || self.resize_pending {
            return Vec::new();
        }
        let range = self.viewport.visible_range();
        let end = (range.end + AVATAR_LOOKAHEAD).min(self.entries.len());
        let mut keys = Vec::new();
        for entry in &self.entries.entries()[range.start..end] {
            let key = entry.text();
            if self.avatar_states.contains_key(key) || keys.iter().any(|k| k == key) {
                continue;
            }
            keys.push(key.to_string());
        }
        for key in &keys {
            self.avatar_states.insert(key.clone(), AvatarState::Loading);
        }
        keys
    }

    /// Store a finished avatar fetch.
    pub fn accept_avatar(&mut self, result: AvatarResult) {
        let AvatarResult { key, outcome } = result;
        match outcome {
            Ok(image) => {
                let Some(picker) = &self.picker else {
                    self.avatar_states.remove(&key);
                    return;
                };
                let protocol = picker.new_resize_protocol(image);
                for evicted in self.avatars.insert(key.clone(), protocol) {
                    self.avatar_states.remove(&evicted);
                }
                self.avatar_states.insert(key, AvatarState::Ready);
            }
            Err(err) => {
                tracing::debug!(%key, %err, "avatar unavailable");
                self.avatar_states.insert(key, AvatarState::Failed);
            }
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    pub(super) const fn set_resize_pending(&mut self, pending: bool) {
        self.resize_pending = pending;
    }
}

impl Default for Model {
    fn default() -> Self {
        Self {
            entries: EntryList::default(),
            search: String::new(),
            debounced_search: String::new(),
            entrance: EntranceTracker::default(),
            viewport: Viewport::new(80, 20, 0),
            paused: false,
            help_visible: false,
            should_quit: false,
            images_enabled: true,
            picker: None,
            avatars: AvatarCache::new(AVATAR_CACHE_CAPACITY),
            avatar_states: HashMap::new(),
            toast: None,
            rng: StdRng::seed_from_u64(0),
            resize_pending: false,
        }
    }
}
