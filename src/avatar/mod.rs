//! Avatar fetching, caching and terminal rendering setup.
//!
//! Avatars are keyed by entry text and fetched from an avatar service,
//! `https://robohash.org/<entry-text>` by default. Rendering supports the
//! terminal graphics protocols detected by `ratatui-image`:
//! - Kitty graphics protocol
//! - Sixel
//! - iTerm2
//! - Unicode half-blocks (fallback)

mod cache;
mod fetch;
mod loader;

pub use cache::AvatarCache;
pub use fetch::{AVATAR_THUMBNAIL_PX, AvatarError, AvatarFetcher, HttpFetcher};
pub use loader::{AvatarLoader, AvatarResult};

#[cfg(unix)]
use std::time::Duration;

use ratatui_image::picker::Picker;
#[cfg(unix)]
use ratatui_image::picker::cap_parser::QueryStdioOptions;

/// Avatar service used when none is configured.
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://robohash.org";

#[cfg(unix)]
const PICKER_QUERY_TIMEOUT_MS: u64 = 250;

/// Load state of one avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarState {
    Loading,
    Ready,
    /// The fetch failed. Failed avatars are not retried.
    Failed,
}

/// URL of the avatar for `key`.
///
/// The key is appended raw. The entry alphabet is URL-safe; the space before
/// the ordinal is percent-encoded by the URL parser when the request is built.
pub fn avatar_url(base_url: &str, key: &str) -> String {
    format!("{}/{key}", base_url.trim_end_matches('/'))
}

/// Create a picker for terminal image rendering.
///
/// The picker detects terminal capabilities and chooses the best protocol.
pub fn create_picker(force_half_cell: bool) -> Option<Picker> {
    if force_half_cell {
        tracing::debug!("force_half_cell=true protocol=Halfblocks");
        return Some(Picker::halfblocks());
    }

    // On Windows, skip the stdio capability query: it can leave orphaned reader
    // threads on the console input buffer.
    #[cfg(not(unix))]
    {
        tracing::debug!("windows fallback protocol=Halfblocks");
        return Some(Picker::halfblocks());
    }

    #[cfg(unix)]
    {
        let picker = Picker::from_query_stdio_with_options(query_options()).ok()?;
        tracing::debug!(
            term = %std::env::var("TERM").unwrap_or_else(|_| "<unset>".to_string()),
            protocol = ?picker.protocol_type(),
            "picker created"
        );
        Some(picker)
    }
}

/// Whether terminal output should be treated as truecolor-capable.
pub fn supports_truecolor_terminal() -> bool {
    if let Ok(force) = std::env::var("ROBOLIST_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    if std::env::var("TERM_PROGRAM")
        .ok()
        .as_deref()
        .is_some_and(|v| v == "Apple_Terminal")
    {
        return false;
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

#[cfg(unix)]
fn query_options() -> QueryStdioOptions {
    let mut options = QueryStdioOptions::default();
    options.timeout = Duration::from_millis(PICKER_QUERY_TIMEOUT_MS);
    options
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    let has = |value: Option<&str>, needles: &[&str]| {
        value.is_some_and(|v| {
            let lower = v.to_ascii_lowercase();
            needles.iter().any(|n| lower.contains(n))
        })
    };
    has(colorterm, &["truecolor", "24bit"]) || has(term, &["direct", "truecolor"])
}
