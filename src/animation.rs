//! Entrance animation tracking.
//!
//! The newest entry enters collapsed and expands to full height once. Each
//! entry moves through [`EntrancePhase`] one way:
//!
//! ```text
//! PendingEntrance --(first paint)--> Animating --(duration elapsed)--> Settled
//! ```
//!
//! Progress is keyed by [`EntryId`], so scrolling a row out of view and back
//! never replays or skips its entrance.

use std::collections::HashMap;

use crate::entry::EntryId;

/// Length of the expand-in transition.
pub const ENTRANCE_DURATION_MS: u64 = 300;

/// Quadratic ease-in-out over `t` in `[0, 1]`.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntrancePhase {
    /// Newest entry, not painted yet: renders collapsed.
    PendingEntrance,
    /// Transition running; `progress` is the eased fraction of full height.
    Animating { progress: f32 },
    /// Height is final; style follows highlight matching only.
    Settled,
}

impl EntrancePhase {
    /// Row height for this phase given the row's full height.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::suboptimal_flops
    )]
    pub fn height(self, full: u16) -> u16 {
        match self {
            Self::PendingEntrance => 0,
            Self::Animating { progress } => {
                ((f32::from(full) * progress).round() as u16).min(full)
            }
            Self::Settled => full,
        }
    }

    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Settled)
    }
}

#[derive(Debug, Clone)]
pub struct EntranceTracker {
    duration_ms: u64,
    pending: Option<EntryId>,
    running: HashMap<EntryId, u64>,
}

impl Default for EntranceTracker {
    fn default() -> Self {
        Self::new(ENTRANCE_DURATION_MS)
    }
}

impl EntranceTracker {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms: duration_ms.max(1),
            pending: None,
            running: HashMap::new(),
        }
    }

    /// Record `id` as the newest insertion.
    ///
    /// A previous entry that was still waiting for its first paint is no
    /// longer the newest one and settles without animating.
    pub fn mark_inserted(&mut self, id: EntryId) {
        self.pending = Some(id);
    }

    /// Start the transition for `id` if it is waiting for its first paint.
    ///
    /// Returns true when the transition started.
    pub fn mark_painted(&mut self, id: EntryId, now_ms: u64) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = None;
        self.running.insert(id, now_ms);
        tracing::trace!(id = id.get(), now_ms, "entrance started");
        true
    }

    /// Phase of `id` at `now_ms`.
    #[allow(clippy::cast_precision_loss)]
    pub fn phase(&self, id: EntryId, now_ms: u64) -> EntrancePhase {
        if self.pending == Some(id) {
            return EntrancePhase::PendingEntrance;
        }
        match self.running.get(&id) {
            Some(started) => {
                let elapsed = now_ms.saturating_sub(*started);
                if elapsed >= self.duration_ms {
                    EntrancePhase::Settled
                } else {
                    let t = elapsed as f32 / self.duration_ms as f32;
                    EntrancePhase::Animating {
                        progress: ease_in_out(t),
                    }
                }
            }
            None => EntrancePhase::Settled,
        }
    }

    /// Retire finished transitions. Returns true while any transition runs.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        let duration = self.duration_ms;
        self.running
            .retain(|_, started| now_ms.saturating_sub(*started) < duration);
        !self.running.is_empty()
    }

    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    pub const fn pending(&self) -> Option<EntryId> {
        self.pending
    }
}
