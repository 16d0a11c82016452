//! Timers driven by the event loop clock.
//!
//! Nothing here sleeps or spawns. Every operation takes the current time as
//! a millisecond timestamp, so the event loop stays single-threaded and the
//! timers can be tested with plain numbers.

/// A cancellable delayed value.
///
/// Queueing a value replaces (cancels) any value still waiting; the value is
/// released by [`Debouncer::take_ready`] once `delay_ms` has passed without
/// another queue.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debouncer<T> {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Schedule `value`, restarting the quiescence window.
    pub fn queue(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms));
    }

    /// Release the pending value if it has been stable for the full window.
    pub fn take_ready(&mut self, now_ms: u64) -> Option<T> {
        let (_, queued_at) = self.pending.as_ref()?;
        if now_ms.saturating_sub(*queued_at) >= self.delay_ms {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Milliseconds until the pending value is released.
    pub fn due_in(&self, now_ms: u64) -> Option<u64> {
        let (_, queued_at) = self.pending.as_ref()?;
        Some((queued_at + self.delay_ms).saturating_sub(now_ms))
    }
}

/// Debounce a timestamped stream of values.
///
/// Each input value is emitted at `t + window_ms` unless a newer value
/// arrives before that instant. Rapid edits inside the window produce no
/// intermediate output, and an output never precedes its input.
pub fn debounce<T: Clone>(events: &[(u64, T)], window_ms: u64) -> Vec<(u64, T)> {
    let mut out = Vec::new();
    let mut debouncer = Debouncer::new(window_ms);
    for (at, value) in events {
        if let Some(settled) = flush_before(&mut debouncer, *at) {
            out.push(settled);
        }
        debouncer.queue(value.clone(), *at);
    }
    if let Some((value, queued_at)) = debouncer.pending.take() {
        out.push((queued_at + window_ms, value));
    }
    out
}

fn flush_before<T>(debouncer: &mut Debouncer<T>, now_ms: u64) -> Option<(u64, T)> {
    let (_, queued_at) = debouncer.pending.as_ref()?;
    let fire_at = queued_at + debouncer.delay_ms;
    debouncer
        .take_ready(now_ms)
        .map(|value| (fire_at, value))
}

/// A fixed-period recurring timer.
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: u64,
    next_due_ms: u64,
    paused: bool,
}

impl Interval {
    /// Create a timer whose first firing is one period after `now_ms`.
    pub const fn new(period_ms: u64, now_ms: u64) -> Self {
        let period_ms = if period_ms == 0 { 1 } else { period_ms };
        Self {
            period_ms,
            next_due_ms: now_ms + period_ms,
            paused: false,
        }
    }

    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Returns true when the timer fires at `now_ms`.
    ///
    /// Fires at most once per call. A loop that fell more than a period
    /// behind resynchronises instead of firing a burst.
    pub const fn poll(&mut self, now_ms: u64) -> bool {
        if self.paused || now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms += self.period_ms;
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms + self.period_ms;
        }
        true
    }

    /// Pause or resume. Resuming schedules the next firing a full period out.
    pub const fn set_paused(&mut self, paused: bool, now_ms: u64) {
        if self.paused && !paused {
            self.next_due_ms = now_ms + self.period_ms;
        }
        self.paused = paused;
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Milliseconds until the next firing, or `None` while paused.
    pub const fn due_in(&self, now_ms: u64) -> Option<u64> {
        if self.paused {
            None
        } else {
            Some(self.next_due_ms.saturating_sub(now_ms))
        }
    }
}
