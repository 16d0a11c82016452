//! Lightweight performance instrumentation.
//!
//! [`scope`] returns a guard that reports its lifetime through `tracing`
//! when timing is enabled with `--perf`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Log target perf reports are emitted under.
pub const TARGET: &str = "robolist::perf";

static ENABLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Scope {
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        tracing::info!(target: TARGET, scope = self.name, elapsed_ms = self.elapsed_ms());
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}
