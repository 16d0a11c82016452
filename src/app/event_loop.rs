use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, ToastLevel};
use crate::avatar::{AvatarLoader, HttpFetcher};
use crate::timing::{Debouncer, Interval};

/// Quiet period after the last terminal resize before re-layout.
pub(super) const RESIZE_DEBOUNCE_MS: u64 = 100;
/// Redraw cadence while an entrance transition runs.
const FRAME_MS: u64 = 16;
/// Longest idle poll.
const IDLE_POLL_MS: u64 = 250;

/// Timers owned by the event loop.
#[derive(Debug)]
pub(super) struct Timers {
    pub(super) ticker: Interval,
    pub(super) search: Debouncer<String>,
    pub(super) resize: Debouncer<(u16, u16)>,
}

impl Timers {
    pub(super) const fn new(tick_ms: u64, debounce_ms: u64, now_ms: u64) -> Self {
        Self {
            ticker: Interval::new(tick_ms, now_ms),
            search: Debouncer::new(debounce_ms),
            resize: Debouncer::new(RESIZE_DEBOUNCE_MS),
        }
    }

    /// Milliseconds until the earliest timer is due.
    pub(super) fn next_wake(&self, now_ms: u64) -> Option<u64> {
        [
            self.ticker.due_in(now_ms),
            self.search.due_in(now_ms),
            self.resize.due_in(now_ms),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Stop every timer; nothing fires afterwards.
    pub(super) fn cancel_all(&mut self, now_ms: u64) {
        self.ticker.set_paused(true, now_ms);
        self.search.cancel();
        self.resize.cancel();
    }
}

/// Mouse wheel and bracketed paste are both needed by `App::handle_event`.
pub(super) fn enable_input_modes(out: &mut impl Write) -> std::io::Result<()> {
    execute!(out, EnableMouseCapture, EnableBracketedPaste)
}

pub(super) fn disable_input_modes(out: &mut impl Write) -> std::io::Result<()> {
    execute!(out, DisableBracketedPaste, DisableMouseCapture)
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        // Create image picker BEFORE initializing terminal (queries stdio)
        let picker = if self.images_enabled {
            let _picker_scope = crate::perf::scope("app.create_picker");
            crate::avatar::create_picker(self.force_half_cell)
        } else {
            None
        };

        let mut toast = None;
        let mut loader = if picker.is_some() {
            match HttpFetcher::new()
                .map_err(anyhow::Error::from)
                .and_then(|fetcher| {
                    AvatarLoader::spawn(fetcher, self.avatar_base_url.clone())
                        .map_err(anyhow::Error::from)
                }) {
                Ok(loader) => Some(loader),
                Err(err) => {
                    tracing::warn!(%err, "avatar loader unavailable");
                    toast = Some(format!("Avatars unavailable: {err}"));
                    None
                }
            }
        } else {
            None
        };

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; robolist requires an interactive terminal")?;
        let size = terminal.size()?;

        let rng = self
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut model = Model::new(
            rng,
            (size.width, size.height),
            crate::entry::subsec_millis(),
        )
        .with_picker(picker);
        model.images_enabled = self.images_enabled && loader.is_some();
        model.paused = self.start_paused;
        if let Some(message) = toast {
            model.show_toast(ToastLevel::Warning, message);
        }
        tracing::info!(
            width = size.width,
            height = size.height,
            entries = model.entries.len(),
            images = model.images_enabled,
            "robolist started"
        );

        let result = enable_input_modes(&mut stdout())
            .context("Failed to enable mouse capture and bracketed paste")
            .and_then(|()| self.event_loop(&mut terminal, &mut model, loader.as_ref()));

        // Restore terminal
        let _ = disable_input_modes(&mut stdout());
        ratatui::restore();
        if let Some(loader) = loader.as_mut() {
            loader.shutdown();
        }

        result
    }

    fn event_loop(
        &self,
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        loader: Option<&AvatarLoader>,
    ) -> Result<()> {
        let start = Instant::now();
        let elapsed_ms = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut timers = Timers::new(self.tick_ms, self.debounce_ms, 0);
        timers.ticker.set_paused(model.paused, 0);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            let now_ms = elapsed_ms();

            if Self::fire_timers(model, &mut timers, now_ms) {
                needs_render = true;
            }

            if let Some(loader) = loader {
                let results = loader.drain();
                if !results.is_empty() {
                    needs_render = true;
                }
                for result in results {
                    model.accept_avatar(result);
                }
                for key in model.avatars_to_request() {
                    if !loader.request(&key) {
                        tracing::warn!(%key, "avatar loader stopped");
                    }
                }
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }
            let animating = model.entrance.advance(now_ms);
            if animating {
                needs_render = true;
            }

            let poll_ms = if animating {
                FRAME_MS
            } else if needs_render {
                0
            } else {
                timers
                    .next_wake(now_ms)
                    .map_or(IDLE_POLL_MS, |due| due.min(IDLE_POLL_MS))
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after poll wait so debouncers use accurate times.
                let event_ms = elapsed_ms();
                if let Some(msg) = Self::handle_event(&event::read()?, model, event_ms, &mut timers)
                {
                    Self::dispatch(model, msg, &mut timers, event_ms);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::ZERO)? {
                    let drain_ms = elapsed_ms();
                    if let Some(msg) =
                        Self::handle_event(&event::read()?, model, drain_ms, &mut timers)
                    {
                        drained += 1;
                        Self::dispatch(model, msg, &mut timers, drain_ms);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    tracing::trace!(frame = frame_idx, drained, "coalesced input burst");
                }
                model.set_resize_pending(timers.resize.is_pending());
            }

            if model.should_quit {
                break;
            }

            if needs_render {
                frame_idx += 1;
                let draw_ms = elapsed_ms();
                terminal.draw(|frame| crate::ui::render(model, frame, draw_ms))?;
                needs_render = false;
            }
        }
        tracing::info!(frames = frame_idx, "robolist stopped");
        Ok(())
    }
}
