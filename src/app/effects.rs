use crate::app::{App, Message, Model, update};

use super::event_loop::Timers;

impl App {
    /// Apply `msg` to the model, then run its side effects.
    pub(super) fn dispatch(model: &mut Model, msg: Message, timers: &mut Timers, now_ms: u64) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, timers, &side_msg, now_ms);
    }

    /// Fire every timer due at `now_ms`. Returns true when any fired.
    pub(super) fn fire_timers(model: &mut Model, timers: &mut Timers, now_ms: u64) -> bool {
        let mut fired = false;
        if timers.ticker.poll(now_ms) {
            let subsec_millis = crate::entry::subsec_millis();
            Self::dispatch(model, Message::Tick { subsec_millis }, timers, now_ms);
            fired = true;
        }
        if let Some(term) = timers.search.take_ready(now_ms) {
            Self::dispatch(model, Message::SearchSettled(term), timers, now_ms);
            fired = true;
        }
        if let Some((width, height)) = timers.resize.take_ready(now_ms) {
            Self::dispatch(model, Message::Resize(width, height), timers, now_ms);
            fired = true;
        }
        model.set_resize_pending(timers.resize.is_pending());
        fired
    }

    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        timers: &mut Timers,
        msg: &Message,
        now_ms: u64,
    ) {
        match msg {
            Message::Tick { .. } => {
                if let (Some(entry), Some(index)) = (
                    model.entries.last_inserted_entry(),
                    model.entries.last_inserted_index(),
                ) && !model.paused
                {
                    tracing::debug!(text = entry.text(), index, len = model.entries.len(), "tick");
                }
            }
            Message::TogglePause => {
                timers.ticker.set_paused(model.paused, now_ms);
            }
            // Every edit restarts the quiescence window.
            Message::SearchInput(_) | Message::ClearSearch => {
                timers.search.queue(model.search.clone(), now_ms);
            }
            Message::SearchSettled(term) => {
                tracing::debug!(term = %term, matches = model.match_count(), "search settled");
            }
            Message::Quit => {
                timers.cancel_all(now_ms);
            }
            _ => {}
        }
    }
}
