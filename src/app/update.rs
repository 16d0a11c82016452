use crate::app::{Model, ToastLevel};

/// All possible events and actions in the application.
///
/// These represent user input, timer events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Entries
    /// Insertion timer fired; carries the clock's sub-second milliseconds
    Tick { subsec_millis: u32 },
    /// Pause or resume periodic insertion
    TogglePause,

    // Search
    /// Live search text changed
    SearchInput(String),
    /// Live search text has been stable for the debounce window
    SearchSettled(String),
    /// Clear the live search text
    ClearSearch,

    // Navigation
    /// Scroll up by n entries
    ScrollUp(usize),
    /// Scroll down by n entries
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Go to the first entry
    GoToTop,
    /// Go to the last entry
    GoToBottom,

    // Overlays
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Timers, avatar fetches and other side effects are driven by the
/// event loop after the update.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Entries
        Message::Tick { subsec_millis } => {
            if !model.paused {
                let insertion = model.entries.tick(&mut model.rng, subsec_millis);
                model.entrance.mark_inserted(insertion.id);
                model.viewport.set_total(model.entries.len());
            }
        }
        Message::TogglePause => {
            model.paused = !model.paused;
            if model.paused {
                model.show_toast(ToastLevel::Info, "Insertion paused");
            } else {
                model.show_toast(ToastLevel::Info, "Insertion resumed");
            }
        }

        // Search
        Message::SearchInput(text) => {
            model.search = text;
        }
        Message::SearchSettled(text) => {
            model.debounced_search = text;
        }
        Message::ClearSearch => {
            model.search.clear();
        }

        // Navigation
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        // Overlays
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model
                .viewport
                .resize(width, crate::ui::list_height(height));
        }
        Message::Redraw => {}

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}
