use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use image::{DynamicImage, Rgb, RgbImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui_image::picker::Picker;

use crate::avatar::{AvatarCache, AvatarError, AvatarResult, AvatarState};

use super::event_loop::{
    RESIZE_DEBOUNCE_MS, Timers, disable_input_modes, enable_input_modes,
};
use super::{App, Message, Model, ToastLevel, update};

const TICK_MS: u64 = 1000;
const WINDOW_MS: u64 = 200;

fn create_test_model() -> Model {
    Model::new(StdRng::seed_from_u64(42), (80, 24), 0)
}

fn create_long_test_model() -> Model {
    let mut model = create_test_model();
    for _ in 0..20 {
        model = update(model, Message::Tick { subsec_millis: 0 });
    }
    model
}

fn create_timers() -> Timers {
    Timers::new(TICK_MS, WINDOW_MS, 0)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn red_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([255, 0, 0])))
}

#[test]
fn test_new_model_starts_with_three_entries() {
    let model = create_test_model();
    let ordinals: Vec<_> = model.entries.entries().iter().map(|e| e.ordinal()).collect();
    assert_eq!(ordinals, vec![0, 1, 2]);
    assert_eq!(model.entries.last_inserted(), None);
    assert_eq!(model.entrance.pending(), None);
    assert_eq!(model.viewport.total(), 3);
}

#[test]
fn test_tick_inserts_and_marks_newest() {
    let model = create_test_model();
    let before: Vec<String> = model
        .entries
        .entries()
        .iter()
        .map(|e| e.text().to_string())
        .collect();

    let model = update(model, Message::Tick { subsec_millis: 123 });
    assert_eq!(model.entries.len(), 4);
    let marker = model.entries.last_inserted().unwrap();
    let index = model.entries.last_inserted_index().unwrap();
    assert_eq!(model.entries.get(index).unwrap().id(), marker);
    assert_eq!(model.entries.get(index).unwrap().ordinal(), 3);
    assert_eq!(model.entrance.pending(), Some(marker));
    assert_eq!(model.viewport.total(), 4);

    let survivors: Vec<String> = model
        .entries
        .entries()
        .iter()
        .filter(|e| e.id() != marker)
        .map(|e| e.text().to_string())
        .collect();
    assert_eq!(survivors, before);
}

#[test]
fn test_paused_tick_changes_nothing() {
    let mut model = create_test_model();
    model.paused = true;
    let model = update(model, Message::Tick { subsec_millis: 0 });
    assert_eq!(model.entries.len(), 3);
    assert_eq!(model.entries.last_inserted(), None);
}

#[test]
fn test_same_seed_gives_same_entries() {
    let a = update(create_test_model(), Message::Tick { subsec_millis: 7 });
    let b = update(create_test_model(), Message::Tick { subsec_millis: 7 });
    let texts = |m: &Model| -> Vec<String> {
        m.entries
            .entries()
            .iter()
            .map(|e| e.text().to_string())
            .collect()
    };
    assert_eq!(texts(&a), texts(&b));
}

#[test]
fn test_empty_search_highlights_nothing() {
    let model = create_test_model();
    let model = update(model, Message::SearchSettled(String::new()));
    assert_eq!(model.match_count(), 0);
    assert_eq!(model.highlighted().count(), 0);
}

#[test]
fn test_unique_term_highlights_one_entry_after_window() {
    let mut model = create_test_model();
    let mut timers = create_timers();
    let target = model.entries.entries()[1].clone();
    let term = target.text().to_string();

    // Type the term one character at a time, 30ms apart.
    let mut typed = String::new();
    let mut now = 0;
    for c in term.chars() {
        typed.push(c);
        App::dispatch(&mut model, Message::SearchInput(typed.clone()), &mut timers, now);
        App::fire_timers(&mut model, &mut timers, now);
        assert_eq!(model.debounced_search, "", "no intermediate value at {now}ms");
        now += 30;
    }
    let last_edit = now - 30;

    assert!(!App::fire_timers(&mut model, &mut timers, last_edit + WINDOW_MS - 1));
    assert_eq!(model.debounced_search, "");

    assert!(App::fire_timers(&mut model, &mut timers, last_edit + WINDOW_MS));
    assert_eq!(model.debounced_search, term);
    let highlighted: Vec<_> = model.highlighted().map(|e| e.id()).collect();
    assert_eq!(highlighted, vec![target.id()]);
}

#[test]
fn test_search_is_case_sensitive() {
    let model = create_test_model();
    let text = model.entries.entries()[0].text().to_string();
    let swapped: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect();
    let model = update(model, Message::SearchSettled(swapped.clone()));
    if swapped != text {
        assert!(model.highlighted().all(|e| e.text() != text));
    }
}

#[test]
fn test_clear_search_settles_to_empty() {
    let mut model = create_test_model();
    let mut timers = create_timers();
    App::dispatch(&mut model, Message::SearchInput(" 2".into()), &mut timers, 0);
    App::fire_timers(&mut model, &mut timers, WINDOW_MS);
    assert_eq!(model.match_count(), 1);

    App::dispatch(&mut model, Message::ClearSearch, &mut timers, 300);
    assert!(model.search.is_empty());
    assert_eq!(model.match_count(), 1, "highlight waits for the window");
    App::fire_timers(&mut model, &mut timers, 300 + WINDOW_MS);
    assert_eq!(model.match_count(), 0);
}

#[test]
fn test_ticker_inserts_once_per_period() {
    let mut model = create_test_model();
    let mut timers = create_timers();
    assert!(!App::fire_timers(&mut model, &mut timers, TICK_MS - 1));
    assert!(App::fire_timers(&mut model, &mut timers, TICK_MS));
    assert_eq!(model.entries.len(), 4);
    assert!(!App::fire_timers(&mut model, &mut timers, TICK_MS + 10));
    assert!(App::fire_timers(&mut model, &mut timers, 2 * TICK_MS));
    assert_eq!(model.entries.len(), 5);
}

#[test]
fn test_toggle_pause_stops_ticker() {
    let mut model = create_test_model();
    let mut timers = create_timers();
    App::dispatch(&mut model, Message::TogglePause, &mut timers, 10);
    assert!(model.paused);
    assert!(timers.ticker.is_paused());
    assert_eq!(model.active_toast(), Some(("Insertion paused", ToastLevel::Info)));

    App::fire_timers(&mut model, &mut timers, 5 * TICK_MS);
    assert_eq!(model.entries.len(), 3);

    App::dispatch(&mut model, Message::TogglePause, &mut timers, 5 * TICK_MS);
    assert!(!model.paused);
    assert!(!App::fire_timers(&mut model, &mut timers, 5 * TICK_MS + 1));
    assert!(App::fire_timers(&mut model, &mut timers, 6 * TICK_MS));
    assert_eq!(model.entries.len(), 4);
}

#[test]
fn test_quit_cancels_timers() {
    let mut model = create_test_model();
    let mut timers = create_timers();
    App::dispatch(&mut model, Message::SearchInput("a".into()), &mut timers, 0);
    assert!(timers.search.is_pending());

    App::dispatch(&mut model, Message::Quit, &mut timers, 10);
    assert!(model.should_quit);
    assert!(!timers.search.is_pending());
    assert_eq!(timers.next_wake(10), None);
    assert!(!App::fire_timers(&mut model, &mut timers, 10 * TICK_MS));
    assert_eq!(model.entries.len(), 3);
}

#[test]
fn test_toast_expires() {
    let model = update(create_test_model(), Message::TogglePause);
    let mut model = model;
    assert!(model.active_toast().is_some());
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(3)));
    assert!(model.active_toast().is_none());
}

#[test]
fn test_scroll_messages_move_viewport() {
    let model = create_long_test_model();
    let model = update(model, Message::ScrollDown(5));
    assert_eq!(model.viewport.offset(), 5);
    let model = update(model, Message::ScrollUp(3));
    assert_eq!(model.viewport.offset(), 2);
    let model = update(model, Message::GoToBottom);
    assert!(!model.viewport.can_scroll_down());
    let model = update(model, Message::GoToTop);
    assert_eq!(model.viewport.offset(), 0);
    let model = update(model, Message::PageDown);
    assert_eq!(model.viewport.offset(), model.viewport.page_size());
    let model = update(model, Message::PageUp);
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_resize_updates_list_height() {
    let model = update(create_test_model(), Message::Resize(100, 50));
    assert_eq!(model.viewport.width(), 100);
    assert_eq!(model.viewport.height(), crate::ui::list_height(50));
}

#[test]
fn test_resize_event_is_debounced() {
    let mut model = create_test_model();
    let mut timers = create_timers();
    let msg = App::handle_event(&Event::Resize(120, 40), &model, 0, &mut timers);
    assert_eq!(msg, None);
    App::handle_event(&Event::Resize(100, 30), &model, 50, &mut timers);

    App::fire_timers(&mut model, &mut timers, 100);
    assert_eq!(model.viewport.width(), 80);
    App::fire_timers(&mut model, &mut timers, 50 + RESIZE_DEBOUNCE_MS);
    assert_eq!(model.viewport.width(), 100);
    assert_eq!(model.viewport.height(), crate::ui::list_height(30));
}

#[test]
fn test_help_toggle() {
    let model = update(create_test_model(), Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_typing_edits_search() {
    let mut model = create_test_model();
    assert_eq!(
        App::handle_key(key(KeyCode::Char('a')), &model),
        Some(Message::SearchInput("a".into()))
    );
    model.search = "ab".into();
    assert_eq!(
        App::handle_key(key(KeyCode::Char('C')), &model),
        Some(Message::SearchInput("abC".into()))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Backspace), &model),
        Some(Message::SearchInput("a".into()))
    );
    assert_eq!(App::handle_key(ctrl('u'), &model), Some(Message::ClearSearch));
}

#[test]
fn test_backspace_on_empty_search_does_nothing() {
    let model = create_test_model();
    assert_eq!(App::handle_key(key(KeyCode::Backspace), &model), None);
}

#[test]
fn test_escape_clears_then_quits() {
    let mut model = create_test_model();
    model.search = "x".into();
    assert_eq!(App::handle_key(key(KeyCode::Esc), &model), Some(Message::ClearSearch));
    model.search.clear();
    assert_eq!(App::handle_key(key(KeyCode::Esc), &model), Some(Message::Quit));
}

#[test]
fn test_control_keys() {
    let model = create_test_model();
    assert_eq!(App::handle_key(ctrl('c'), &model), Some(Message::Quit));
    assert_eq!(App::handle_key(ctrl('p'), &model), Some(Message::TogglePause));
    assert_eq!(App::handle_key(ctrl('x'), &model), None);
    assert_eq!(App::handle_key(key(KeyCode::F(1)), &model), Some(Message::ToggleHelp));
}

#[test]
fn test_navigation_keys() {
    let model = create_test_model();
    assert_eq!(App::handle_key(key(KeyCode::Up), &model), Some(Message::ScrollUp(1)));
    assert_eq!(App::handle_key(key(KeyCode::Down), &model), Some(Message::ScrollDown(1)));
    assert_eq!(App::handle_key(key(KeyCode::PageUp), &model), Some(Message::PageUp));
    assert_eq!(App::handle_key(key(KeyCode::PageDown), &model), Some(Message::PageDown));
    assert_eq!(App::handle_key(key(KeyCode::Home), &model), Some(Message::GoToTop));
    assert_eq!(App::handle_key(key(KeyCode::End), &model), Some(Message::GoToBottom));
}

#[test]
fn test_help_overlay_captures_keys() {
    let mut model = create_test_model();
    model.help_visible = true;
    assert_eq!(App::handle_key(key(KeyCode::Char('a')), &model), None);
    assert_eq!(App::handle_key(key(KeyCode::Esc), &model), Some(Message::HideHelp));
    assert_eq!(App::handle_key(ctrl('c'), &model), Some(Message::Quit));
}

#[test]
fn test_key_release_is_ignored() {
    let model = create_test_model();
    let mut timers = create_timers();
    let release = KeyEvent::new_with_kind(
        KeyCode::Char('a'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    assert_eq!(App::handle_event(&Event::Key(release), &model, 0, &mut timers), None);
}

#[test]
fn test_paste_appends_to_search() {
    let mut model = create_test_model();
    let mut timers = create_timers();
    model.search = "ab".into();
    let msg = App::handle_event(&Event::Paste("cd\n".into()), &model, 0, &mut timers);
    assert_eq!(msg, Some(Message::SearchInput("abcd".into())));
}

#[test]
fn test_terminal_modes_toggle_bracketed_paste_with_mouse_capture() {
    let mut enabled = Vec::new();
    enable_input_modes(&mut enabled).unwrap();
    let enabled = String::from_utf8(enabled).unwrap();
    assert!(enabled.contains("\x1b[?2004h"), "wrote {enabled:?}");
    assert!(enabled.contains("\x1b[?1000h"), "wrote {enabled:?}");

    let mut disabled = Vec::new();
    disable_input_modes(&mut disabled).unwrap();
    let disabled = String::from_utf8(disabled).unwrap();
    assert!(disabled.contains("\x1b[?2004l"), "wrote {disabled:?}");
    assert!(disabled.contains("\x1b[?1000l"), "wrote {disabled:?}");
}

#[test]
fn test_mouse_wheel_scrolls() {
    let model = create_test_model();
    let wheel = |kind| MouseEvent {
        kind,
        column: 10,
        row: 10,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(
        App::handle_mouse(wheel(MouseEventKind::ScrollDown), &model),
        Some(Message::ScrollDown(1))
    );
    assert_eq!(
        App::handle_mouse(wheel(MouseEventKind::ScrollUp), &model),
        Some(Message::ScrollUp(1))
    );
    assert_eq!(App::handle_mouse(wheel(MouseEventKind::Moved), &model), None);
}

#[test]
fn test_avatars_requested_once_per_visible_entry() {
    let mut model = create_test_model().with_picker(Some(Picker::halfblocks()));
    let keys = model.avatars_to_request();
    assert_eq!(keys.len(), 3);
    for key in &keys {
        assert_eq!(model.avatar_state(key), Some(AvatarState::Loading));
    }
    assert!(model.avatars_to_request().is_empty());
}

#[test]
fn test_no_avatar_requests_without_picker_or_images() {
    let mut model = create_test_model();
    assert!(model.avatars_to_request().is_empty());

    let mut model = create_test_model().with_picker(Some(Picker::halfblocks()));
    model.images_enabled = false;
    assert!(model.avatars_to_request().is_empty());
}

#[test]
fn test_no_avatar_requests_while_resizing() {
    let mut model = create_test_model().with_picker(Some(Picker::halfblocks()));
    model.set_resize_pending(true);
    assert!(model.avatars_to_request().is_empty());
    model.set_resize_pending(false);
    assert_eq!(model.avatars_to_request().len(), 3);
}

#[test]
fn test_failed_avatar_is_not_retried() {
    let mut model = create_test_model().with_picker(Some(Picker::halfblocks()));
    let keys = model.avatars_to_request();
    model.accept_avatar(AvatarResult {
        key: keys[0].clone(),
        outcome: Err(AvatarError::EmptyBody),
    });
    assert_eq!(model.avatar_state(&keys[0]), Some(AvatarState::Failed));
    assert!(model.avatars_to_request().is_empty());
}

#[test]
fn test_accepted_avatar_builds_protocol() {
    let mut model = create_test_model().with_picker(Some(Picker::halfblocks()));
    let keys = model.avatars_to_request();
    model.accept_avatar(AvatarResult {
        key: keys[1].clone(),
        outcome: Ok(red_image()),
    });
    assert_eq!(model.avatar_state(&keys[1]), Some(AvatarState::Ready));
    assert!(model.avatars.contains(&keys[1]));
    assert_eq!(model.avatars.len(), 1);
}

#[test]
fn test_evicted_avatar_can_be_requested_again() {
    let mut model = create_test_model().with_picker(Some(Picker::halfblocks()));
    model.avatars = AvatarCache::new(1);
    let keys = model.avatars_to_request();
    for key in &keys[..2] {
        model.accept_avatar(AvatarResult {
            key: key.clone(),
            outcome: Ok(red_image()),
        });
    }
    assert!(!model.avatars.contains(&keys[0]));
    assert_eq!(model.avatar_state(&keys[0]), None);
    assert_eq!(model.avatars_to_request(), vec![keys[0].clone()]);
}
