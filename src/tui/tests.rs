// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};

use super::{build_page, demo_transcript, layout_for, wrap_text, App, PaneLayout};
use crate::host::{HostPage, Scroller};
use crate::source::REBUILD_DEBOUNCE;

const LAYOUT: PaneLayout = PaneLayout { viewport_rows: 23, wrap_width: 60 };

fn demo_app(now: Instant) -> App {
    App::new(demo_transcript(), LAYOUT, false, now)
}

#[test]
fn layout_reserves_footer_and_gutter() {
    let layout = layout_for(120, 40);
    assert_eq!(layout.viewport_rows, 39);
    assert_eq!(layout.wrap_width, 120 - 36 - 2);
}

#[test]
fn wrap_text_respects_width_and_splits_long_words() {
    let lines = wrap_text("a few short words", 8);
    assert!(lines.iter().all(|l| l.chars().count() <= 8), "{lines:?}");

    let lines = wrap_text("antidisestablishment", 8);
    assert_eq!(lines[0], "antidise");

    assert_eq!(wrap_text("", 8), vec![String::new()]);
}

#[test]
fn build_page_sizes_blocks_from_wrapped_text() {
    let transcript = demo_transcript();
    let (page, scroller) = build_page(&transcript, LAYOUT, false);
    assert_eq!(scroller, Scroller::Root);
    let messages = page.messages();
    assert_eq!(messages.len(), transcript.len());
    let (node, _, text) = messages[0];
    let rect = page.rect(node).expect("attached");
    let expected = wrap_text(text, LAYOUT.wrap_width as usize).len() as f64 + 2.0;
    assert_eq!(rect.height, expected);
}

#[test]
fn app_starts_with_first_turn_active() {
    let app = demo_app(Instant::now());
    assert_eq!(app.tracker().active_index(), Some(0));
    assert_eq!(app.tracker().turns().len(), 6);
}

#[test]
fn digit_key_navigates_and_locks() {
    let base = Instant::now();
    let mut app = demo_app(base);
    app.handle_key(KeyEvent::from(KeyCode::Char('3')), base);
    assert_eq!(app.tracker().active_index(), Some(2));
    assert!(app.tracker().is_locked());
    assert_eq!(app.cursor(), 2);
}

#[test]
fn enter_navigates_to_the_cursor() {
    let base = Instant::now();
    let mut app = demo_app(base);
    app.handle_key(KeyEvent::from(KeyCode::Down), base);
    app.handle_key(KeyEvent::from(KeyCode::Down), base);
    assert_eq!(app.cursor(), 2);
    app.handle_key(KeyEvent::from(KeyCode::Enter), base);
    assert_eq!(app.tracker().active_index(), Some(2));
}

#[test]
fn scroll_keys_drive_the_estimator() {
    let base = Instant::now();
    let mut app = demo_app(base);
    app.handle_key(KeyEvent::from(KeyCode::Char('G')), base);
    app.advance(base + Duration::from_millis(16));
    // The glue must have applied the estimator's answer for the new offset.
    let expected = crate::track::estimate(app.page(), app.tracker().turns())
        .expect("geometry");
    assert_eq!(app.tracker().active_index(), expected);
    assert_ne!(app.tracker().active_index(), Some(0));
}

#[test]
fn append_rebuilds_after_the_debounce_window() {
    let base = Instant::now();
    let mut app = demo_app(base);
    let before = app.tracker().turns().len();

    app.handle_key(KeyEvent::from(KeyCode::Char('a')), base);
    app.advance(base + Duration::from_millis(16));
    assert_eq!(app.tracker().turns().len(), before, "rebuild ran before the quiet window");

    app.advance(base + REBUILD_DEBOUNCE + Duration::from_millis(16));
    assert_eq!(app.tracker().turns().len(), before + 1);
}

#[test]
fn resize_preserves_labels_and_scroll_offset() {
    let base = Instant::now();
    let mut app = demo_app(base);
    app.handle_key(KeyEvent::from(KeyCode::Char('j')), base);
    app.handle_key(KeyEvent::from(KeyCode::Char('j')), base);
    let offset = app.page().scroll_top(Scroller::Root);
    let labels: Vec<String> =
        app.tracker().turns().iter().map(|t| t.label().to_string()).collect();

    app.handle_resize(PaneLayout { viewport_rows: 30, wrap_width: 48 }, base);
    let after: Vec<String> =
        app.tracker().turns().iter().map(|t| t.label().to_string()).collect();
    assert_eq!(after, labels);
    assert_eq!(app.page().scroll_top(Scroller::Root), offset);
    assert_eq!(app.page().viewport_height(), 30.0);
}

#[test]
fn nested_mode_scrolls_the_region_not_the_root() {
    let base = Instant::now();
    let mut app = App::new(demo_transcript(), LAYOUT, true, base);
    assert_ne!(app.scroller, Scroller::Root);

    app.handle_key(KeyEvent::from(KeyCode::Char('G')), base);
    app.advance(base + Duration::from_millis(16));
    assert_eq!(app.page().scroll_top(Scroller::Root), 0.0);
    assert!(app.page().scroll_top(app.scroller) > 0.0);
    assert_ne!(app.tracker().active_index(), Some(0));
}

#[test]
fn quit_key_sets_the_flag() {
    let base = Instant::now();
    let mut app = demo_app(base);
    app.handle_key(KeyEvent::from(KeyCode::Char('q')), base);
    assert!(app.should_quit);
}
