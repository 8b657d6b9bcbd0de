//! Input handling: maps key/mouse events to state mutations.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::clipboard::{self, COPIED_NOTICE_MS};
use super::state::{ActiveView, AppState};
use crate::config::Action;
use crate::ui::layout::point_in_rect;
use crate::ui::page_view::{Hit, Hotspot};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key, now),
        ActiveView::Help => handle_help_key(state, key),
    }
}

fn handle_page_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let delta = state.config.tuning.wheel_delta;
    match action {
        Action::ScrollDown => {
            state.page.on_wheel(delta, now);
        }
        Action::ScrollUp => {
            state.page.on_wheel(-delta, now);
        }
        Action::NextSection => {
            if let Some(next) = state.page.active().next() {
                state.page.scroll_to_section(next);
            }
        }
        Action::PrevSection => {
            if let Some(prev) = state.page.active().prev() {
                state.page.scroll_to_section(prev);
            }
        }
        Action::ToggleLanguage => {
            state.language.toggle();
        }
        Action::CopyEmail => copy_email(state, now),
        Action::ToggleWorks => state.page.toggle_works_expanded(),
        Action::Help => state.active_view = ActiveView::Help,
        Action::Quit => state.should_quit = true,
    }
}

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    let closes = matches!(key.code, KeyCode::Esc | KeyCode::Enter)
        || matches!(
            state.config.match_key(key),
            Some(Action::Help) | Some(Action::Quit)
        );
    if closes {
        state.active_view = ActiveView::Page;
    }
}

/// Process a mouse event: wheel scrolls the page, left click hits the
/// hotspots recorded by the last draw.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.active_view == ActiveView::Help {
        if let MouseEventKind::Down(_) = mouse.kind {
            state.active_view = ActiveView::Page;
        }
        return;
    }

    let delta = state.config.tuning.wheel_delta;
    match mouse.kind {
        MouseEventKind::ScrollDown => {
            state.page.on_wheel(delta, now);
        }
        MouseEventKind::ScrollUp => {
            state.page.on_wheel(-delta, now);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(hit) = hit_at(&state.hotspots, mouse.column, mouse.row) {
                handle_hit(state, hit, now);
            }
        }
        _ => {}
    }
}

/// The topmost hotspot under a cell.
pub fn hit_at(hotspots: &[Hotspot], col: u16, row: u16) -> Option<Hit> {
    hotspots
        .iter()
        .rev()
        .find(|s| point_in_rect(s.rect, col, row))
        .map(|s| s.hit)
}

fn handle_hit(state: &mut AppState, hit: Hit, now: Instant) {
    tracing::debug!(?hit, "click");
    match hit {
        Hit::Nav(section) => state.page.scroll_to_section(section),
        Hit::Language(lang) => {
            state.language.set(lang);
        }
        Hit::Topic(index) => state.page.select_topic(index, now),
        Hit::WorkRow(index) => state.page.toggle_work_row(index),
        Hit::WorksToggle => state.page.toggle_works_expanded(),
        Hit::Email => copy_email(state, now),
    }
}

fn copy_email(state: &mut AppState, now: Instant) {
    let email = state.content.info.email.clone();
    if email.is_empty() {
        state.notify("no contact address", Duration::from_millis(COPIED_NOTICE_MS), now);
        return;
    }
    let outcome = clipboard::copy_email(&email);
    state.notify(outcome.message(), Duration::from_millis(COPIED_NOTICE_MS), now);
}
