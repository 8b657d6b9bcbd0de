//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the page state and turns it into cells on the terminal.
//! Drawing never mutates state; clickable regions are returned to the caller.

pub mod about;
pub mod contact;
pub mod cover;
pub mod layout;
pub mod members;
pub mod nav;
pub mod page_view;
pub mod popup;
pub mod smooth_scroll;
pub mod theme;
pub mod works;

use std::time::Instant;

use ratatui::{widgets::Paragraph, Frame};

use crate::app::state::{ActiveView, AppState};
use layout::AppLayout;
use nav::NavBar;
use page_view::{Hotspot, SectionCtx};
use theme::Theme;

/// Draw one frame and return the hotspots it produced, nav bar last so it
/// wins over anything scrolled beneath it.
pub fn draw(frame: &mut Frame, state: &AppState, now: Instant) -> Vec<Hotspot> {
    let layout = AppLayout::from_area(frame.area());
    let language = state.language.get();
    let notice = state.notice_at(now);

    let ctx = SectionCtx {
        page: &state.page,
        content: &state.content,
        language,
        now,
        backdrop: page_view::backdrop(&state.page),
        notice,
    };
    let mut hotspots = page_view::render(layout.page_area, frame.buffer_mut(), &ctx);

    frame.render_widget(
        NavBar {
            name: &state.content.info.name,
            active: state.page.active(),
            language,
        },
        layout.nav_area,
    );
    hotspots.extend(nav::nav_hotspots(layout.nav_area, language));

    let hint = state.config.status_bar_hint();
    let (status_text, style) = match notice {
        Some(message) => (message, Theme::notice_style()),
        None => (hint.as_str(), Theme::status_bar_style()),
    };
    frame.render_widget(Paragraph::new(status_text).style(style), layout.status_area);

    if state.active_view == ActiveView::Help {
        frame.render_widget(
            popup::HelpPopup {
                config: &state.config,
                pager_mode: state.page.pager().mode(),
            },
            frame.area(),
        );
        hotspots.clear();
    }
    hotspots
}
