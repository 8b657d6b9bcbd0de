//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use tokio::sync::watch;

use super::page::Page;
use super::store::LanguageStore;
use crate::config::AppConfig;
use crate::core::content::{Language, StaticContent};
use crate::core::pager::PagerMode;
use crate::ui::layout::AppLayout;
use crate::ui::page_view::Hotspot;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    Help,
}

/// A status-bar message that disappears on its own.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub until: Instant,
}

/// Top-level application state.
pub struct AppState {
    /// Loaded once; never mutated.
    pub content: StaticContent,
    /// Current language; the single place it changes.
    pub language: LanguageStore,
    /// Scroll container and everything observing it.
    pub page: Page,
    /// Key bindings and tuning.
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    pub notice: Option<Notice>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Clickable regions from the last frame.
    pub hotspots: Vec<Hotspot>,
}

impl AppState {
    pub fn new(
        content: StaticContent,
        config: AppConfig,
        language: Language,
        pager_mode: PagerMode,
        terminal_area: Rect,
        now: Instant,
    ) -> Self {
        let page = Page::new(
            AppLayout::viewport_height(terminal_area),
            content.topics(language),
            content.works(language),
            pager_mode,
            &config.tuning,
            now,
        );
        Self {
            content,
            language: LanguageStore::new(language),
            page,
            config,
            should_quit: false,
            notice: None,
            active_view: ActiveView::default(),
            terminal_area,
            hotspots: Vec::new(),
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, ttl: Duration, now: Instant) {
        self.notice = Some(Notice {
            message: message.into(),
            until: now + ttl,
        });
    }

    /// The notice text while it is still live.
    pub fn notice_at(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| now < n.until)
            .map(|n| n.message.as_str())
    }

    /// Drop an expired notice; returns whether one was dropped.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        if self.notice.as_ref().is_some_and(|n| now >= n.until) {
            self.notice = None;
            return true;
        }
        false
    }

    /// React to a language published on `rx` since it was last seen:
    /// topics and works are re-derived and the config follows.  Returns
    /// whether anything changed.
    pub fn follow_language(&mut self, rx: &mut watch::Receiver<Language>, now: Instant) -> bool {
        if !rx.has_changed().unwrap_or(false) {
            return false;
        }
        let lang = *rx.borrow_and_update();
        self.page
            .set_content(self.content.topics(lang), self.content.works(lang), now);
        self.config.language = lang;
        true
    }

    pub fn resize(&mut self, width: u16, height: u16, now: Instant) {
        self.terminal_area = Rect::new(0, 0, width, height);
        self.page
            .resize(AppLayout::viewport_height(self.terminal_area), now);
        self.hotspots.clear();
    }
}
