//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::color::{self, Rgb};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub fn rgb(c: Rgb) -> Color {
        Color::Rgb(c.r, c.g, c.b)
    }

    /// `fg` faded toward `bg`; opacity 0 is invisible.
    pub fn faded(fg: Rgb, bg: Rgb, opacity: f64) -> Color {
        Self::rgb(bg.lerp(fg, opacity))
    }

    // ── page ───────────────────────────────────────────────────
    pub fn page_style(bg: Rgb) -> Style {
        Style::default()
            .bg(Self::rgb(bg))
            .fg(Self::rgb(color::BASE_TEXT))
    }

    pub fn dark_page_style() -> Style {
        Style::default()
            .bg(Self::rgb(color::BASE_TEXT))
            .fg(Self::rgb(color::BASE_BG))
    }

    pub fn heading_style(bg: Rgb, opacity: f64) -> Style {
        Style::default()
            .fg(Self::faded(color::BASE_TEXT, bg, opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn body_style(bg: Rgb, opacity: f64) -> Style {
        Style::default().fg(Self::faded(color::BASE_TEXT, bg, opacity))
    }

    pub fn muted_style(bg: Rgb, opacity: f64) -> Style {
        Style::default().fg(Self::faded(color::MUTED_TEXT, bg, opacity))
    }

    pub fn selected_style(bg: Rgb) -> Style {
        Style::default()
            .fg(Self::rgb(bg))
            .bg(Self::rgb(color::BASE_TEXT))
            .add_modifier(Modifier::BOLD)
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(Self::rgb(color::CONTACT_ACCENTS[0]))
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn nav_style(dark: bool) -> Style {
        if dark {
            Self::dark_page_style()
        } else {
            Self::page_style(color::BASE_BG)
        }
    }

    pub fn nav_active_style(dark: bool) -> Style {
        Self::nav_style(dark).add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn notice_style() -> Style {
        Self::status_bar_style()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    }
}
