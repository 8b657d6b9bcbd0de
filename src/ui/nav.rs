//! Top navigation bar: studio name, one label per section with the active
//! one boxed, and the language switch.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::page_view::{Hit, Hotspot};
use super::theme::Theme;
use crate::core::content::Language;
use crate::core::section::SectionId;

pub struct NavBar<'a> {
    pub name: &'a str,
    pub active: SectionId,
    pub language: Language,
}

/// Screen positions of every clickable nav item.
pub fn nav_hotspots(area: Rect, language: Language) -> Vec<Hotspot> {
    let mut spots = Vec::new();

    // Language switch, right-aligned: " EN | KR ".
    let lang_width = 9u16;
    let lang_x = area.x + area.width.saturating_sub(lang_width);
    spots.push(Hotspot {
        rect: Rect::new(lang_x, area.y, lang_width.min(area.width), 1),
        hit: Hit::Language(language.toggled()),
    });

    // Section labels, right to left before the switch.
    let mut right = lang_x.saturating_sub(1);
    for id in SectionId::ALL.iter().rev() {
        let width = id.nav_label().chars().count() as u16 + 2;
        let x = right.saturating_sub(width);
        if x <= area.x {
            break;
        }
        spots.push(Hotspot {
            rect: Rect::new(x, area.y, width, 1),
            hit: Hit::Nav(*id),
        });
        right = x.saturating_sub(1);
    }
    spots
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dark = self.active.is_dark();
        let base = Theme::nav_style(dark);
        buf.set_style(area, base);
        Paragraph::new(Line::from(Span::styled(format!(" {}", self.name), base)))
            .render(area, buf);

        for spot in nav_hotspots(area, self.language) {
            match spot.hit {
                Hit::Nav(id) => {
                    let (text, style) = if id == self.active {
                        (format!("[{}]", id.nav_label()), Theme::nav_active_style(dark))
                    } else {
                        (format!(" {} ", id.nav_label()), base)
                    };
                    buf.set_string(spot.rect.x, spot.rect.y, text, style);
                }
                Hit::Language(_) => {
                    let (en, kr) = match self.language {
                        Language::En => (Theme::nav_active_style(dark), base),
                        Language::Kr => (base, Theme::nav_active_style(dark)),
                    };
                    let x = spot.rect.x;
                    buf.set_string(x, spot.rect.y, " ", base);
                    buf.set_string(x + 1, spot.rect.y, "EN", en);
                    buf.set_string(x + 3, spot.rect.y, " | ", base);
                    buf.set_string(x + 6, spot.rect.y, "KR", kr);
                }
                _ => {}
            }
        }
    }
}
