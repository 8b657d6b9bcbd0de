//! Contact section.
//!
//! The panel starts inset with rounded corners and grows to the full section
//! as the radius collapses, squaring off once the collapse is nearly done.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::page_view::{Hit, Hotspot, SectionCtx};
use super::theme::Theme;
use crate::core::color;
use crate::core::content::Language;

/// Horizontal inset of the panel at full roundness.
const MAX_INSET: u16 = 6;

/// Below this roundness the corners are drawn square.
const SQUARE_BELOW: f64 = 0.05;

fn heading(language: Language) -> &'static str {
    match language {
        Language::En => "Get in touch",
        Language::Kr => "문의하기",
    }
}

/// Panel rectangle for a roundness in `[0, 1]`.
pub fn panel_rect(area: Rect, roundness: f64) -> Rect {
    let max_inset = MAX_INSET.min(area.width / 6);
    let inset = (roundness.clamp(0.0, 1.0) * max_inset as f64).round() as u16;
    area.inner(Margin::new(inset, inset / 2))
}

pub fn render(area: Rect, buf: &mut Buffer, ctx: &SectionCtx, spots: &mut Vec<Hotspot>) {
    let page_style = Theme::dark_page_style();
    buf.set_style(area, page_style);

    let roundness = ctx.page.contact_roundness();
    let panel = panel_rect(area, roundness);
    let border_type = if roundness > SQUARE_BELOW {
        BorderType::Rounded
    } else {
        BorderType::Plain
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(Theme::rgb(color::CONTACT_ACCENTS[1])))
        .style(page_style);
    let inner = block.inner(panel);
    block.render(panel, buf);
    if inner.height < 3 || inner.width < 4 {
        return;
    }

    let info = &ctx.content.info;
    let mid = inner.y + inner.height.saturating_sub(4) / 2;

    Paragraph::new(Line::from(Span::styled(
        heading(ctx.language),
        page_style.add_modifier(ratatui::style::Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .render(Rect::new(inner.x, mid, inner.width, 1), buf);

    // Accent strip under the heading.
    let strip_width = (color::CONTACT_ACCENTS.len() as u16 * 3).min(inner.width);
    let strip_x = inner.x + (inner.width - strip_width) / 2;
    if mid + 1 < inner.bottom() {
        for (i, accent) in color::CONTACT_ACCENTS.iter().enumerate() {
            let x = strip_x + i as u16 * 3;
            if x + 3 > strip_x + strip_width {
                break;
            }
            buf.set_string(x, mid + 1, "▀▀▀", Style::default().fg(Theme::rgb(*accent)));
        }
    }

    if !info.email.is_empty() && mid + 3 < inner.bottom() {
        let email_width = (info.email.chars().count() as u16).min(inner.width);
        let email_x = inner.x + (inner.width - email_width) / 2;
        buf.set_stringn(
            email_x,
            mid + 3,
            &info.email,
            email_width as usize,
            Theme::link_style(),
        );
        spots.push(Hotspot {
            rect: Rect::new(email_x, mid + 3, email_width, 1),
            hit: Hit::Email,
        });

        if let Some(notice) = ctx.notice {
            if mid + 4 < inner.bottom() {
                Paragraph::new(Line::from(Span::styled(
                    notice.to_string(),
                    Style::default().fg(Theme::rgb(color::CONTACT_ACCENTS[2])),
                )))
                .alignment(Alignment::Center)
                .render(Rect::new(inner.x, mid + 4, inner.width, 1), buf);
            }
        }
    }

    if inner.height > 6 {
        Paragraph::new(Line::from(Span::styled(
            info.footer.clone(),
            page_style.add_modifier(ratatui::style::Modifier::DIM),
        )))
        .alignment(Alignment::Center)
        .render(Rect::new(inner.x, inner.bottom() - 1, inner.width, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::Page;
    use crate::config::Tuning;
    use crate::core::content::StaticContent;
    use crate::core::pager::PagerMode;
    use crate::core::section::SectionId;
    use std::time::Instant;

    #[test]
    fn panel_grows_as_roundness_collapses() {
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(panel_rect(area, 1.0), Rect::new(6, 3, 68, 14));
        assert_eq!(panel_rect(area, 0.0), area);
        let half = panel_rect(area, 0.5);
        assert!(half.width > panel_rect(area, 1.0).width);
        assert!(half.width < area.width);
    }

    #[test]
    fn settled_contact_is_square_with_clickable_email() {
        let t0 = Instant::now();
        let mut page = Page::new(24.0, Vec::new(), &[], PagerMode::Sticky, &Tuning::default(), t0);
        page.scroll_to_section(SectionId::Contact);
        for _ in 0..200 {
            page.tick(t0);
        }
        let mut content = StaticContent::default();
        content.info.email = "hello@studio.test".into();
        let ctx = SectionCtx {
            page: &page,
            content: &content,
            language: Language::En,
            now: t0,
            backdrop: color::BASE_BG,
            notice: Some("copied"),
        };
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let mut spots = Vec::new();
        render(area, &mut buf, &ctx, &mut spots);

        assert_eq!(buf[(0, 0)].symbol(), "┌");
        assert_eq!(spots.len(), 1);
        let email = spots[0];
        assert_eq!(email.hit, Hit::Email);
        let text: String = (email.rect.x..email.rect.right())
            .map(|x| buf[(x, email.rect.y)].symbol().to_string())
            .collect();
        assert_eq!(text, "hello@studio.test");
        let below: String = (0..60)
            .map(|x| buf[(x, email.rect.y + 1)].symbol().to_string())
            .collect();
        assert!(below.contains("copied"));
    }
}
