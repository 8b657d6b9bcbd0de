//! Cover section: studio name and tagline on the dark backdrop.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::page_view::SectionCtx;
use super::theme::Theme;

pub fn render(area: Rect, buf: &mut Buffer, ctx: &SectionCtx) {
    let style = Theme::dark_page_style();
    buf.set_style(area, style);

    let info = &ctx.content.info;
    let mut lines = vec![Line::from(Span::styled(
        info.name.clone(),
        style.add_modifier(Modifier::BOLD),
    ))];
    if !info.tagline.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(info.tagline.clone(), style)));
    }

    let height = lines.len() as u16 + 2;
    let top = area.y + area.height.saturating_sub(height) / 2;
    let block = Rect::new(area.x, top, area.width, height.min(area.height));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(block, buf);

    if area.height > height + 2 {
        let hint = Rect::new(area.x, area.bottom() - 2, area.width, 1);
        Paragraph::new(Line::from(Span::styled(
            "scroll ↓",
            style.add_modifier(Modifier::DIM),
        )))
        .alignment(Alignment::Center)
        .render(hint, buf);
    }
}
