//! Members section: the director first, then every other group two members
//! per row.

use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::page_view::SectionCtx;
use super::theme::Theme;
use crate::core::color::Rgb;
use crate::core::members::{self, Member};

pub fn render(area: Rect, buf: &mut Buffer, ctx: &SectionCtx) {
    let bg = ctx.backdrop;
    buf.set_style(area, Theme::page_style(bg));
    let inner = area.inner(Margin::new(2, 1));
    if inner.is_empty() {
        return;
    }
    let groups = &ctx.content.members;
    let mut y = inner.y;

    if let Some(director) = members::director(groups) {
        let height = member_card(
            Rect::new(inner.x, y, inner.width, inner.bottom() - y),
            buf,
            director,
            bg,
        );
        y += height + 1;
    }

    for group in members::others(groups) {
        if y >= inner.bottom() {
            return;
        }
        buf.set_string(inner.x, y, &group.category, Theme::heading_style(bg, 1.0));
        y += 1;

        let half = inner.width / 2;
        for pair in group.pairs() {
            if y >= inner.bottom() {
                return;
            }
            let mut tallest = 0;
            for (i, member) in pair.iter().enumerate() {
                let x = inner.x + half * i as u16;
                let cell = Rect::new(x, y, half.saturating_sub(1), inner.bottom() - y);
                tallest = tallest.max(member_card(cell, buf, member, bg));
            }
            y += tallest + 1;
        }
    }
}

/// Name, role and bio stacked in `area`; returns the rows used.
fn member_card(area: Rect, buf: &mut Buffer, member: &Member, bg: Rgb) -> u16 {
    if area.is_empty() {
        return 0;
    }
    let mut lines = vec![Line::from(Span::styled(
        member.name.clone(),
        Theme::heading_style(bg, 1.0),
    ))];
    if !member.role.is_empty() {
        lines.push(Line::from(Span::styled(
            member.role.clone(),
            Theme::muted_style(bg, 1.0),
        )));
    }
    if !member.bio.is_empty() {
        lines.push(Line::from(Span::styled(
            member.bio.clone(),
            Theme::body_style(bg, 1.0),
        )));
    }
    // Word wrapping can spill one extra row per line at most.
    let width = area.width as usize;
    let rows: usize = lines
        .iter()
        .map(|l| l.width().div_ceil(width).max(1) + usize::from(l.width() > width))
        .sum();
    let height = (rows as u16).min(area.height);
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(Rect { height, ..area }, buf);
    height
}
