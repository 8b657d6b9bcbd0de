//! About section: the topic list beside the active topic's body.
//!
//! The header and the content each follow their own entrance stage; both
//! replay whenever the active topic changes.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::page_view::{offset_rows, Hit, Hotspot, SectionCtx};
use super::theme::Theme;
use crate::core::content::Language;
use crate::core::sequence::Stage;

const MARGIN: u16 = 2;

/// Below this width the list sits above the body instead of beside it.
const STACK_BELOW: u16 = 56;

fn heading(language: Language) -> &'static str {
    match language {
        Language::En => "About",
        Language::Kr => "소개",
    }
}

pub fn render(area: Rect, buf: &mut Buffer, ctx: &SectionCtx, spots: &mut Vec<Hotspot>) {
    let bg = ctx.backdrop;
    buf.set_style(area, Theme::page_style(bg));
    let inner = area.inner(ratatui::layout::Margin::new(MARGIN, 1));
    if inner.is_empty() {
        return;
    }

    let pager = ctx.page.pager();
    let header = ctx.page.about_pose(Stage::Header, ctx.now);
    let content = ctx.page.about_pose(Stage::Content, ctx.now);

    if header.is_visible() {
        let y = inner.y + offset_rows(header.offset);
        if y < inner.bottom() {
            let count = format!(
                "{:02} / {:02}",
                pager.index() + 1,
                pager.topics().len().max(1)
            );
            let line = Line::from(vec![
                Span::styled(heading(ctx.language), Theme::heading_style(bg, header.opacity)),
                Span::raw("  "),
                Span::styled(count, Theme::muted_style(bg, header.opacity)),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }

    if !content.is_visible() {
        return;
    }
    let shift = offset_rows(content.offset);
    let body_top = inner.y + 3 + shift;
    if body_top >= inner.bottom() {
        return;
    }
    let body_area = Rect::new(inner.x, body_top, inner.width, inner.bottom() - body_top);

    let direction = if body_area.width < STACK_BELOW {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let list_extent = match direction {
        Direction::Vertical => pager.topics().len() as u16 + 1,
        Direction::Horizontal => (body_area.width / 3).clamp(16, 30),
    };
    let [list_area, text_area] = Layout::default()
        .direction(direction)
        .constraints([Constraint::Length(list_extent), Constraint::Min(1)])
        .areas(body_area);

    // Topic list.
    for (i, topic) in pager.topics().iter().enumerate() {
        let y = list_area.y + i as u16;
        if y >= list_area.bottom() {
            break;
        }
        let selected = i == pager.index();
        let (marker, style) = if selected {
            ("▸ ", Theme::selected_style(bg))
        } else {
            ("  ", Theme::body_style(bg, content.opacity))
        };
        let width = list_area.width.saturating_sub(1);
        let line = Line::from(Span::styled(format!("{marker}{}", topic.title), style));
        buf.set_line(list_area.x, y, &line, width);
        spots.push(Hotspot {
            rect: Rect::new(list_area.x, y, width, 1),
            hit: Hit::Topic(i),
        });
    }

    // Body.
    if let Some(topic) = pager.active_topic() {
        let text_area = Rect {
            x: text_area.x + u16::from(direction == Direction::Horizontal),
            width: text_area
                .width
                .saturating_sub(u16::from(direction == Direction::Horizontal)),
            ..text_area
        };
        let lines: Vec<Line> = topic
            .body
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Theme::body_style(bg, content.opacity))))
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);
    }
}
