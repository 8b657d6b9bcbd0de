//! Works section: header, divider, then the project table.

use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    text::{Line, Span},
};

use super::page_view::{offset_rows, Hit, Hotspot, SectionCtx};
use super::theme::Theme;
use crate::core::color::Rgb;
use crate::core::content::Language;
use crate::core::sequence::Stage;
use crate::core::works::{WorkEntry, WorksListing};

const YEAR_WIDTH: u16 = 6;

struct Labels {
    heading: &'static str,
    more: &'static str,
    collapse: &'static str,
    team: &'static str,
}

fn labels(language: Language) -> Labels {
    match language {
        Language::En => Labels {
            heading: "Selected Projects",
            more: "+ More",
            collapse: "- Collapse",
            team: "Team",
        },
        Language::Kr => Labels {
            heading: "주요 프로젝트",
            more: "+ 더보기",
            collapse: "- 접기",
            team: "참여",
        },
    }
}

pub fn render(area: Rect, buf: &mut Buffer, ctx: &SectionCtx, spots: &mut Vec<Hotspot>) {
    let bg = ctx.backdrop;
    buf.set_style(area, Theme::page_style(bg));
    let inner = area.inner(Margin::new(2, 1));
    if inner.is_empty() {
        return;
    }
    let text = labels(ctx.language);
    let listing = ctx.page.works();

    let header = ctx.page.works_pose(Stage::Header, ctx.now);
    if header.is_visible() {
        let y = inner.y + offset_rows(header.offset);
        if y < inner.bottom() {
            let line = Line::from(vec![
                Span::styled(text.heading, Theme::heading_style(bg, header.opacity)),
                Span::raw("  "),
                Span::styled(
                    format!("({})", listing.total()),
                    Theme::muted_style(bg, header.opacity),
                ),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }

    let divider = ctx.page.works_pose(Stage::Divider, ctx.now);
    let divider_y = inner.y + 2;
    if divider.is_visible() && divider_y < inner.bottom() {
        let width = (inner.width as f64 * divider.scale_x).round() as u16;
        buf.set_string(
            inner.x,
            divider_y,
            "─".repeat(width as usize),
            Theme::body_style(bg, divider.opacity),
        );
    }

    let content = ctx.page.works_pose(Stage::Content, ctx.now);
    if !content.is_visible() {
        return;
    }
    let top = inner.y + 4 + offset_rows(content.offset);
    let table = Rect::new(inner.x, top, inner.width, inner.bottom().saturating_sub(top));
    render_table(table, buf, listing, &text, bg, content.opacity, spots);
}

fn render_table(
    area: Rect,
    buf: &mut Buffer,
    listing: &WorksListing,
    text: &Labels,
    bg: Rgb,
    opacity: f64,
    spots: &mut Vec<Hotspot>,
) {
    if area.is_empty() {
        return;
    }
    let client_width = (area.width.saturating_sub(YEAR_WIDTH) / 3).max(8);
    let mut y = area.y;

    for (i, entry) in listing.visible().iter().enumerate() {
        if y >= area.bottom() {
            return;
        }
        let open = listing.open_row() == Some(i);
        let style = if open {
            Theme::selected_style(bg)
        } else {
            Theme::body_style(bg, opacity)
        };
        let line = row_line(entry, client_width, style, Theme::muted_style(bg, opacity));
        buf.set_line(area.x, y, &line, area.width);
        spots.push(Hotspot {
            rect: Rect::new(area.x, y, area.width, 1),
            hit: Hit::WorkRow(i),
        });
        y += 1;

        if open && !entry.team.is_empty() && y < area.bottom() {
            let credits = Line::from(Span::styled(
                format!("{:w$}{}: {}", "", text.team, entry.team, w = YEAR_WIDTH as usize),
                Theme::muted_style(bg, opacity),
            ));
            buf.set_line(area.x, y, &credits, area.width);
            y += 1;
        }
    }

    if listing.has_more() && y + 1 < area.bottom() {
        y += 1;
        let label = if listing.is_expanded() {
            text.collapse.to_string()
        } else {
            format!("{} ({})", text.more, listing.total() - listing.visible().len())
        };
        let width = label.chars().count() as u16;
        buf.set_string(area.x, y, &label, Theme::link_style());
        spots.push(Hotspot {
            rect: Rect::new(area.x, y, width.min(area.width), 1),
            hit: Hit::WorksToggle,
        });
    }
}

fn row_line(
    entry: &WorkEntry,
    client_width: u16,
    style: ratatui::style::Style,
    year_style: ratatui::style::Style,
) -> Line<'static> {
    let client: String = entry.client.chars().take(client_width as usize - 1).collect();
    Line::from(vec![
        Span::styled(
            format!("{:w$}", entry.year, w = YEAR_WIDTH as usize),
            year_style,
        ),
        Span::styled(format!("{:w$}", client, w = client_width as usize), style),
        Span::styled(entry.project.clone(), style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::Page;
    use crate::app::sequence_runtime::StageDone;
    use crate::config::Tuning;
    use crate::core::color;
    use crate::core::content::StaticContent;
    use crate::core::pager::PagerMode;
    use crate::core::section::SectionId;
    use std::time::{Duration, Instant};

    fn entry(year: &str, client: &str, project: &str, team: &str) -> WorkEntry {
        WorkEntry {
            year: year.to_string(),
            title: format!("{client}: {project}"),
            client: client.to_string(),
            project: project.to_string(),
            team: team.to_string(),
        }
    }

    fn settled_works(entries: &[WorkEntry], t0: Instant) -> Page {
        let mut page = Page::new(24.0, Vec::new(), entries, PagerMode::Sticky, &Tuning::default(), t0);
        page.scroll_to_section(SectionId::Works);
        for _ in 0..200 {
            page.tick(t0);
        }
        let request = page
            .take_requests()
            .into_iter()
            .rfind(|r| r.section == SectionId::Works)
            .expect("works sequence requested");
        for stage in 0..request.durations.len() {
            let done = StageDone {
                section: SectionId::Works,
                generation: request.generation,
                stage,
            };
            assert!(page.on_stage_done(done, t0));
        }
        page
    }

    fn draw(page: &Page, t0: Instant) -> (Buffer, Vec<Hotspot>) {
        let content = StaticContent::default();
        let ctx = SectionCtx {
            page,
            content: &content,
            language: Language::En,
            now: t0 + Duration::from_secs(1),
            backdrop: color::WORKS_BG,
            notice: None,
        };
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let mut spots = Vec::new();
        render(area, &mut buf, &ctx, &mut spots);
        (buf, spots)
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn collapsed_table_offers_more() {
        let t0 = Instant::now();
        let entries: Vec<WorkEntry> = (0..6)
            .map(|i| entry("2025", &format!("Client{i}"), "Project", ""))
            .collect();
        let page = settled_works(&entries, t0);
        let (buf, spots) = draw(&page, t0);

        assert!(row(&buf, 1).contains("Selected Projects"));
        assert!(row(&buf, 3).starts_with("  ──"));
        assert!(row(&buf, 5).contains("2025  Client0"));
        let rows = spots.iter().filter(|s| matches!(s.hit, Hit::WorkRow(_))).count();
        assert_eq!(rows, 4);
        let toggle = spots
            .iter()
            .find(|s| s.hit == Hit::WorksToggle)
            .expect("more toggle");
        assert!(row(&buf, toggle.rect.y).contains("+ More (2)"));
    }

    #[test]
    fn open_row_shows_team_credits() {
        let t0 = Instant::now();
        let entries = vec![
            entry("2025", "LG", "Display", "Kim, Lee"),
            entry("2025", "CJ", "Logistics", ""),
        ];
        let mut page = settled_works(&entries, t0);
        page.toggle_work_row(0);
        let (buf, spots) = draw(&page, t0);
        assert!(row(&buf, 6).contains("Team: Kim, Lee"));
        let second = spots
            .iter()
            .find(|s| s.hit == Hit::WorkRow(1))
            .expect("second row");
        assert_eq!(second.rect.y, 7);
    }
}
