//! The scrolling page.
//!
//! Every section is drawn into its own viewport-sized buffer, then the rows
//! that fall inside the page area at the current scroll offset are copied
//! onto the frame.  Sections never need to know they are partially visible.
//!
//! Renderers also report hotspots (clickable rectangles) in section-local
//! coordinates; they are translated to screen coordinates here and kept by
//! the app for mouse hit-testing until the next frame.

use std::time::Instant;

use ratatui::{buffer::Buffer, layout::Rect};

use super::{about, contact, cover, members, works};
use crate::app::page::Page;
use crate::core::color::{self, Rgb};
use crate::core::content::{Language, StaticContent};
use crate::core::section::SectionId;

/// Something the mouse can click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Nav(SectionId),
    Language(Language),
    Topic(usize),
    WorkRow(usize),
    WorksToggle,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotspot {
    pub rect: Rect,
    pub hit: Hit,
}

/// Everything a section renderer may read.
pub struct SectionCtx<'a> {
    pub page: &'a Page,
    pub content: &'a StaticContent,
    pub language: Language,
    pub now: Instant,
    /// Page background behind this frame.
    pub backdrop: Rgb,
    /// Transient confirmation shown next to the contact address.
    pub notice: Option<&'a str>,
}

/// Pixels per terminal row when converting entrance offsets.
const PX_PER_ROW: f64 = 7.0;

pub fn offset_rows(px: f64) -> u16 {
    (px / PX_PER_ROW).round().clamp(0.0, u16::MAX as f64) as u16
}

/// Draw the visible part of the page into `area` and return the hotspots.
pub fn render(area: Rect, buf: &mut Buffer, ctx: &SectionCtx) -> Vec<Hotspot> {
    let mut spots = Vec::new();
    if area.is_empty() {
        return spots;
    }
    let vh = ctx.page.viewport_height();
    let offset = ctx.page.offset();

    for id in SectionId::ALL {
        let top = id.order() as f64 * vh - offset;
        let section_rows = area.height as i32;
        let top_row = top.round() as i32;
        if top_row >= section_rows || top_row + section_rows <= 0 {
            continue;
        }

        let local = Rect::new(0, 0, area.width, area.height);
        let mut section_buf = Buffer::empty(local);
        let mut local_spots = Vec::new();
        render_section(id, local, &mut section_buf, ctx, &mut local_spots);

        // Copy the overlapping rows.
        for sy in 0..area.height {
            let screen_row = top_row + sy as i32;
            if screen_row < 0 || screen_row >= section_rows {
                continue;
            }
            let dy = area.y + screen_row as u16;
            for x in 0..area.width {
                if let (Some(src), Some(dst)) = (
                    section_buf.cell((x, sy)).cloned(),
                    buf.cell_mut((area.x + x, dy)),
                ) {
                    *dst = src;
                }
            }
        }

        for spot in local_spots {
            if let Some(rect) = translate(spot.rect, area, top_row) {
                spots.push(Hotspot { rect, hit: spot.hit });
            }
        }
    }
    spots
}

fn render_section(
    id: SectionId,
    area: Rect,
    buf: &mut Buffer,
    ctx: &SectionCtx,
    spots: &mut Vec<Hotspot>,
) {
    match id {
        SectionId::Cover => cover::render(area, buf, ctx),
        SectionId::About => about::render(area, buf, ctx, spots),
        SectionId::Works => works::render(area, buf, ctx, spots),
        SectionId::Members => members::render(area, buf, ctx),
        SectionId::Contact => contact::render(area, buf, ctx, spots),
    }
}

/// Section-local rect to screen rect, clipped to the page area.
fn translate(rect: Rect, area: Rect, top_row: i32) -> Option<Rect> {
    let y = top_row + rect.y as i32;
    let bottom = (y + rect.height as i32).min(area.height as i32);
    let y = y.max(0);
    if bottom <= y || rect.width == 0 {
        return None;
    }
    Some(Rect::new(
        area.x + rect.x,
        area.y + y as u16,
        rect.width.min(area.width.saturating_sub(rect.x)),
        (bottom - y) as u16,
    ))
}

/// Background for the light sections at the current blends.
pub fn backdrop(page: &Page) -> Rgb {
    color::backdrop(page.works_blend(), page.members_blend())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_clips_to_the_page() {
        let area = Rect::new(0, 1, 40, 10);
        let r = Rect::new(2, 3, 10, 2);
        assert_eq!(translate(r, area, 0), Some(Rect::new(2, 4, 10, 2)));
        assert_eq!(translate(r, area, -4), Some(Rect::new(2, 1, 10, 1)));
        assert_eq!(translate(r, area, -5), None);
        assert_eq!(translate(r, area, 8), None);
    }

    #[test]
    fn entrance_offsets_round_to_rows() {
        assert_eq!(offset_rows(14.0), 2);
        assert_eq!(offset_rows(10.0), 1);
        assert_eq!(offset_rows(0.0), 0);
        assert_eq!(offset_rows(-3.0), 0);
    }
}
