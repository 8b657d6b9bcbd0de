//! Works table parsing and the Works listing model.
//!
//! The sheet stores projects column-wise in blocks of three rows
//! `[years, titles_en, titles_kr]`, optionally followed by a team-credits row
//! whose label cell mentions `tf` or `team`.  A year cell applies to its own
//! column and every column after it until the next year cell.

use super::content::{cell, Language, Row};

/// Latest year shown; later entries are considered unreleased.
pub const SHOWCASE_YEAR: u32 = 2025;

/// Rows visible in the collapsed listing.
pub const COLLAPSED_ROWS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkEntry {
    /// Raw year text; empty when no year preceded the column.
    pub year: String,
    pub title: String,
    pub client: String,
    pub project: String,
    pub team: String,
}

impl WorkEntry {
    /// The year when it is a plain four-digit number.
    pub fn year_number(&self) -> Option<u32> {
        if self.year.len() == 4 && self.year.bytes().all(|b| b.is_ascii_digit()) {
            self.year.parse().ok()
        } else {
            None
        }
    }
}

/// Collapse internal whitespace to single spaces.
fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_team_row(row: Option<&Row>) -> bool {
    row.map(|r| {
        let label = one_line(cell(r, 0)).to_lowercase();
        label.contains("tf") || label.contains("team")
    })
    .unwrap_or(false)
}

/// Split `client: project` on the first colon.  Titles without a colon are
/// all project.
fn split_title(title: &str) -> (String, String) {
    match title.split_once(':') {
        Some((client, project)) => (client.trim().to_string(), project.trim().to_string()),
        None => (String::new(), title.to_string()),
    }
}

/// Parse every block of the works table for `lang`.
pub fn parse_rows(rows: &[Row], lang: Language) -> Vec<WorkEntry> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < rows.len() {
        let has_team = is_team_row(rows.get(i + 3));
        parse_block(rows, i, has_team, lang, &mut out);
        i += if has_team { 4 } else { 3 };
    }
    out
}

fn parse_block(rows: &[Row], base: usize, has_team: bool, lang: Language, out: &mut Vec<WorkEntry>) {
    let empty: Row = Vec::new();
    let years = rows.get(base).unwrap_or(&empty);
    let en = rows.get(base + 1).unwrap_or(&empty);
    let kr = rows.get(base + 2).unwrap_or(&empty);
    let team = if has_team {
        rows.get(base + 3).unwrap_or(&empty)
    } else {
        &empty
    };

    let has_kr = kr.iter().skip(1).any(|c| !c.0.trim().is_empty());
    let titles = match lang {
        Language::Kr if has_kr => kr,
        _ => en,
    };

    let columns = years.len().max(en.len()).max(kr.len());
    let mut year = String::new();
    for col in 1..columns {
        let y = one_line(cell(years, col));
        if y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()) {
            year = y;
        }

        let title = one_line(cell(titles, col));
        if title.is_empty() {
            continue;
        }
        let (client, project) = split_title(&title);
        out.push(WorkEntry {
            year: year.clone(),
            title,
            client,
            project,
            team: cell(team, col).trim().to_string(),
        });
    }
}

/// Listed entries: valid years up to the showcase year, newest first.
/// The sort is stable so sheet order holds within a year.
pub fn listed(entries: &[WorkEntry]) -> Vec<WorkEntry> {
    let mut all: Vec<WorkEntry> = entries
        .iter()
        .filter(|e| e.year_number().is_some_and(|y| y <= SHOWCASE_YEAR))
        .cloned()
        .collect();
    all.sort_by(|a, b| b.year_number().cmp(&a.year_number()));
    all
}

/// Collapse/expand state of the Works section.
#[derive(Debug, Clone, Default)]
pub struct WorksListing {
    all: Vec<WorkEntry>,
    collapsed_len: usize,
    expanded: bool,
    open_row: Option<usize>,
}

impl WorksListing {
    pub fn new(entries: &[WorkEntry]) -> Self {
        let all = listed(entries);
        let showcase = all
            .iter()
            .filter(|e| e.year_number() == Some(SHOWCASE_YEAR))
            .count();
        // Showcase-year entries sort first, so the collapsed view is a prefix.
        let pool = if showcase > 0 { showcase } else { all.len() };
        Self {
            collapsed_len: pool.min(COLLAPSED_ROWS),
            all,
            expanded: false,
            open_row: None,
        }
    }

    /// Replace the entries (language switch).  Expansion state is kept; an
    /// open row that no longer exists is closed.
    pub fn set_entries(&mut self, entries: &[WorkEntry]) {
        let expanded = self.expanded;
        let open_row = self.open_row;
        *self = Self::new(entries);
        self.expanded = expanded;
        self.open_row = open_row.filter(|&i| i < self.visible().len());
    }

    pub fn visible(&self) -> &[WorkEntry] {
        if self.expanded {
            &self.all
        } else {
            &self.all[..self.collapsed_len]
        }
    }

    pub fn total(&self) -> usize {
        self.all.len()
    }

    pub fn has_more(&self) -> bool {
        self.all.len() > self.collapsed_len
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Collapsing also closes any open row.
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
        if !self.expanded {
            self.open_row = None;
        }
        tracing::debug!(expanded = self.expanded, "works listing toggled");
    }

    pub fn open_row(&self) -> Option<usize> {
        self.open_row
    }

    /// Open `index`, or close it when it is already open.
    pub fn toggle_row(&mut self, index: usize) {
        if index >= self.visible().len() {
            return;
        }
        self.open_row = if self.open_row == Some(index) {
            None
        } else {
            Some(index)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::Cell;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| Cell(c.to_string())).collect()
    }

    fn sheet() -> Vec<Row> {
        vec![
            row(&["year", "2025", "", "2024"]),
            row(&["en", "LG: Care AI", "Solo Project", "Kia: EV: Cabin"]),
            row(&["kr", "엘지: 케어 AI", "", "기아: 캐빈"]),
            row(&["TF", "A, B", "", "C"]),
            row(&["year", "2021", "2026", "abcd"]),
            row(&["en", "Old: One", "Future: Two", "Bad: Year"]),
            row(&["kr"]),
        ]
    }

    #[test]
    fn year_carries_forward_across_columns() {
        let works = parse_rows(&sheet(), Language::En);
        let years: Vec<&str> = works.iter().map(|w| w.year.as_str()).collect();
        assert_eq!(years, ["2025", "2025", "2024", "2021", "2026", "2026"]);
    }

    #[test]
    fn titles_split_on_the_first_colon() {
        let works = parse_rows(&sheet(), Language::En);
        assert_eq!(works[0].client, "LG");
        assert_eq!(works[0].project, "Care AI");
        assert_eq!(works[1].client, "");
        assert_eq!(works[1].project, "Solo Project");
        assert_eq!(works[2].client, "Kia");
        assert_eq!(works[2].project, "EV: Cabin");
    }

    #[test]
    fn team_row_is_attached_and_skipped() {
        let works = parse_rows(&sheet(), Language::En);
        assert_eq!(works[0].team, "A, B");
        assert_eq!(works[2].team, "C");
        assert_eq!(works[3].team, "");
        assert!(works.iter().all(|w| !w.title.starts_with("A, B")));
    }

    #[test]
    fn korean_titles_skip_blank_cells_and_fall_back_per_block() {
        let works = parse_rows(&sheet(), Language::Kr);
        let titles: Vec<&str> = works.iter().map(|w| w.title.as_str()).collect();
        // The second block has an empty Korean row, so English is used.
        assert_eq!(
            titles,
            ["엘지: 케어 AI", "기아: 캐빈", "Old: One", "Future: Two", "Bad: Year"]
        );
    }

    #[test]
    fn listing_filters_and_orders_by_year() {
        let works = parse_rows(&sheet(), Language::En);
        let all = listed(&works);
        let years: Vec<&str> = all.iter().map(|w| w.year.as_str()).collect();
        assert_eq!(years, ["2025", "2025", "2024", "2021"]);
        assert_eq!(all[0].project, "Care AI");
        assert_eq!(all[1].project, "Solo Project");
    }

    #[test]
    fn collapsed_view_prefers_the_showcase_year() {
        let works = parse_rows(&sheet(), Language::En);
        let mut listing = WorksListing::new(&works);
        assert_eq!(listing.visible().len(), 2);
        assert!(listing.has_more());

        listing.toggle_expanded();
        assert_eq!(listing.visible().len(), 4);
        listing.toggle_row(3);
        assert_eq!(listing.open_row(), Some(3));
        listing.toggle_row(3);
        assert_eq!(listing.open_row(), None);

        listing.toggle_row(2);
        listing.toggle_expanded();
        assert_eq!(listing.open_row(), None);
    }

    #[test]
    fn collapsed_view_falls_back_to_all_years() {
        let rows = vec![
            row(&["year", "2019", "2018", "2017", "2016", "2015"]),
            row(&["en", "a", "b", "c", "d", "e"]),
            row(&["kr"]),
        ];
        let listing = WorksListing::new(&parse_rows(&rows, Language::En));
        assert_eq!(listing.visible().len(), COLLAPSED_ROWS);
        assert_eq!(listing.visible()[0].year, "2019");
    }

    #[test]
    fn empty_table_is_an_empty_listing() {
        let listing = WorksListing::new(&parse_rows(&[], Language::En));
        assert!(listing.visible().is_empty());
        assert!(!listing.has_more());
    }
}
