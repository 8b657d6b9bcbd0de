//! Static site content.
//!
//! The copy is authored as a spreadsheet export: four tables of string rows
//! (`about`, `desc`, `works`, `members`) whose columns are positional.  This
//! module is the only place that knows the column layout; everything past
//! [`StaticContent`] works with named records.

use std::path::Path;

use chrono::Datelike;
use serde::Deserialize;
use serde_json::Value;

use super::members::{self, MemberGroup};
use super::works::{self, WorkEntry};

/// The copy shipped with the binary.
const EMBEDDED: &str = include_str!("../../assets/content.json");

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("cannot read content file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed content document: {0}")]
    Json(#[from] serde_json::Error),
}

// ───────────────────────────────────────── language ──────────

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Kr,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Kr => "kr",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "eng" | "english" => Some(Language::En),
            "kr" | "ko" | "korean" => Some(Language::Kr),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Kr,
            Language::Kr => Language::En,
        }
    }
}

// ───────────────────────────────────────── records ───────────

/// One About topic in one language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Topic {
    pub title: String,
    pub body: String,
}

/// A `desc` row: the same topic in both languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescRow {
    pub en: Topic,
    pub kr: Topic,
    pub image: Option<String>,
}

impl DescRow {
    /// Korean cells left blank fall back to the English copy.
    pub fn topic(&self, lang: Language) -> Topic {
        match lang {
            Language::En => self.en.clone(),
            Language::Kr => Topic {
                title: non_empty_or(&self.kr.title, &self.en.title),
                body: non_empty_or(&self.kr.body, &self.en.body),
            },
        }
    }
}

/// Studio-wide facts from the first `about` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioInfo {
    pub name: String,
    pub tagline: String,
    pub email: String,
    pub footer: String,
}

impl Default for StudioInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            email: String::new(),
            footer: default_footer(),
        }
    }
}

fn default_footer() -> String {
    format!("© {}. All rights reserved.", chrono::Local::now().year())
}

// ───────────────────────────────────────── raw rows ──────────

/// One spreadsheet cell.  Numbers and booleans are kept as their text;
/// `null` and nested values become empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct Cell(pub String);

impl From<Value> for Cell {
    fn from(v: Value) -> Self {
        Cell(match v {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        })
    }
}

pub type Row = Vec<Cell>;

/// Positional access with empty-string fallback.
pub fn cell(row: &[Cell], col: usize) -> &str {
    row.get(col).map(|c| c.0.as_str()).unwrap_or("")
}

#[derive(Debug, Default, Deserialize)]
struct Sheets {
    #[serde(default)]
    about: Vec<Row>,
    #[serde(default)]
    desc: Vec<Row>,
    #[serde(default)]
    works: Vec<Row>,
    #[serde(default)]
    members: Vec<Row>,
}

// ───────────────────────────────────────── provider ──────────

/// Read-only content, loaded once.
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    pub info: StudioInfo,
    pub desc: Vec<DescRow>,
    works_en: Vec<WorkEntry>,
    works_kr: Vec<WorkEntry>,
    pub members: Vec<MemberGroup>,
}

impl StaticContent {
    /// The content bundled into the binary.  A broken bundle degrades to an
    /// empty page rather than failing.
    pub fn embedded() -> Self {
        match Self::from_json(EMBEDDED) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("embedded content unreadable: {err}");
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let content = Self::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            topics = content.desc.len(),
            works = content.works_en.len(),
            "content loaded"
        );
        Ok(content)
    }

    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let sheets: Sheets = serde_json::from_str(text)?;
        Ok(Self::from_sheets(sheets))
    }

    fn from_sheets(sheets: Sheets) -> Self {
        let info = sheets
            .about
            .first()
            .map(|row| StudioInfo {
                name: cell(row, 0).trim().to_string(),
                tagline: cell(row, 1).trim().to_string(),
                email: cell(row, 2).trim().to_string(),
                footer: non_empty_or(cell(row, 3).trim(), &default_footer()),
            })
            .unwrap_or_default();

        let desc = sheets
            .desc
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| DescRow {
                en: Topic {
                    title: cell(row, 0).to_string(),
                    body: cell(row, 1).to_string(),
                },
                kr: Topic {
                    title: cell(row, 2).to_string(),
                    body: cell(row, 3).to_string(),
                },
                image: Some(cell(row, 4).trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            })
            .collect();

        Self {
            info,
            desc,
            works_en: works::parse_rows(&sheets.works, Language::En),
            works_kr: works::parse_rows(&sheets.works, Language::Kr),
            members: members::group_rows(&sheets.members),
        }
    }

    /// About topics in display order.
    pub fn topics(&self, lang: Language) -> Vec<Topic> {
        self.desc.iter().map(|row| row.topic(lang)).collect()
    }

    pub fn works(&self, lang: Language) -> &[WorkEntry] {
        match lang {
            Language::En => &self.works_en,
            Language::Kr => &self.works_kr,
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
