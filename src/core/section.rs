//! The fixed, ordered set of full-viewport sections that make up the page.

use std::fmt;

/// Identifier of one page section.  Declaration order is page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Cover,
    About,
    Works,
    Members,
    Contact,
}

impl SectionId {
    /// Every section, top to bottom.
    pub const ALL: [SectionId; 5] = [
        SectionId::Cover,
        SectionId::About,
        SectionId::Works,
        SectionId::Members,
        SectionId::Contact,
    ];

    /// Zero-based position on the page.
    pub fn order(self) -> usize {
        self as usize
    }

    pub fn from_order(order: usize) -> Option<Self> {
        Self::ALL.get(order).copied()
    }

    /// Stable anchor id (`"cover"`, `"about"`, ...).
    pub fn id(self) -> &'static str {
        match self {
            SectionId::Cover => "cover",
            SectionId::About => "about",
            SectionId::Works => "works",
            SectionId::Members => "members",
            SectionId::Contact => "contact",
        }
    }

    /// Label shown in the navigation bar.
    pub fn nav_label(self) -> &'static str {
        match self {
            SectionId::Cover => "intro",
            SectionId::About => "about",
            SectionId::Works => "works",
            SectionId::Members => "people",
            SectionId::Contact => "contact",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_order(self.order() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.order().checked_sub(1).and_then(Self::from_order)
    }

    /// Sections drawn over the dark cover texture use light chrome.
    pub fn is_dark(self) -> bool {
        matches!(self, SectionId::Cover | SectionId::Contact)
    }
}

/// A section as laid out on the page: its identity and its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub order: usize,
}

impl Section {
    /// Every section, top to bottom.
    pub fn all() -> Vec<Section> {
        SectionId::ALL
            .iter()
            .map(|&id| Section {
                id,
                order: id.order(),
            })
            .collect()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_matches_declaration() {
        for (i, id) in SectionId::ALL.iter().enumerate() {
            assert_eq!(id.order(), i);
            assert_eq!(SectionId::from_order(i), Some(*id));
        }
        assert_eq!(SectionId::from_order(5), None);
    }

    #[test]
    fn neighbours_stop_at_the_edges() {
        assert_eq!(SectionId::Cover.prev(), None);
        assert_eq!(SectionId::Cover.next(), Some(SectionId::About));
        assert_eq!(SectionId::Contact.next(), None);
        assert_eq!(SectionId::Contact.prev(), Some(SectionId::Members));
    }

    #[test]
    fn sections_are_listed_in_page_order() {
        let sections = Section::all();
        assert_eq!(sections.len(), 5);
        assert_eq!(sections[0].id, SectionId::Cover);
        assert_eq!(sections[4].id, SectionId::Contact);
        for (i, section) in sections.iter().enumerate() {
            assert_eq!(section.order, i);
        }
    }

    #[test]
    fn members_is_labelled_people() {
        assert_eq!(SectionId::Members.id(), "members");
        assert_eq!(SectionId::Members.nav_label(), "people");
    }
}
