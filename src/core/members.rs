//! Members table: `[category, name, image, role, bio]` rows grouped by
//! category.

use super::content::{cell, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub image: Option<String>,
    pub role: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberGroup {
    pub category: String,
    pub members: Vec<Member>,
}

impl MemberGroup {
    /// Members two per row, the last row possibly holding one.
    pub fn pairs(&self) -> impl Iterator<Item = &[Member]> {
        self.members.chunks(2)
    }
}

/// Group rows by category, keeping the order in which categories first
/// appear.  Rows with neither a category nor a name are dropped.
pub fn group_rows(rows: &[Row]) -> Vec<MemberGroup> {
    let mut groups: Vec<MemberGroup> = Vec::new();
    for row in rows {
        let category = cell(row, 0).trim();
        let name = cell(row, 1).trim();
        if category.is_empty() && name.is_empty() {
            continue;
        }
        let member = Member {
            name: name.to_string(),
            image: Some(cell(row, 2).trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            role: cell(row, 3).trim().to_string(),
            bio: cell(row, 4).trim().to_string(),
        };
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.members.push(member),
            None => groups.push(MemberGroup {
                category: category.to_string(),
                members: vec![member],
            }),
        }
    }
    groups
}

/// The director: the first member of the first group.
pub fn director(groups: &[MemberGroup]) -> Option<&Member> {
    groups.first().and_then(|g| g.members.first())
}

/// Every group after the first, rendered as pairs.
pub fn others(groups: &[MemberGroup]) -> &[MemberGroup] {
    groups.get(1..).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::Cell;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| Cell(c.to_string())).collect()
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let rows = vec![
            row(&["Director", "Ada", "", "Lead", "Bio"]),
            row(&["Research", "Ben", "b.png", "Researcher"]),
            row(&["Design", "Cy"]),
            row(&["Research", "Dee"]),
            row(&["", ""]),
        ];
        let groups = group_rows(&rows);
        let categories: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, ["Director", "Research", "Design"]);
        assert_eq!(groups[1].members.len(), 2);
        assert_eq!(groups[1].members[1].name, "Dee");
        assert_eq!(groups[1].members[0].image.as_deref(), Some("b.png"));
        assert_eq!(groups[2].members[0].bio, "");
    }

    #[test]
    fn director_and_pairs() {
        let rows = vec![
            row(&["Director", "Ada"]),
            row(&["Team", "B"]),
            row(&["Team", "C"]),
            row(&["Team", "D"]),
        ];
        let groups = group_rows(&rows);
        assert_eq!(director(&groups).map(|m| m.name.as_str()), Some("Ada"));
        let rest = others(&groups);
        assert_eq!(rest.len(), 1);
        let sizes: Vec<usize> = rest[0].pairs().map(|p| p.len()).collect();
        assert_eq!(sizes, [2, 1]);
    }

    #[test]
    fn no_rows_no_director() {
        let groups = group_rows(&[]);
        assert!(director(&groups).is_none());
        assert!(others(&groups).is_empty());
    }
}
