//! Directory table engine: search and sort over the loaded directory.
//!
//! Projections borrow the source rows and never modify them, so the same
//! state applied to the same rows always yields the same sequence.

use std::cmp::Ordering;

use crate::models::DirectoryRow;

/// Sortable directory columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    FirstName,
    LastName,
    Department,
    Status,
    Manager,
}

impl Column {
    pub const ALL: &'static [Column] = &[
        Column::FirstName,
        Column::LastName,
        Column::Department,
        Column::Status,
        Column::Manager,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::FirstName => "FIRST NAME",
            Self::LastName => "LAST NAME",
            Self::Department => "DEPARTMENT",
            Self::Status => "STATUS",
            Self::Manager => "MANAGER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "first" | "first_name" => Some(Self::FirstName),
            "last" | "last_name" => Some(Self::LastName),
            "department" | "dept" => Some(Self::Department),
            "status" | "is_active" => Some(Self::Status),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }

    /// Text this column sorts by.
    pub fn text(self, row: &DirectoryRow) -> &str {
        match self {
            Self::FirstName => row.first_name.text(),
            Self::LastName => row.last_name.text(),
            Self::Department => row.department.text(),
            Self::Status => active_text(row.is_active),
            Self::Manager => row.manager.text(),
        }
    }
}

fn active_text(is_active: bool) -> &'static str {
    if is_active {
        "true"
    } else {
        "false"
    }
}

/// Every field of a row as text, for searching.
fn searchable_text(row: &DirectoryRow) -> [&str; 7] {
    [
        row.id.as_str(),
        row.first_name.text(),
        row.middle_name.text(),
        row.last_name.text(),
        row.department.text(),
        active_text(row.is_active),
        row.manager.text(),
    ]
}

/// Search and sort state of the directory table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub sort_by: Option<Column>,
    pub reversed: bool,
    pub search: String,
}

impl TableState {
    /// Apply a header selection using the sort toggle policy.
    pub fn click(&mut self, column: Column) {
        let (sort_by, reversed) = next_sort(self.sort_by, self.reversed, column);
        self.sort_by = Some(sort_by);
        self.reversed = reversed;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn project<'a>(&self, rows: &'a [DirectoryRow]) -> Vec<&'a DirectoryRow> {
        project(rows, self)
    }
}

/// Sort toggle policy: the active column flips direction, any other column
/// starts ascending.
pub fn next_sort(current: Option<Column>, reversed: bool, clicked: Column) -> (Column, bool) {
    let reversed = if current == Some(clicked) { !reversed } else { false };
    (clicked, reversed)
}

/// Keep rows where any field contains the trimmed query, ignoring case.
pub fn filter<'a>(rows: &'a [DirectoryRow], query: &str) -> Vec<&'a DirectoryRow> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| {
            searchable_text(row)
                .iter()
                .any(|text| text.to_lowercase().contains(&query))
        })
        .collect()
}

/// Sort a projection by `column`. Descending is the exact reverse of ascending.
pub fn sort(rows: &mut [&DirectoryRow], column: Column, descending: bool) {
    rows.sort_by(|a, b| collate(column.text(a), column.text(b)));
    if descending {
        rows.reverse();
    }
}

/// Filter, then sort when a column is selected.
pub fn project<'a>(rows: &'a [DirectoryRow], state: &TableState) -> Vec<&'a DirectoryRow> {
    let mut projected = filter(rows, &state.search);
    if let Some(column) = state.sort_by {
        sort(&mut projected, column, state.reversed);
    }
    projected
}

/// Key of the row at `index` in a projection, if there is one.
pub fn activate<'a>(projected: &[&'a DirectoryRow], index: usize) -> Option<&'a str> {
    projected.get(index).map(|row| row.key())
}

/// Human ordering for display text: case-folded first, then by code point so
/// the result is total and deterministic.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;

    fn row(id: &str, first: &str, last: &str, dept: &str, active: bool) -> DirectoryRow {
        DirectoryRow {
            id: id.to_string(),
            first_name: Field::from(first),
            middle_name: Field::NotAvailable,
            last_name: Field::from(last),
            department: Field::from(dept),
            is_active: active,
            manager: Field::NotAvailable,
        }
    }

    fn sample() -> Vec<DirectoryRow> {
        vec![
            row("e1", "jo", "Lee", "Eng", true),
            row("e2", "Ana", "Diaz", "Sales", false),
            row("e3", "Bo", "Kim", "Eng", true),
            row("e4", "Cy", "Abe", "Ops", true),
        ]
    }

    fn ids(rows: &[&DirectoryRow]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_keeps_all() {
        let rows = sample();
        assert_eq!(filter(&rows, "").len(), 4);
        assert_eq!(filter(&rows, "   ").len(), 4);
    }

    #[test]
    fn test_filter_case_insensitive_and_trimmed() {
        let rows = sample();
        assert_eq!(ids(&filter(&rows, "  ENG ")), vec!["e1", "e3"]);
        assert_eq!(ids(&filter(&rows, "diaz")), vec!["e2"]);
    }

    #[test]
    fn test_filter_matches_id_and_status() {
        let rows = sample();
        assert_eq!(ids(&filter(&rows, "e4")), vec!["e4"]);
        assert_eq!(ids(&filter(&rows, "false")), vec!["e2"]);
    }

    #[test]
    fn test_filter_results_contain_query() {
        let rows = sample();
        for query in ["e", "o", "LEE", "s", "zzz", "tru"] {
            let result = filter(&rows, query);
            assert!(result.len() <= rows.len());
            let q = query.trim().to_lowercase();
            for r in result {
                assert!(searchable_text(r).iter().any(|t| t.to_lowercase().contains(&q)));
            }
        }
    }

    #[test]
    fn test_sort_ascending_ignores_case() {
        let rows = sample();
        let state = TableState {
            sort_by: Some(Column::FirstName),
            ..TableState::default()
        };
        // "jo" sorts after "Cy" despite the lowercase first letter
        assert_eq!(ids(&project(&rows, &state)), vec!["e2", "e3", "e4", "e1"]);
    }

    #[test]
    fn test_no_sort_keeps_source_order() {
        let rows = sample();
        let state = TableState::default();
        assert_eq!(ids(&project(&rows, &state)), vec!["e1", "e2", "e3", "e4"]);
    }

    #[test]
    fn test_project_is_idempotent_and_pure() {
        let rows = sample();
        let before = rows.clone();
        let state = TableState {
            sort_by: Some(Column::Department),
            reversed: true,
            search: "e".into(),
        };
        let first = project(&rows, &state);
        let second = project(&rows, &state);
        assert_eq!(first, second);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_sort_toggle_law() {
        let rows = sample();
        let mut state = TableState::default();

        state.click(Column::Department);
        assert_eq!(state.sort_by, Some(Column::Department));
        assert!(!state.reversed);
        let ascending = ids(&state.project(&rows));
        assert_eq!(ascending, vec!["e1", "e3", "e4", "e2"]);

        state.click(Column::Department);
        assert!(state.reversed);
        let mut descending = ids(&state.project(&rows));
        descending.reverse();
        assert_eq!(descending, ascending);

        state.click(Column::LastName);
        assert_eq!(state.sort_by, Some(Column::LastName));
        assert!(!state.reversed);
        assert_eq!(ids(&state.project(&rows)), vec!["e4", "e2", "e3", "e1"]);
    }

    #[test]
    fn test_next_sort_transitions() {
        assert_eq!(next_sort(None, false, Column::Status), (Column::Status, false));
        assert_eq!(next_sort(None, true, Column::Status), (Column::Status, false));
        assert_eq!(
            next_sort(Some(Column::Status), false, Column::Status),
            (Column::Status, true)
        );
        assert_eq!(
            next_sort(Some(Column::Status), true, Column::Manager),
            (Column::Manager, false)
        );
    }

    #[test]
    fn test_status_sort_puts_inactive_first() {
        let rows = sample();
        let mut projected = filter(&rows, "");
        sort(&mut projected, Column::Status, false);
        assert_eq!(projected[0].id, "e2");
    }

    #[test]
    fn test_filter_then_sort() {
        let rows = sample();
        let state = TableState {
            sort_by: Some(Column::LastName),
            reversed: false,
            search: "eng".into(),
        };
        assert_eq!(ids(&project(&rows, &state)), vec!["e3", "e1"]);
    }

    #[test]
    fn test_activate() {
        let rows = sample();
        let projected = filter(&rows, "sales");
        assert_eq!(activate(&projected, 0), Some("e2"));
        assert_eq!(activate(&projected, 1), None);

        let none = filter(&rows, "nobody");
        assert!(none.is_empty());
        assert_eq!(activate(&none, 0), None);
    }

    #[test]
    fn test_missing_fields_sort_first() {
        let mut rows = sample();
        rows[3].department = Field::NotAvailable;
        let mut projected = filter(&rows, "");
        sort(&mut projected, Column::Department, false);
        assert_eq!(projected[0].id, "e4");
    }

    #[test]
    fn test_column_parse() {
        assert_eq!(Column::parse("first_name"), Some(Column::FirstName));
        assert_eq!(Column::parse("Last-Name"), Some(Column::LastName));
        assert_eq!(Column::parse("dept"), Some(Column::Department));
        assert_eq!(Column::parse("is_active"), Some(Column::Status));
        assert_eq!(Column::parse("salary"), None);
    }

    #[test]
    fn test_collate() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("B", "b"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }
}
