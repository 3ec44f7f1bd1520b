use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::field::Field;
use crate::api::types::{RawDirectory, RawDirectoryIndividual};

/// One employee summary line in the directory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRow {
    pub id: String,
    pub first_name: Field,
    pub middle_name: Field,
    pub last_name: Field,
    pub department: Field,
    pub is_active: bool,
    /// "First Last" of this employee's manager, when the manager is in the same batch
    pub manager: Field,
}

impl DirectoryRow {
    /// Key used to identify the row on activation.
    pub fn key(&self) -> &str {
        &self.id
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }

    /// "First Last", or whichever part exists.
    pub fn full_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    match (first, last) {
        (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
        (Some(f), None) => Some(f.to_string()),
        (None, Some(l)) => Some(l.to_string()),
        (None, None) => None,
    }
}

/// Build directory rows from a raw directory batch.
///
/// Individuals without an id cannot be selected and are skipped. Managers are
/// resolved through an id index built once for the batch.
pub fn rows_from_raw(raw: RawDirectory) -> Vec<DirectoryRow> {
    let individuals = raw.individuals.unwrap_or_default();

    let index: HashMap<&str, &RawDirectoryIndividual> = individuals
        .iter()
        .filter_map(|ind| ind.id.as_deref().map(|id| (id, ind)))
        .collect();

    let rows: Vec<DirectoryRow> = individuals
        .iter()
        .filter_map(|ind| {
            let id = ind.id.clone().filter(|id| !id.is_empty())?;
            let manager = ind
                .manager
                .as_ref()
                .and_then(|m| m.id.as_deref())
                .and_then(|manager_id| index.get(manager_id))
                .and_then(|m| join_name(m.first_name.as_deref(), m.last_name.as_deref()));

            Some(DirectoryRow {
                id,
                first_name: ind.first_name.clone().into(),
                middle_name: ind.middle_name.clone().into(),
                last_name: ind.last_name.clone().into(),
                department: ind
                    .department
                    .as_ref()
                    .and_then(|d| d.name.clone())
                    .into(),
                is_active: ind.is_active.unwrap_or(false),
                manager: manager.into(),
            })
        })
        .collect();

    if rows.len() < individuals.len() {
        tracing::debug!(
            skipped = individuals.len() - rows.len(),
            "Skipped directory entries without an id"
        );
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawDirectory {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_single_row() {
        let rows = rows_from_raw(parse(
            r#"{"individuals":[{"id":"e1","first_name":"Jo","last_name":"Lee","department":{"name":"Eng"},"is_active":true}]}"#,
        ));
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.key(), "e1");
        assert_eq!(row.first_name.to_string(), "Jo");
        assert_eq!(row.last_name.to_string(), "Lee");
        assert_eq!(row.department.to_string(), "Eng");
        assert_eq!(row.status_label(), "Active");
        assert_eq!(row.manager, Field::NotAvailable);
        assert_eq!(row.middle_name, Field::NotAvailable);
    }

    #[test]
    fn test_manager_resolved_within_batch() {
        let rows = rows_from_raw(parse(
            r#"{"individuals":[
                {"id":"e1","first_name":"Jo","last_name":"Lee","manager":{"id":"m1"}},
                {"id":"m1","first_name":"Ana","last_name":"Diaz"},
                {"id":"e2","first_name":"Sam","manager":{"id":"gone"}}
            ]}"#,
        ));
        assert_eq!(rows[0].manager, Field::from("Ana Diaz"));
        assert_eq!(rows[1].manager, Field::NotAvailable);
        assert_eq!(rows[2].manager, Field::NotAvailable);
    }

    #[test]
    fn test_missing_individuals_is_empty() {
        assert!(rows_from_raw(parse("{}")).is_empty());
        assert!(rows_from_raw(parse(r#"{"individuals":null}"#)).is_empty());
    }

    #[test]
    fn test_missing_department_and_status() {
        let rows = rows_from_raw(parse(r#"{"individuals":[{"id":"e1","department":null}]}"#));
        assert_eq!(rows[0].department, Field::NotAvailable);
        assert!(!rows[0].is_active);
        assert_eq!(rows[0].status_label(), "Inactive");
    }

    #[test]
    fn test_entries_without_id_skipped() {
        let rows = rows_from_raw(parse(
            r#"{"individuals":[{"first_name":"Ghost"},{"id":"e1","first_name":"Jo"}]}"#,
        ));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "e1");
    }

    #[test]
    fn test_full_name() {
        let rows = rows_from_raw(parse(
            r#"{"individuals":[{"id":"a","first_name":"Jo"},{"id":"b"}]}"#,
        ));
        assert_eq!(rows[0].full_name().as_deref(), Some("Jo"));
        assert_eq!(rows[1].full_name(), None);
    }
}
