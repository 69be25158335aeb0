//! Bulk import specs
//!
//! Imports run against the real store so per-row failures and the
//! records they leave behind can be checked together.

use crate::prelude::*;
use fedreg_engine::import_rows;
use std::collections::HashMap;

fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn valid_row(name: &str, national_id: &str) -> HashMap<String, String> {
    row(&[
        ("name", name),
        ("date_of_birth", "2012-03-14"),
        ("age", "13"),
        ("gender", "female"),
        ("state", "Kerala"),
        ("district", "Ernakulam"),
        ("belt_grade", "Green"),
        ("national_id", national_id),
    ])
}

#[tokio::test]
async fn bad_rows_do_not_sink_the_batch() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());
    let pipeline = registry.pipeline(EntryKind::Cadet);

    let rows = vec![
        valid_row("Anita Rao", "KL-1"),
        row(&[("name", "Missing Everything")]),
        valid_row("Meera Nair", "KL-2"),
    ];

    let outcomes = import_rows(&pipeline, &rows).await;
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].succeeded());
    assert!(!outcomes[1].succeeded());
    assert!(outcomes[2].succeeded());
    assert_eq!(outcomes[2].row, 3);

    // Only the good rows were persisted.
    let listed = registry
        .list_entries(EntryKind::Cadet, &CallerScope::Global)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn duplicate_key_inside_a_batch_fails_the_later_row() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());
    let pipeline = registry.pipeline(EntryKind::Cadet);

    let rows = vec![valid_row("Anita Rao", "KL-1"), valid_row("Meera Nair", "KL-1")];
    let outcomes = import_rows(&pipeline, &rows).await;

    assert!(outcomes[0].succeeded());
    assert!(!outcomes[1].succeeded());
    assert!(outcomes[1]
        .error
        .as_deref()
        .unwrap()
        .contains("national_id"));
}

#[tokio::test]
async fn unknown_columns_are_ignored() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());
    let pipeline = registry.pipeline(EntryKind::Cadet);

    let mut extra = valid_row("Anita Rao", "");
    extra.insert("entry_id".to_string(), "CAD-999999".to_string());
    extra.insert("status".to_string(), "approved".to_string());

    let outcomes = import_rows(&pipeline, &[extra]).await;
    assert!(outcomes[0].succeeded());
    // The injected columns never reach the record.
    let entry = outcomes[0].entry.as_ref().unwrap();
    assert_eq!(entry.entry_id, "CAD-000001");
}
