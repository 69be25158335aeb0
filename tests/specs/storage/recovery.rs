//! Counter recovery specs
//!
//! A store opened without counter files reseeds them from the maximum
//! identifier found in the journals, so old installations never reissue
//! identifiers that are already on printed forms.

use crate::prelude::*;
use fedreg_engine::EngineError;
use fedreg_storage::StoreError;
use std::fs;

#[tokio::test]
async fn missing_counter_is_reseeded_from_records() {
    let temp = TempDir::new().unwrap();
    {
        let registry = registry(temp.path());
        let pipeline = registry.pipeline(EntryKind::Cadet);
        for i in 0..5 {
            pipeline
                .register(profile(&format!("Applicant {i}"), "Ernakulam", ""))
                .await
                .unwrap();
        }
    }

    // Simulate an install that predates counter files.
    fs::remove_file(temp.path().join("cadet.seq")).unwrap();

    let registry = registry(temp.path());
    let next = registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Anita Rao", "Ernakulam", ""))
        .await
        .unwrap();
    assert_eq!(next.entry_id, "CAD-000006");
}

#[tokio::test]
async fn empty_store_starts_each_sequence_at_one() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());

    let created = registry
        .pipeline(EntryKind::Poomsae)
        .register(profile("Anita Rao", "Ernakulam", ""))
        .await
        .unwrap();
    assert_eq!(created.entry_id, "PMS-000001");
}

#[tokio::test]
async fn corrupt_counter_is_an_error_not_a_reset() {
    let temp = TempDir::new().unwrap();
    {
        let registry = registry(temp.path());
        registry
            .pipeline(EntryKind::Cadet)
            .register(profile("Anita Rao", "Ernakulam", ""))
            .await
            .unwrap();
    }

    fs::write(temp.path().join("cadet.seq"), "not a number\n").unwrap();

    let registry = registry(temp.path());
    let err = registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Meera Nair", "Kollam", ""))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Store(StoreError::CorruptCounter(_))
    ));
}

#[tokio::test]
async fn existing_counter_wins_over_journal_scan() {
    let temp = TempDir::new().unwrap();
    {
        let registry = registry(temp.path());
        registry
            .pipeline(EntryKind::Cadet)
            .register(profile("Anita Rao", "Ernakulam", ""))
            .await
            .unwrap();
    }

    // An operator bumped the counter past the records on disk; the
    // reopen scan must not roll it back.
    fs::write(temp.path().join("cadet.seq"), "100\n").unwrap();

    let registry = registry(temp.path());
    let next = registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Meera Nair", "Kollam", ""))
        .await
        .unwrap();
    assert_eq!(next.entry_id, "CAD-000101");
}
