//! Registration lifecycle specs
//!
//! Register, read back, list, count, delete — and survive a restart.

use crate::prelude::*;
use fedreg_core::EntryStatus;
use fedreg_engine::EngineError;

#[tokio::test]
async fn register_then_read_back() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());

    let created = registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Anita Rao", "Ernakulam", "KL-77"))
        .await
        .unwrap();
    assert_eq!(created.entry_id, "CAD-000001");
    assert_eq!(created.download_url, format!("/forms/{}", created.form_file));

    let record = registry
        .get_entry(EntryKind::Cadet, &created.entry_id, &CallerScope::Global)
        .await
        .unwrap();
    assert_eq!(record.profile.name, "Anita Rao");
    assert_eq!(record.status, EntryStatus::Pending);
    assert_eq!(record.form_file, created.form_file);
}

#[tokio::test]
async fn list_and_stats_respect_scope() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());
    let pipeline = registry.pipeline(EntryKind::Cadet);

    pipeline
        .register(profile("Anita Rao", "Ernakulam", ""))
        .await
        .unwrap();
    pipeline
        .register(profile("Meera Nair", "Kollam", ""))
        .await
        .unwrap();

    let scoped = CallerScope::District {
        state: "Kerala".to_string(),
        district: "Kollam".to_string(),
    };
    let listed = registry
        .list_entries(EntryKind::Cadet, &scoped)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].profile.district, "Kollam");

    let stats = registry.stats(EntryKind::Cadet, &scoped).await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.pending, 1);
    assert!(!stats.by_district.contains_key("Ernakulam"));
}

#[tokio::test]
async fn out_of_scope_record_reads_as_missing() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());

    let created = registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Anita Rao", "Ernakulam", ""))
        .await
        .unwrap();

    let other = CallerScope::District {
        state: "Kerala".to_string(),
        district: "Kollam".to_string(),
    };
    let err = registry
        .get_entry(EntryKind::Cadet, &created.entry_id, &other)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));

    // Deletion through the wrong scope must not confirm existence either.
    let err = registry
        .delete_entry(EntryKind::Cadet, &created.entry_id, &other)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());

    let created = registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Anita Rao", "Ernakulam", ""))
        .await
        .unwrap();

    registry
        .delete_entry(EntryKind::Cadet, &created.entry_id, &CallerScope::Global)
        .await
        .unwrap();

    let err = registry
        .get_entry(EntryKind::Cadet, &created.entry_id, &CallerScope::Global)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn records_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let entry_id = {
        let registry = registry(temp.path());
        let created = registry
            .pipeline(EntryKind::Cadet)
            .register(profile("Anita Rao", "Ernakulam", "KL-77"))
            .await
            .unwrap();
        created.entry_id
    };

    // First store dropped; reopen replays the journal.
    let registry = registry(temp.path());
    let record = registry
        .get_entry(EntryKind::Cadet, &entry_id, &CallerScope::Global)
        .await
        .unwrap();
    assert_eq!(record.profile.national_id.as_deref(), Some("KL-77"));
}

#[tokio::test]
async fn deletes_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let entry_id = {
        let registry = registry(temp.path());
        let created = registry
            .pipeline(EntryKind::Cadet)
            .register(profile("Anita Rao", "Ernakulam", ""))
            .await
            .unwrap();
        registry
            .delete_entry(EntryKind::Cadet, &created.entry_id, &CallerScope::Global)
            .await
            .unwrap();
        created.entry_id
    };

    let registry = registry(temp.path());
    let err = registry
        .get_entry(EntryKind::Cadet, &entry_id, &CallerScope::Global)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}
