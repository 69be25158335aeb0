//! Identifier allocation specs
//!
//! Sequences are independent per kind, strictly increasing, and keep
//! their formatting rules under concurrency.

use crate::prelude::*;
use std::collections::HashSet;

#[tokio::test]
async fn each_kind_has_its_own_sequence() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());

    let cadet = registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Anita Rao", "Ernakulam", ""))
        .await
        .unwrap();
    let poomsae = registry
        .pipeline(EntryKind::Poomsae)
        .register(profile("Meera Nair", "Kollam", ""))
        .await
        .unwrap();
    let certificate = registry
        .pipeline(EntryKind::Certificate)
        .register(profile("Devi Menon", "Thrissur", ""))
        .await
        .unwrap();

    assert_eq!(cadet.entry_id, "CAD-000001");
    assert_eq!(poomsae.entry_id, "PMS-000001");
    assert_eq!(certificate.entry_id, "000-000-001");

    // A second cadet continues the cadet sequence only.
    let second = registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Lakshmi Pillai", "Kannur", ""))
        .await
        .unwrap();
    assert_eq!(second.entry_id, "CAD-000002");
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_registrations_get_unique_ids() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());

    let mut handles = Vec::new();
    for i in 0..16 {
        let pipeline = registry.pipeline(EntryKind::Cadet);
        handles.push(tokio::spawn(async move {
            pipeline
                .register(profile(&format!("Applicant {i}"), "Ernakulam", ""))
                .await
                .unwrap()
                .entry_id
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        let entry_id = handle.await.unwrap();
        assert!(seen.insert(entry_id.clone()), "duplicate id {entry_id}");
    }
    assert_eq!(seen.len(), 16);

    let listed = registry
        .list_entries(EntryKind::Cadet, &CallerScope::Global)
        .await
        .unwrap();
    assert_eq!(listed.len(), 16);
}

#[tokio::test]
async fn sequence_continues_after_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let registry = registry(temp.path());
        let pipeline = registry.pipeline(EntryKind::Cadet);
        for i in 0..3 {
            pipeline
                .register(profile(&format!("Applicant {i}"), "Ernakulam", ""))
                .await
                .unwrap();
        }
    }

    let registry = registry(temp.path());
    let next = registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Anita Rao", "Ernakulam", ""))
        .await
        .unwrap();
    assert_eq!(next.entry_id, "CAD-000004");
}

#[tokio::test]
async fn deleting_an_entry_never_reissues_its_id() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());
    let pipeline = registry.pipeline(EntryKind::Cadet);

    let first = pipeline
        .register(profile("Anita Rao", "Ernakulam", ""))
        .await
        .unwrap();
    registry
        .delete_entry(EntryKind::Cadet, &first.entry_id, &CallerScope::Global)
        .await
        .unwrap();

    let second = pipeline
        .register(profile("Meera Nair", "Kollam", ""))
        .await
        .unwrap();
    assert_eq!(second.entry_id, "CAD-000002");
}
