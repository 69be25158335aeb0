//! Natural-key uniqueness specs

use crate::prelude::*;
use fedreg_engine::EngineError;

#[tokio::test]
async fn duplicate_national_id_is_rejected() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());
    let pipeline = registry.pipeline(EntryKind::Cadet);

    pipeline
        .register(profile("Anita Rao", "Ernakulam", "KL-77"))
        .await
        .unwrap();
    let err = pipeline
        .register(profile("Meera Nair", "Kollam", "KL-77"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Conflict {
            field: "national_id"
        }
    ));
}

#[tokio::test]
async fn duplicate_check_survives_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let registry = registry(temp.path());
        registry
            .pipeline(EntryKind::Cadet)
            .register(profile("Anita Rao", "Ernakulam", "KL-77"))
            .await
            .unwrap();
    }

    let registry = registry(temp.path());
    let err = registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Meera Nair", "Kollam", "KL-77"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict { .. }));
}

#[tokio::test]
async fn blank_national_ids_do_not_collide() {
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

    // Whitespace-only keys count as blank too.
    pipeline
        .register(profile("Devi Menon", "Thrissur", "   "))
        .await
        .unwrap();
}

#[tokio::test]
async fn same_key_is_allowed_across_kinds() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());

    registry
        .pipeline(EntryKind::Cadet)
        .register(profile("Anita Rao", "Ernakulam", "KL-77"))
        .await
        .unwrap();
    // Uniqueness is per kind; the same applicant may hold entries of
    // different kinds.
    registry
        .pipeline(EntryKind::Poomsae)
        .register(profile("Anita Rao", "Ernakulam", "KL-77"))
        .await
        .unwrap();
}

#[tokio::test]
async fn deleting_frees_the_natural_key() {
    let temp = TempDir::new().unwrap();
    let registry = registry(temp.path());
    let pipeline = registry.pipeline(EntryKind::Cadet);

    let first = pipeline
        .register(profile("Anita Rao", "Ernakulam", "KL-77"))
        .await
        .unwrap();
    registry
        .delete_entry(EntryKind::Cadet, &first.entry_id, &CallerScope::Global)
        .await
        .unwrap();

    pipeline
        .register(profile("Anita Rao", "Ernakulam", "KL-77"))
        .await
        .unwrap();
}
