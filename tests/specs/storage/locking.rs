//! Store locking specs
//!
//! One process owns a store directory at a time.

use crate::prelude::*;
use fedreg_storage::StoreError;

#[test]
fn second_opener_is_turned_away() {
    let temp = TempDir::new().unwrap();
    let first = JournalStore::open(temp.path()).unwrap();

    let err = JournalStore::open(temp.path()).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));

    drop(first);
    // Lock released with the store; reopening now succeeds.
    JournalStore::open(temp.path()).unwrap();
}

#[test]
fn clones_share_one_lock() {
    let temp = TempDir::new().unwrap();
    let first = JournalStore::open(temp.path()).unwrap();
    let clone = first.clone();
    drop(first);

    // The clone still holds the directory.
    let err = JournalStore::open(temp.path()).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));

    drop(clone);
    JournalStore::open(temp.path()).unwrap();
}
