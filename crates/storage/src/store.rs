// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The entry store contract and its journal-backed implementation

use crate::counter::Counter;
use crate::journal::{Journal, Operation};
use async_trait::async_trait;
use fedreg_core::{parse_entry_id, EntryKind, EntryRecord};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors from store operations.
///
/// The two duplicate variants are the uniqueness-violation signals the
/// registration pipeline branches on: a duplicate entry ID is retried
/// with a fresh allocation, a duplicate natural key is not.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entry id already exists: {0}")]
    DuplicateEntryId(String),
    #[error("national id already registered: {0}")]
    DuplicateNationalId(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt counter file: {0}")]
    CorruptCounter(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable storage for registration records and sequence counters
#[async_trait]
pub trait EntryStore: Clone + Send + Sync + 'static {
    /// Issue the next value of the named sequence. Strictly increasing
    /// per name; no two callers ever receive the same value.
    async fn allocate(&self, sequence: &str) -> Result<u64, StoreError>;

    /// Persist a record, enforcing uniqueness of `entry_id` and of the
    /// non-blank natural key.
    async fn insert(&self, record: EntryRecord) -> Result<(), StoreError>;

    async fn get(&self, kind: EntryKind, entry_id: &str)
        -> Result<Option<EntryRecord>, StoreError>;

    /// Remove a record. Returns false if it did not exist.
    async fn delete(&self, kind: EntryKind, entry_id: &str) -> Result<bool, StoreError>;

    async fn list(&self, kind: EntryKind) -> Result<Vec<EntryRecord>, StoreError>;

    async fn find_by_national_id(
        &self,
        kind: EntryKind,
        national_id: &str,
    ) -> Result<Option<EntryRecord>, StoreError>;
}

#[derive(Debug)]
struct KindState {
    journal: Journal,
    records: HashMap<String, EntryRecord>,
}

#[derive(Debug)]
struct Inner {
    root: PathBuf,
    // Held for the lifetime of the store; released on drop
    _lock_file: File,
    kinds: Mutex<HashMap<EntryKind, KindState>>,
    counters: Mutex<()>,
}

/// Journal-backed store.
///
/// The store directory is taken under an exclusive advisory lock at
/// open, so exactly one process owns the journals and counters at a
/// time. A second opener gets `Unavailable` instead of silently racing.
/// Scaling past one process means putting a shared store behind the
/// `EntryStore` trait instead.
#[derive(Clone, Debug)]
pub struct JournalStore {
    inner: Arc<Inner>,
}

impl JournalStore {
    /// Open the store rooted at `root`, creating it if absent.
    ///
    /// Replays every kind's journal and seeds missing counters from the
    /// maximum identifier found in existing records, all under the
    /// directory lock so a concurrent first allocation cannot race the
    /// recovery scan.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(root)?;

        let lock_path = root.join(".lock");
        let lock_file = File::create(&lock_path)?;
        lock_file.try_lock_exclusive().map_err(|_| {
            StoreError::Unavailable(format!(
                "store already locked by another process: {}",
                root.display()
            ))
        })?;

        let mut kinds = HashMap::new();
        for kind in EntryKind::ALL {
            let path = Self::journal_path(root, kind);
            let mut records = HashMap::new();
            for op in Journal::replay(&path)? {
                match op {
                    Operation::Insert { record } => {
                        records.insert(record.entry_id.clone(), record);
                    }
                    Operation::Delete { entry_id, .. } => {
                        records.remove(&entry_id);
                    }
                }
            }

            // Recover the counter from pre-existing records if this is
            // the first open with an allocator.
            let max_issued = records
                .keys()
                .filter_map(|id| parse_entry_id(id))
                .max()
                .unwrap_or(0);
            Counter::new(Self::counter_path(root, kind.sequence_name()))
                .seed_if_missing(max_issued)?;

            let journal = Journal::open(&path)?;
            kinds.insert(kind, KindState { journal, records });
        }

        tracing::info!(root = %root.display(), "entry store opened");

        Ok(Self {
            inner: Arc::new(Inner {
                root: root.to_path_buf(),
                _lock_file: lock_file,
                kinds: Mutex::new(kinds),
                counters: Mutex::new(()),
            }),
        })
    }

    fn journal_path(root: &Path, kind: EntryKind) -> PathBuf {
        root.join(format!("{}.log", kind.sequence_name()))
    }

    fn counter_path(root: &Path, sequence: &str) -> PathBuf {
        root.join(format!("{sequence}.seq"))
    }

    /// Run store work on the blocking pool.
    ///
    /// Appends and counter writes fsync, and every operation may wait on
    /// the kinds mutex while an fsync holds it — none of that belongs on
    /// an async worker thread.
    async fn run_blocking<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Inner) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&inner))
            .await
            .map_err(|e| StoreError::Unavailable(format!("storage task failed: {e}")))?
    }
}

#[async_trait]
impl EntryStore for JournalStore {
    async fn allocate(&self, sequence: &str) -> Result<u64, StoreError> {
        let sequence = sequence.to_string();
        self.run_blocking(move |inner| {
            // The directory lock makes the increment atomic across
            // processes; this mutex serializes it within the process.
            let _guard = inner.counters.lock().unwrap_or_else(|e| e.into_inner());
            Counter::new(Self::counter_path(&inner.root, &sequence)).allocate()
        })
        .await
    }

    async fn insert(&self, record: EntryRecord) -> Result<(), StoreError> {
        self.run_blocking(move |inner| {
            let mut kinds = inner.kinds.lock().unwrap_or_else(|e| e.into_inner());
            let state = kinds.get_mut(&record.kind).ok_or_else(|| {
                StoreError::Unavailable(format!("unknown kind: {}", record.kind))
            })?;

            if state.records.contains_key(&record.entry_id) {
                return Err(StoreError::DuplicateEntryId(record.entry_id));
            }
            if let Some(key) = record.profile.natural_key() {
                if state
                    .records
                    .values()
                    .any(|r| r.profile.natural_key() == Some(key))
                {
                    return Err(StoreError::DuplicateNationalId(key.to_string()));
                }
            }

            state.journal.append(&Operation::Insert {
                record: record.clone(),
            })?;
            state.records.insert(record.entry_id.clone(), record);
            Ok(())
        })
        .await
    }

    async fn get(
        &self,
        kind: EntryKind,
        entry_id: &str,
    ) -> Result<Option<EntryRecord>, StoreError> {
        let entry_id = entry_id.to_string();
        self.run_blocking(move |inner| {
            let kinds = inner.kinds.lock().unwrap_or_else(|e| e.into_inner());
            Ok(kinds
                .get(&kind)
                .and_then(|s| s.records.get(&entry_id))
                .cloned())
        })
        .await
    }

    async fn delete(&self, kind: EntryKind, entry_id: &str) -> Result<bool, StoreError> {
        let entry_id = entry_id.to_string();
        self.run_blocking(move |inner| {
            let mut kinds = inner.kinds.lock().unwrap_or_else(|e| e.into_inner());
            let state = kinds
                .get_mut(&kind)
                .ok_or_else(|| StoreError::Unavailable(format!("unknown kind: {kind}")))?;

            if !state.records.contains_key(&entry_id) {
                return Ok(false);
            }

            state.journal.append(&Operation::Delete {
                kind,
                entry_id: entry_id.clone(),
            })?;
            state.records.remove(&entry_id);
            Ok(true)
        })
        .await
    }

    async fn list(&self, kind: EntryKind) -> Result<Vec<EntryRecord>, StoreError> {
        self.run_blocking(move |inner| {
            let kinds = inner.kinds.lock().unwrap_or_else(|e| e.into_inner());
            let mut records: Vec<_> = kinds
                .get(&kind)
                .map(|s| s.records.values().cloned().collect())
                .unwrap_or_default();
            records.sort_by(|a, b| a.entry_id.cmp(&b.entry_id));
            Ok(records)
        })
        .await
    }

    async fn find_by_national_id(
        &self,
        kind: EntryKind,
        national_id: &str,
    ) -> Result<Option<EntryRecord>, StoreError> {
        let national_id = national_id.to_string();
        self.run_blocking(move |inner| {
            let kinds = inner.kinds.lock().unwrap_or_else(|e| e.into_inner());
            Ok(kinds.get(&kind).and_then(|s| {
                s.records
                    .values()
                    .find(|r| r.profile.natural_key() == Some(national_id.as_str()))
                    .cloned()
            }))
        })
        .await
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
