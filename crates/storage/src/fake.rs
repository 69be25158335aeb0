// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake entry store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::store::{EntryStore, StoreError};
use async_trait::async_trait;
use fedreg_core::{EntryKind, EntryRecord};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Recorded store call
#[derive(Debug, Clone)]
pub enum StoreCall {
    Allocate { sequence: String },
    Insert { entry_id: String },
    Get { entry_id: String },
    Delete { entry_id: String },
    List { kind: EntryKind },
    FindByNationalId { national_id: String },
}

/// Failure to inject into the next insert call(s)
#[derive(Debug, Clone)]
pub enum PlannedFailure {
    DuplicateEntryId,
    DuplicateNationalId,
    Unavailable,
}

#[derive(Default)]
struct FakeState {
    counters: HashMap<String, u64>,
    records: HashMap<EntryKind, HashMap<String, EntryRecord>>,
    calls: Vec<StoreCall>,
    insert_failures: VecDeque<PlannedFailure>,
}

/// In-memory store with call recording and failure injection.
///
/// Planned failures are consumed by `insert` in FIFO order before the
/// normal uniqueness checks run — this is how pipeline tests simulate
/// identifier collisions raced in by another writer.
#[derive(Clone, Default)]
pub struct FakeEntryStore {
    state: Arc<Mutex<FakeState>>,
}

impl FakeEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for a future insert call
    pub fn fail_next_insert(&self, failure: PlannedFailure) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert_failures
            .push_back(failure);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Number of records currently held for a kind
    pub fn record_count(&self, kind: EntryKind) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .records
            .get(&kind)
            .map_or(0, HashMap::len)
    }
}

#[async_trait]
impl EntryStore for FakeEntryStore {
    async fn allocate(&self, sequence: &str) -> Result<u64, StoreError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(StoreCall::Allocate {
            sequence: sequence.to_string(),
        });
        let value = state.counters.entry(sequence.to_string()).or_default();
        *value += 1;
        Ok(*value)
    }

    async fn insert(&self, record: EntryRecord) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(StoreCall::Insert {
            entry_id: record.entry_id.clone(),
        });

        if let Some(failure) = state.insert_failures.pop_front() {
            return Err(match failure {
                PlannedFailure::DuplicateEntryId => {
                    StoreError::DuplicateEntryId(record.entry_id)
                }
                PlannedFailure::DuplicateNationalId => StoreError::DuplicateNationalId(
                    record.profile.natural_key().unwrap_or("").to_string(),
                ),
                PlannedFailure::Unavailable => {
                    StoreError::Unavailable("injected".to_string())
                }
            });
        }

        let records = state.records.entry(record.kind).or_default();
        if records.contains_key(&record.entry_id) {
            return Err(StoreError::DuplicateEntryId(record.entry_id));
        }
        if let Some(key) = record.profile.natural_key() {
            if records
                .values()
                .any(|r| r.profile.natural_key() == Some(key))
            {
                return Err(StoreError::DuplicateNationalId(key.to_string()));
            }
        }
        records.insert(record.entry_id.clone(), record);
        Ok(())
    }

    async fn get(
        &self,
        kind: EntryKind,
        entry_id: &str,
    ) -> Result<Option<EntryRecord>, StoreError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(StoreCall::Get {
            entry_id: entry_id.to_string(),
        });
        Ok(state
            .records
            .get(&kind)
            .and_then(|r| r.get(entry_id))
            .cloned())
    }

    async fn delete(&self, kind: EntryKind, entry_id: &str) -> Result<bool, StoreError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(StoreCall::Delete {
            entry_id: entry_id.to_string(),
        });
        Ok(state
            .records
            .get_mut(&kind)
            .is_some_and(|r| r.remove(entry_id).is_some()))
    }

    async fn list(&self, kind: EntryKind) -> Result<Vec<EntryRecord>, StoreError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(StoreCall::List { kind });
        let mut records: Vec<_> = state
            .records
            .get(&kind)
            .map(|r| r.values().cloned().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| a.entry_id.cmp(&b.entry_id));
        Ok(records)
    }

    async fn find_by_national_id(
        &self,
        kind: EntryKind,
        national_id: &str,
    ) -> Result<Option<EntryRecord>, StoreError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(StoreCall::FindByNationalId {
            national_id: national_id.to_string(),
        });
        Ok(state.records.get(&kind).and_then(|r| {
            r.values()
                .find(|rec| rec.profile.natural_key() == Some(national_id))
                .cloned()
        }))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
