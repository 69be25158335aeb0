// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Query operations over registered entries
//!
//! Everything here is scope-filtered: a caller scoped to one district
//! can neither read, list, count, nor delete records outside it, and an
//! out-of-scope record is indistinguishable from a missing one.

use crate::error::EngineError;
use crate::pipeline::RegistrationPipeline;
use fedreg_core::{CallerScope, EntryKind, EntryRecord, EntryStats};
use fedreg_render::FormRenderer;
use fedreg_storage::EntryStore;

/// Store-backed entry service shared by the HTTP handlers
#[derive(Clone)]
pub struct Registry<S, R> {
    store: S,
    renderer: R,
}

impl<S, R> Registry<S, R>
where
    S: EntryStore,
    R: FormRenderer,
{
    pub fn new(store: S, renderer: R) -> Self {
        Self { store, renderer }
    }

    /// The registration pipeline for one entry kind
    pub fn pipeline(&self, kind: EntryKind) -> RegistrationPipeline<S, R> {
        RegistrationPipeline::new(kind, self.store.clone(), self.renderer.clone())
    }

    pub async fn get_entry(
        &self,
        kind: EntryKind,
        entry_id: &str,
        scope: &CallerScope,
    ) -> Result<EntryRecord, EngineError> {
        match self.store.get(kind, entry_id).await? {
            Some(record) if scope.permits(&record) => Ok(record),
            _ => Err(EngineError::NotFound(entry_id.to_string())),
        }
    }

    pub async fn delete_entry(
        &self,
        kind: EntryKind,
        entry_id: &str,
        scope: &CallerScope,
    ) -> Result<(), EngineError> {
        // Resolve through the scope first so deletion cannot confirm the
        // existence of an out-of-scope record.
        self.get_entry(kind, entry_id, scope).await?;
        if self.store.delete(kind, entry_id).await? {
            tracing::info!(kind = %kind, entry_id, "entry deleted");
            Ok(())
        } else {
            Err(EngineError::NotFound(entry_id.to_string()))
        }
    }

    pub async fn list_entries(
        &self,
        kind: EntryKind,
        scope: &CallerScope,
    ) -> Result<Vec<EntryRecord>, EngineError> {
        let records = self.store.list(kind).await?;
        Ok(records.into_iter().filter(|r| scope.permits(r)).collect())
    }

    pub async fn stats(
        &self,
        kind: EntryKind,
        scope: &CallerScope,
    ) -> Result<EntryStats, EngineError> {
        let mut stats = EntryStats::default();
        for record in self.list_entries(kind, scope).await? {
            stats.add(&record);
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
