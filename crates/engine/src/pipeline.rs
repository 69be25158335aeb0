// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The registration pipeline
//!
//! One instance per entry kind. A registration walks
//! validate → allocate → render → persist; only a duplicate-entry-id
//! rejection at the persist step loops back to allocation, bounded by
//! `max_attempts`. Rendering runs before persisting so a stored record
//! always points at an artifact that already exists — orphan artifacts
//! from failed attempts are tolerable, dangling records are not.

use crate::error::EngineError;
use fedreg_core::{
    ApplicantProfile, Clock, CreatedEntry, EntryKind, EntryRecord, EntryStatus, SystemClock,
};
use fedreg_render::FormRenderer;
use fedreg_storage::{EntryStore, StoreError};

/// Collision retry bound. Collisions should be statistically
/// near-impossible with an atomic allocator; hitting this bound means
/// the allocator is misconfigured, not that the caller is unlucky.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// URL mount point for rendered artifacts; must match the server's
/// static file route exactly.
pub const FORMS_MOUNT: &str = "/forms";

/// Registers entries of one kind
#[derive(Clone)]
pub struct RegistrationPipeline<S, R, C = SystemClock> {
    kind: EntryKind,
    store: S,
    renderer: R,
    clock: C,
    max_attempts: u32,
}

impl<S, R> RegistrationPipeline<S, R, SystemClock>
where
    S: EntryStore,
    R: FormRenderer,
{
    pub fn new(kind: EntryKind, store: S, renderer: R) -> Self {
        Self::with_clock(kind, store, renderer, SystemClock)
    }
}

impl<S, R, C> RegistrationPipeline<S, R, C>
where
    S: EntryStore,
    R: FormRenderer,
    C: Clock,
{
    pub fn with_clock(kind: EntryKind, store: S, renderer: R, clock: C) -> Self {
        Self {
            kind,
            store,
            renderer,
            clock,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Run one registration to completion.
    ///
    /// The natural-key pre-check here is advisory; the store's unique
    /// constraint remains authoritative when two requests race the same
    /// key past the pre-check.
    pub async fn register(&self, profile: ApplicantProfile) -> Result<CreatedEntry, EngineError> {
        profile.validate()?;

        if let Some(key) = profile.natural_key() {
            if self
                .store
                .find_by_national_id(self.kind, key)
                .await?
                .is_some()
            {
                return Err(EngineError::Conflict {
                    field: "national_id",
                });
            }
        }

        for attempt in 1..=self.max_attempts {
            let value = self.store.allocate(self.kind.sequence_name()).await?;
            let entry_id = self.kind.format_id(value);

            let artifact = self
                .renderer
                .render(self.kind, &entry_id, &profile.render_values())
                .await?;

            let created_at = self.clock.now();
            let record = EntryRecord {
                entry_id: entry_id.clone(),
                kind: self.kind,
                profile: profile.clone(),
                status: EntryStatus::Pending,
                form_file: artifact.file_name.clone(),
                created_at,
            };

            match self.store.insert(record).await {
                Ok(()) => {
                    tracing::info!(kind = %self.kind, entry_id = %entry_id, "entry registered");
                    return Ok(CreatedEntry {
                        download_url: format!("{FORMS_MOUNT}/{}", artifact.file_name),
                        entry_id,
                        form_file: artifact.file_name,
                        created_at,
                    });
                }
                Err(StoreError::DuplicateEntryId(id)) => {
                    // The identifier lost a race; the allocated value and
                    // rendered artifact become an accepted gap/orphan.
                    tracing::warn!(
                        kind = %self.kind,
                        entry_id = %id,
                        attempt,
                        "identifier collision, reallocating"
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::error!(
            kind = %self.kind,
            attempts = self.max_attempts,
            "identifier allocation exhausted; allocator likely misconfigured"
        );
        Err(EngineError::IdentifierExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
