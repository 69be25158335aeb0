// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bulk import
//!
//! Spreadsheet parsing happens upstream; this module takes the already
//! extracted rows and feeds them through the registration pipeline one
//! at a time, collecting a per-row outcome instead of failing the batch
//! on the first bad row.

use crate::error::EngineError;
use crate::pipeline::RegistrationPipeline;
use fedreg_core::{ApplicantProfile, Clock, CreatedEntry};
use fedreg_render::FormRenderer;
use fedreg_storage::EntryStore;
use serde::Serialize;
use std::collections::HashMap;

/// Outcome of one imported row (1-based row numbers, matching how
/// people read spreadsheets)
#[derive(Debug, Clone, Serialize)]
pub struct RowOutcome {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<CreatedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RowOutcome {
    fn ok(row: usize, entry: CreatedEntry) -> Self {
        Self {
            row,
            entry: Some(entry),
            error: None,
        }
    }

    fn failed(row: usize, error: &EngineError) -> Self {
        Self {
            row,
            entry: None,
            error: Some(error.to_string()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.entry.is_some()
    }
}

/// Register each row independently, in order
pub async fn import_rows<S, R, C>(
    pipeline: &RegistrationPipeline<S, R, C>,
    rows: &[HashMap<String, String>],
) -> Vec<RowOutcome>
where
    S: EntryStore,
    R: FormRenderer,
    C: Clock,
{
    let mut outcomes = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        let outcome = match ApplicantProfile::from_row(row) {
            Ok(profile) => match pipeline.register(profile).await {
                Ok(entry) => RowOutcome::ok(row_number, entry),
                Err(e) => RowOutcome::failed(row_number, &e),
            },
            Err(e) => RowOutcome::failed(row_number, &EngineError::Validation(e)),
        };
        outcomes.push(outcome);
    }

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    tracing::info!(
        kind = %pipeline.kind(),
        rows = rows.len(),
        failed,
        "bulk import finished"
    );

    outcomes
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
