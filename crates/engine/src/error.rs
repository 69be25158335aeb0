// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the registration engine

use fedreg_core::ValidationError;
use fedreg_render::RenderError;
use fedreg_storage::StoreError;
use thiserror::Error;

/// Errors surfaced by pipeline and query operations.
///
/// Identifier collisions never appear here — they are retried inside the
/// pipeline and either recovered silently or reported as
/// `IdentifierExhausted` once the retry bound is spent.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{field} already registered")]
    Conflict { field: &'static str },
    #[error("entry not found: {0}")]
    NotFound(String),
    #[error("could not issue a unique identifier after {attempts} attempts")]
    IdentifierExhausted { attempts: u32 },
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("storage error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateNationalId(_) => EngineError::Conflict {
                field: "national_id",
            },
            other => EngineError::Store(other),
        }
    }
}
