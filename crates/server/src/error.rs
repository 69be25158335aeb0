// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP error mapping
//!
//! Every failure leaves the boundary as `{ "success": false, "message": … }`
//! with a status derived from the error kind. Operational failures are
//! logged in full here and returned as generic messages — internals never
//! leak to callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fedreg_engine::EngineError;
use fedreg_storage::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn unknown_kind(kind: &str) -> Self {
        ApiError::Engine(EngineError::NotFound(format!("entry kind: {kind}")))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Engine(EngineError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Engine(EngineError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ApiError::Engine(EngineError::Conflict { .. }) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            ApiError::Engine(EngineError::IdentifierExhausted { .. }) => {
                error!(error = %self, "identifier allocation exhausted");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "could not register entry, please retry your submission".to_string(),
                )
            }
            ApiError::Engine(EngineError::Render(e)) => {
                // Deployment problem: missing template, layout, or font.
                error!(error = %e, "form rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "form generation failed".to_string(),
                )
            }
            ApiError::Engine(EngineError::Store(StoreError::Unavailable(reason))) => {
                error!(reason = %reason, "storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage unavailable".to_string(),
                )
            }
            ApiError::Engine(EngineError::Store(e)) => {
                error!(error = %e, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
            ApiError::Internal => {
                error!("request task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
