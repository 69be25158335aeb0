// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers
//!
//! Thin request/response plumbing over the engine. The authentication
//! middleware in front of this service resolves the caller and injects
//! the scope headers read by [`caller_scope`]; the handlers trust them.

use crate::error::ApiError;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use fedreg_core::{ApplicantProfile, CallerScope, EntryKind};
use fedreg_engine::{import_rows, Registry, RowOutcome};
use fedreg_render::FormRenderer;
use fedreg_storage::EntryStore;
use std::collections::HashMap;

/// Shared handler state
#[derive(Clone)]
pub struct AppState<S, R> {
    pub registry: Registry<S, R>,
}

/// Resolve the caller's scope from the headers the auth middleware set.
///
/// The global scope is granted only to an explicit `super` role. An
/// absent or unrecognized role, like a role header with missing
/// geography, resolves to an empty scope that permits nothing — fail
/// closed rather than widen.
pub fn caller_scope(headers: &HeaderMap) -> CallerScope {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    match headers
        .get("x-auth-role")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
    {
        "super" => CallerScope::Global,
        "state" => CallerScope::State {
            state: header("x-auth-state"),
        },
        "district" => CallerScope::District {
            state: header("x-auth-state"),
            district: header("x-auth-district"),
        },
        // Empty geography can never match a real record.
        _ => CallerScope::District {
            state: String::new(),
            district: String::new(),
        },
    }
}

fn parse_kind(kind: &str) -> Result<EntryKind, ApiError> {
    kind.parse().map_err(|_| ApiError::unknown_kind(kind))
}

pub async fn create_entry<S: EntryStore, R: FormRenderer>(
    State(state): State<AppState<S, R>>,
    Path(kind): Path<String>,
    Json(profile): Json<ApplicantProfile>,
) -> Result<impl IntoResponse, ApiError> {
    let pipeline = state.registry.pipeline(parse_kind(&kind)?);

    // Run on a detached task so a caller disconnect cannot cancel the
    // pipeline between allocation and persistence.
    let created = tokio::spawn(async move { pipeline.register(profile).await })
        .await
        .map_err(|_| ApiError::Internal)??;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_entry<S: EntryStore, R: FormRenderer>(
    State(state): State<AppState<S, R>>,
    Path((kind, entry_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .registry
        .get_entry(parse_kind(&kind)?, &entry_id, &caller_scope(&headers))
        .await?;
    Ok(Json(record))
}

pub async fn delete_entry<S: EntryStore, R: FormRenderer>(
    State(state): State<AppState<S, R>>,
    Path((kind, entry_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    state
        .registry
        .delete_entry(parse_kind(&kind)?, &entry_id, &caller_scope(&headers))
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn list_entries<S: EntryStore, R: FormRenderer>(
    State(state): State<AppState<S, R>>,
    Path(kind): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let records = state
        .registry
        .list_entries(parse_kind(&kind)?, &caller_scope(&headers))
        .await?;
    Ok(Json(records))
}

pub async fn stats<S: EntryStore, R: FormRenderer>(
    State(state): State<AppState<S, R>>,
    Path(kind): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state
        .registry
        .stats(parse_kind(&kind)?, &caller_scope(&headers))
        .await?;
    Ok(Json(stats))
}

pub async fn import<S: EntryStore, R: FormRenderer>(
    State(state): State<AppState<S, R>>,
    Path(kind): Path<String>,
    Json(rows): Json<Vec<HashMap<String, String>>>,
) -> Result<Json<Vec<RowOutcome>>, ApiError> {
    let pipeline = state.registry.pipeline(parse_kind(&kind)?);

    let outcomes = tokio::spawn(async move { import_rows(&pipeline, &rows).await })
        .await
        .map_err(|_| ApiError::Internal)?;

    Ok(Json(outcomes))
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
