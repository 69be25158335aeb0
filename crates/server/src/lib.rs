// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! fedreg-server: HTTP surface of the federation registry
//!
//! Routes, scope extraction, error mapping, and static serving of
//! rendered forms. The interesting work happens in `fedreg-engine`;
//! this crate is request/response plumbing.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod error;
pub mod routes;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use fedreg_engine::Registry;
use fedreg_render::{FormRenderer, ImageRenderer, RenderConfig, RenderError};
use fedreg_storage::{EntryStore, JournalStore, StoreError};
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

pub use config::Config;
pub use fedreg_engine::FORMS_MOUNT;
pub use routes::{caller_scope, AppState};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Build the application router over any store/renderer pair
pub fn router<S: EntryStore, R: FormRenderer>(state: AppState<S, R>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/entries/{kind}", post(routes::create_entry::<S, R>))
        .route("/api/entries/{kind}", get(routes::list_entries::<S, R>))
        .route(
            "/api/entries/{kind}/{entry_id}",
            get(routes::get_entry::<S, R>).delete(routes::delete_entry::<S, R>),
        )
        .route("/api/entries/{kind}/import", post(routes::import::<S, R>))
        .route("/api/stats/{kind}", get(routes::stats::<S, R>))
        .layer(cors)
        .with_state(state)
}

/// Open the store and renderer, then serve until shutdown
pub async fn run(config: Config) -> Result<(), ServerError> {
    info!("Initializing store at {}", config.data_dir.display());
    let store = JournalStore::open(&config.data_dir)?;

    let renderer = ImageRenderer::new(RenderConfig {
        assets_dir: config.assets_dir.clone(),
        output_dir: config.output_dir.clone(),
        font_file: config.font_file.clone(),
    })?;

    let state = AppState {
        registry: Registry::new(store, renderer),
    };

    let app = router(state).nest_service(FORMS_MOUNT, ServeDir::new(&config.output_dir));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}
