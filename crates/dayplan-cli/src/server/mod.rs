//! REST API over the day store (`dp serve`).
//!
//! All bodies are camelCase JSON with `"HH:MM"` times. Failures are reported
//! as `{"error": "..."}`: 400 for bad input, 404 for unknown ids and 500 for
//! storage problems.

mod days;
mod errors;
mod events;
mod extract;
mod tasks;


use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use dayplan_core::{board::DayBoard, editor::EditorConfig, store::DayStore};
use errors::AppError;
use jiff::civil::Date;
use log::info;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: DayStore,
}

impl AppState {
    /// The schedule of `date` with its plan state restored. Event writes and
    /// replans go through it so they follow the editor's rules.
    async fn board(&self, date: Date) -> dayplan_core::Result<DayBoard<DayStore>> {
        DayBoard::open(self.store.clone(), EditorConfig::default(), date).await
    }
}

/// `{"message": "..."}` acknowledgement for deletes.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}

/// Builds the API router around `store`.
pub fn router(store: DayStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .merge(events::router())
        .merge(tasks::router())
        .merge(days::router())
        .fallback(not_found)
        .with_state(AppState { store })
        .layer(cors)
}

/// Serves the API on `bind` until Ctrl-C or SIGTERM.
pub async fn run_server(store: DayStore, bind: SocketAddr) -> Result<()> {
    info!("Using database at {}", store.database_path().display());
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    println!("dayplan API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
