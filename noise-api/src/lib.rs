//! noise-api library - environment noise catalog service
//!
//! Serves the seeded scene/track/preset catalog over HTTP, accepts
//! listening session reports, and exposes the audio files in the data
//! directory.

use axum::{
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod db;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog database pool
    pub db: SqlitePool,
    /// Directory listed by `/api/v1/audio` and served under `/data`
    pub data_dir: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, data_dir: PathBuf) -> Self {
        Self { db, data_dir }
    }
}

/// Build application router
///
/// CORS headers are added to every response, including errors and unknown
/// paths; OPTIONS is answered with 204 before routing.
pub fn build_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/scenes", get(api::list_scenes))
        .route("/scenes/:id", get(api::get_scene))
        .route("/presets", get(api::list_presets))
        .route("/listening-session", post(api::record_session))
        .route("/audio", get(api::list_audio_files));

    // Audio files only; the database may live in the same directory
    let audio_files = Router::new()
        .route_service(
            "/*path",
            ServeDir::new(&state.data_dir).not_found_service(api::not_found.into_service()),
        )
        .layer(middleware::from_fn(api::audio_files_only));

    Router::new()
        .nest("/api/v1", catalog)
        .merge(api::health_routes())
        .nest("/data", audio_files)
        .fallback(api::not_found)
        .with_state(state)
        .layer(middleware::from_fn(api::cors_middleware))
        .layer(TraceLayer::new_for_http())
}
