//! HTTP API handlers for noise-api

pub mod audio;
pub mod cors;
pub mod health;
pub mod presets;
pub mod scenes;
pub mod sessions;

pub use audio::{audio_files_only, list_audio_files};
pub use cors::cors_middleware;
pub use health::health_routes;
pub use presets::list_presets;
pub use scenes::{get_scene, list_scenes};
pub use sessions::record_session;

use crate::error::ApiError;

/// Fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound("not found".to_string())
}
