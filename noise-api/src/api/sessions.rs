//! Listening session endpoint
//!
//! Sessions are logged and echoed back; nothing is written to storage.

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use noise_common::api::{SessionRecorded, SessionRequest};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};

/// POST /api/v1/listening-session
///
/// 202 with `{status: "recorded", session: <echo>}`; 400 when the body is
/// not valid JSON or lacks `sceneId`.
pub async fn record_session(
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SessionRecorded>)> {
    let Json(session) = payload.map_err(|rejection| {
        debug!("Rejected listening session payload: {}", rejection.body_text());
        ApiError::BadRequest("invalid payload".to_string())
    })?;

    info!(
        scene_id = session.scene_id,
        preset_id = ?session.preset_id,
        duration_minutes = ?session.duration_minutes,
        "Listening session recorded"
    );

    Ok((StatusCode::ACCEPTED, Json(SessionRecorded::new(session))))
}
