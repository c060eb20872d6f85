//! Scene catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use noise_common::api::{SceneDetail, SceneListItem};
use noise_common::db::DbId;

use crate::error::{ApiError, ApiResult};
use crate::{db, AppState};

/// GET /api/v1/scenes
///
/// Scene summaries in ascending id order (tracks omitted).
pub async fn list_scenes(State(state): State<AppState>) -> ApiResult<Json<Vec<SceneListItem>>> {
    let scenes = db::list_scenes(&state.db).await?;
    Ok(Json(scenes.iter().map(SceneListItem::from).collect()))
}

/// GET /api/v1/scenes/:id
///
/// One scene with its tracks. 400 for a malformed id, 404 when absent.
pub async fn get_scene(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<SceneDetail>> {
    let id = parse_id(&raw_id).ok_or_else(|| ApiError::BadRequest("scene id invalid".to_string()))?;

    let scene = db::get_scene(&state.db, id).await?;

    Ok(Json(SceneDetail::from(&scene)))
}

/// Parse an unsigned decimal id that fits [`DbId`]
fn parse_id(raw: &str) -> Option<DbId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<DbId>().ok()
}
