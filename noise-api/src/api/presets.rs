//! Preset endpoint

use axum::{extract::State, Json};
use noise_common::api::PresetDetail;

use crate::error::ApiResult;
use crate::{db, AppState};

/// GET /api/v1/presets
///
/// Presets in ascending id order, each entry carrying its track's name and
/// audio reference.
pub async fn list_presets(State(state): State<AppState>) -> ApiResult<Json<Vec<PresetDetail>>> {
    let presets = db::list_presets(&state.db).await?;
    Ok(Json(presets.iter().map(PresetDetail::from).collect()))
}
