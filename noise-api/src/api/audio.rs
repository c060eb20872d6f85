//! Audio file listing
//!
//! Lists playable files in the data directory. The files themselves are
//! served under `/data` by the router.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use noise_common::api::AudioItem;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Extensions treated as audio (compared case-insensitively)
const AUDIO_EXTENSIONS: [&str; 3] = ["mp3", "wav", "ogg"];

/// GET /api/v1/audio
pub async fn list_audio_files(State(state): State<AppState>) -> ApiResult<Json<Vec<AudioItem>>> {
    let items = scan_audio_dir(&state.data_dir).await?;
    Ok(Json(items))
}

/// Scan `dir` for audio files, sorted by filename with 1-based ids
pub async fn scan_audio_dir(dir: &Path) -> ApiResult<Vec<AudioItem>> {
    let is_dir = tokio::fs::metadata(dir)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !is_dir {
        warn!("Data directory missing: {}", dir.display());
        return Err(ApiError::Internal("data directory missing".to_string()));
    }

    let mut filenames = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_audio_file(&path) {
            continue;
        }
        // Follows symlinks, so linked audio files are listed too
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => filenames.push(name),
            Err(raw) => warn!("Skipping non UTF-8 filename: {:?}", raw),
        }
    }

    filenames.sort();

    Ok(filenames
        .into_iter()
        .enumerate()
        .map(|(index, filename)| audio_item(index as u64 + 1, filename))
        .collect())
}

/// Guard for the `/data` file service
///
/// The data directory may also hold the catalog database and its WAL
/// files; only audio files are ever served from it.
pub async fn audio_files_only(request: Request, next: Next) -> Response {
    if is_audio_file(Path::new(request.uri().path())) {
        next.run(request).await
    } else {
        debug!("Refusing non-audio file request: {}", request.uri().path());
        ApiError::NotFound("not found".to_string()).into_response()
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn audio_item(id: u64, filename: String) -> AudioItem {
    let name = Path::new(&filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(&filename)
        .to_string();

    AudioItem {
        id,
        url: format!("/data/{}", filename),
        name,
        filename,
    }
}
