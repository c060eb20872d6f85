//! Shared API request/response types
//!
//! External JSON shapes of the catalog API and their projections from the
//! entity model. Field names are camelCase on the wire.

use crate::db::models::{DbId, Preset, PresetTrack, Scene, Track};
use serde::{Deserialize, Serialize};

// ========================================
// Scene Views
// ========================================

/// Entry of `GET /api/v1/scenes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneListItem {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub cover_url: String,
    pub atmosphere: String,
}

/// Body of `GET /api/v1/scenes/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDetail {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub cover_url: String,
    pub atmosphere: String,
    pub tracks: Vec<TrackDetail>,
}

/// Track as shown inside a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDetail {
    pub id: DbId,
    pub name: String,
    pub audio_url: String,
    pub default_volume: f64,
}

impl From<&Scene> for SceneListItem {
    fn from(scene: &Scene) -> Self {
        Self {
            id: scene.id,
            name: scene.name.clone(),
            description: scene.description.clone(),
            cover_url: scene.cover_url.clone(),
            atmosphere: scene.atmosphere.clone(),
        }
    }
}

impl From<&Scene> for SceneDetail {
    fn from(scene: &Scene) -> Self {
        Self {
            id: scene.id,
            name: scene.name.clone(),
            description: scene.description.clone(),
            cover_url: scene.cover_url.clone(),
            atmosphere: scene.atmosphere.clone(),
            tracks: scene.tracks.iter().map(TrackDetail::from).collect(),
        }
    }
}

impl From<&Track> for TrackDetail {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id,
            name: track.name.clone(),
            audio_url: track.audio_url.clone(),
            default_volume: track.default_volume,
        }
    }
}

// ========================================
// Preset Views
// ========================================

/// Entry of `GET /api/v1/presets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetDetail {
    pub id: DbId,
    pub name: String,
    pub scene_id: DbId,
    pub tracks: Vec<PresetTrackDetail>,
}

/// Track volume override inside a preset, with the track's name and audio
/// reference copied in for the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetTrackDetail {
    pub track_id: DbId,
    pub name: String,
    pub volume: f64,
    pub audio_url: String,
}

impl From<&Preset> for PresetDetail {
    fn from(preset: &Preset) -> Self {
        Self {
            id: preset.id,
            name: preset.name.clone(),
            scene_id: preset.scene_id,
            tracks: preset.preset_tracks.iter().map(PresetTrackDetail::from).collect(),
        }
    }
}

impl From<&PresetTrack> for PresetTrackDetail {
    fn from(entry: &PresetTrack) -> Self {
        Self {
            track_id: entry.track_id,
            name: entry.track.name.clone(),
            volume: entry.volume,
            audio_url: entry.track.audio_url.clone(),
        }
    }
}

// ========================================
// Listening Session Types
// ========================================

/// Body of `POST /api/v1/listening-session`
///
/// Optional fields that were not sent are also left out of the echo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub scene_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Status reported for every accepted session
pub const SESSION_STATUS_RECORDED: &str = "recorded";

/// 202 response to a listening session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecorded {
    pub status: String,
    pub session: SessionRequest,
}

impl SessionRecorded {
    pub fn new(session: SessionRequest) -> Self {
        Self {
            status: SESSION_STATUS_RECORDED.to_string(),
            session,
        }
    }
}

// ========================================
// Audio File Types
// ========================================

/// Entry of `GET /api/v1/audio`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioItem {
    /// 1-based position in the sorted listing
    pub id: u64,
    pub filename: String,
    /// File stem
    pub name: String,
    /// Path under the `/data` static route
    pub url: String,
}

// ========================================
// Error Response Types
// ========================================

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
