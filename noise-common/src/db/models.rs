//! Catalog entities
//!
//! Relationships:
//! - A [`Scene`] owns its [`Track`]s (`tracks.scene_id`).
//! - A [`Preset`] belongs to one scene and owns its [`PresetTrack`]s.
//! - A [`PresetTrack`] points at one track, which may belong to any scene.

use serde::{Deserialize, Serialize};

/// Storage-assigned row identity
pub type DbId = i64;

/// Themed ambient-sound environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub cover_url: String,
    pub atmosphere: String,
    /// Owned tracks, ascending id. Filled by the data access layer.
    #[sqlx(skip)]
    pub tracks: Vec<Track>,
}

/// Single audio stem belonging to one scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: DbId,
    pub scene_id: DbId,
    pub name: String,
    /// URL or local `/data/...` path
    pub audio_url: String,
    /// Playback volume, 0.0 - 1.0 (not enforced)
    pub default_volume: f64,
}

/// Saved combination of track volumes for one scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: DbId,
    pub name: String,
    pub scene_id: DbId,
    #[sqlx(skip)]
    #[serde(rename = "tracks")]
    pub preset_tracks: Vec<PresetTrack>,
}

/// Volume override for one track within one preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetTrack {
    pub id: DbId,
    pub preset_id: DbId,
    pub track_id: DbId,
    pub volume: f64,
    /// The referenced track, hydrated on read
    pub track: Track,
}
