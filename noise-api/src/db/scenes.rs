//! Scene and track queries

use noise_common::db::{DbId, Scene, Track};
use noise_common::{Error, Result};
use sqlx::SqlitePool;
use std::collections::HashMap;

const SCENE_COLUMNS: &str = "id, name, description, cover_url, atmosphere";
const TRACK_COLUMNS: &str = "id, scene_id, name, audio_url, default_volume";

/// All scenes in ascending id order, each with its tracks
pub async fn list_scenes(pool: &SqlitePool) -> Result<Vec<Scene>> {
    let mut scenes =
        sqlx::query_as::<_, Scene>(&format!("SELECT {SCENE_COLUMNS} FROM scenes ORDER BY id ASC"))
            .fetch_all(pool)
            .await?;

    let tracks = sqlx::query_as::<_, Track>(&format!(
        "SELECT {TRACK_COLUMNS} FROM tracks ORDER BY scene_id ASC, id ASC"
    ))
    .fetch_all(pool)
    .await?;

    attach_tracks(&mut scenes, tracks);

    Ok(scenes)
}

/// One scene with its tracks
///
/// Returns [`Error::NotFound`] when no scene has this id.
pub async fn get_scene(pool: &SqlitePool, id: DbId) -> Result<Scene> {
    let mut scene =
        sqlx::query_as::<_, Scene>(&format!("SELECT {SCENE_COLUMNS} FROM scenes WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| Error::NotFound("scene not found".to_string()))?;

    scene.tracks = sqlx::query_as::<_, Track>(&format!(
        "SELECT {TRACK_COLUMNS} FROM tracks WHERE scene_id = ? ORDER BY id ASC"
    ))
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(scene)
}

/// Distribute tracks (already in id order) to their owning scenes
fn attach_tracks(scenes: &mut [Scene], tracks: Vec<Track>) {
    let mut by_scene: HashMap<DbId, Vec<Track>> = HashMap::new();
    for track in tracks {
        by_scene.entry(track.scene_id).or_default().push(track);
    }

    for scene in scenes.iter_mut() {
        scene.tracks = by_scene.remove(&scene.id).unwrap_or_default();
    }
}
