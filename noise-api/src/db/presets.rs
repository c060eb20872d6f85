//! Preset queries
//!
//! Presets are loaded two levels deep: preset → preset tracks → track.

use noise_common::db::{DbId, Preset, PresetTrack, Track};
use noise_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

/// All presets in ascending id order, each with its entries and their tracks
pub async fn list_presets(pool: &SqlitePool) -> Result<Vec<Preset>> {
    let mut presets =
        sqlx::query_as::<_, Preset>("SELECT id, name, scene_id FROM presets ORDER BY id ASC")
            .fetch_all(pool)
            .await?;

    let rows = sqlx::query(
        r#"
        SELECT pt.id, pt.preset_id, pt.track_id, pt.volume,
               t.scene_id AS track_scene_id,
               t.name AS track_name,
               t.audio_url AS track_audio_url,
               t.default_volume AS track_default_volume
        FROM preset_tracks pt
        JOIN tracks t ON t.id = pt.track_id
        ORDER BY pt.preset_id ASC, pt.id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut by_preset: HashMap<DbId, Vec<PresetTrack>> = HashMap::new();
    for row in &rows {
        let entry = preset_track_from_row(row);
        by_preset.entry(entry.preset_id).or_default().push(entry);
    }

    for preset in presets.iter_mut() {
        preset.preset_tracks = by_preset.remove(&preset.id).unwrap_or_default();
    }

    Ok(presets)
}

fn preset_track_from_row(row: &SqliteRow) -> PresetTrack {
    let track_id: DbId = row.get("track_id");

    PresetTrack {
        id: row.get("id"),
        preset_id: row.get("preset_id"),
        track_id,
        volume: row.get("volume"),
        track: Track {
            id: track_id,
            scene_id: row.get("track_scene_id"),
            name: row.get("track_name"),
            audio_url: row.get("track_audio_url"),
            default_volume: row.get("track_default_volume"),
        },
    }
}
