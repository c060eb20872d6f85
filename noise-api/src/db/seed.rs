//! Demonstration content seeding
//!
//! Runs once at startup, before the listener is bound. An empty `scenes`
//! table triggers seeding; any existing scene makes it a no-op.
//!
//! Presets refer to seed tracks by their position in [`SEED_SCENES`]. The ids
//! assigned by storage are captured right after each insert and looked up by
//! that position, so duplicate scene or track names can never be confused.

use noise_common::db::DbId;
use noise_common::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

pub struct SeedTrack {
    pub name: &'static str,
    pub audio_url: &'static str,
    pub default_volume: f64,
}

pub struct SeedScene {
    pub name: &'static str,
    pub description: &'static str,
    pub cover_url: &'static str,
    pub atmosphere: &'static str,
    pub tracks: &'static [SeedTrack],
}

/// Position of a track in a seed scene table
#[derive(Debug, Clone, Copy)]
pub struct TrackRef {
    pub scene: usize,
    pub track: usize,
}

pub struct SeedPresetTrack {
    pub track: TrackRef,
    pub volume: f64,
}

pub struct SeedPreset {
    pub name: &'static str,
    /// Index into the seed scene table
    pub scene: usize,
    pub tracks: &'static [SeedPresetTrack],
}

pub const SEED_SCENES: &[SeedScene] = &[
    SeedScene {
        name: "雨夜静听",
        description: "微雨掠过窗沿，营造低调专注的脑波节奏。",
        cover_url: "https://images.unsplash.com/photo-1509718443690-d8e2fb3474d1?auto=format&fit=crop&w=900&q=60",
        atmosphere: "Rain Focus",
        tracks: &[SeedTrack {
            name: "细雨",
            audio_url: "/data/light_rain.mp3",
            default_volume: 0.75,
        }],
    },
    SeedScene {
        name: "海浪低语",
        description: "海浪推移节奏柔慢，波光与晚风共同铺出催眠底色。",
        cover_url: "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?auto=format&fit=crop&w=900&q=60",
        atmosphere: "Coastal Flow",
        tracks: &[SeedTrack {
            name: "远洋海浪",
            audio_url: "/data/ocean_waves.mp3",
            default_volume: 0.9,
        }],
    },
];

pub const SEED_PRESETS: &[SeedPreset] = &[
    SeedPreset {
        name: "学习模式",
        scene: 0,
        tracks: &[SeedPresetTrack {
            track: TrackRef { scene: 0, track: 0 },
            volume: 0.9,
        }],
    },
    SeedPreset {
        name: "睡眠模式",
        scene: 1,
        tracks: &[SeedPresetTrack {
            track: TrackRef { scene: 1, track: 0 },
            volume: 1.0,
        }],
    },
];

/// Rows inserted by one seeding run (all zero when seeding was skipped)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub scenes: usize,
    pub tracks: usize,
    pub presets: usize,
    pub preset_tracks: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Populate an empty catalog with the built-in demonstration content
pub async fn seed(pool: &SqlitePool) -> Result<SeedReport> {
    seed_catalog(pool, SEED_SCENES, SEED_PRESETS).await
}

/// Populate an empty catalog from the given seed tables
///
/// Each scene is written together with its tracks in one transaction, and
/// each preset together with its entries. A failure aborts the run; whatever
/// was committed before it stays.
pub async fn seed_catalog(
    pool: &SqlitePool,
    scenes: &[SeedScene],
    presets: &[SeedPreset],
) -> Result<SeedReport> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scenes")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        debug!("Catalog already holds {} scene(s), skipping seed", existing);
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();

    // Indexed exactly like `scenes` and each scene's `tracks`
    let mut scene_ids: Vec<DbId> = Vec::with_capacity(scenes.len());
    let mut track_ids: Vec<Vec<DbId>> = Vec::with_capacity(scenes.len());

    for scene in scenes {
        let (scene_id, ids) = insert_scene(pool, scene).await?;
        report.scenes += 1;
        report.tracks += ids.len();
        scene_ids.push(scene_id);
        track_ids.push(ids);
    }

    for preset in presets {
        let scene_id = scene_ids.get(preset.scene).copied().ok_or_else(|| {
            Error::InvalidInput(format!(
                "seed preset '{}' refers to unknown scene #{}",
                preset.name, preset.scene
            ))
        })?;

        let entries = preset
            .tracks
            .iter()
            .map(|entry| {
                let track_ref = entry.track;
                track_ids
                    .get(track_ref.scene)
                    .and_then(|ids| ids.get(track_ref.track))
                    .map(|&track_id| (track_id, entry.volume))
                    .ok_or_else(|| {
                        Error::InvalidInput(format!(
                            "seed preset '{}' refers to unknown track {:?}",
                            preset.name, track_ref
                        ))
                    })
            })
            .collect::<Result<Vec<(DbId, f64)>>>()?;

        insert_preset(pool, preset.name, scene_id, &entries).await?;
        report.presets += 1;
        report.preset_tracks += entries.len();
    }

    info!(
        "Seeded catalog: {} scene(s), {} track(s), {} preset(s), {} preset track(s)",
        report.scenes, report.tracks, report.presets, report.preset_tracks
    );

    Ok(report)
}

/// Insert a scene and its tracks, returning the assigned ids
async fn insert_scene(pool: &SqlitePool, scene: &SeedScene) -> Result<(DbId, Vec<DbId>)> {
    let mut tx = pool.begin().await?;

    let scene_id = sqlx::query(
        "INSERT INTO scenes (name, description, cover_url, atmosphere) VALUES (?, ?, ?, ?)",
    )
    .bind(scene.name)
    .bind(scene.description)
    .bind(scene.cover_url)
    .bind(scene.atmosphere)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let mut track_ids = Vec::with_capacity(scene.tracks.len());
    for track in scene.tracks {
        let track_id = sqlx::query(
            "INSERT INTO tracks (scene_id, name, audio_url, default_volume) VALUES (?, ?, ?, ?)",
        )
        .bind(scene_id)
        .bind(track.name)
        .bind(track.audio_url)
        .bind(track.default_volume)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        track_ids.push(track_id);
    }

    tx.commit().await?;

    Ok((scene_id, track_ids))
}

/// Insert a preset and its track entries
async fn insert_preset(
    pool: &SqlitePool,
    name: &str,
    scene_id: DbId,
    entries: &[(DbId, f64)],
) -> Result<DbId> {
    let mut tx = pool.begin().await?;

    let preset_id = sqlx::query("INSERT INTO presets (name, scene_id) VALUES (?, ?)")
        .bind(name)
        .bind(scene_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    for &(track_id, volume) in entries {
        sqlx::query("INSERT INTO preset_tracks (preset_id, track_id, volume) VALUES (?, ?, ?)")
            .bind(preset_id)
            .bind(track_id)
            .bind(volume)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(preset_id)
}
