//! Data access layer for noise-api
//!
//! Read-only queries returning fully hydrated entity graphs, plus the
//! startup seeder. Child collections are attached with one batched query
//! per call, so every list operation costs exactly two round-trips no
//! matter how many rows exist.

use noise_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;

pub mod presets;
pub mod scenes;
pub mod seed;

pub use presets::list_presets;
pub use scenes::{get_scene, list_scenes};
pub use seed::{seed, SeedReport};

/// Row counts of the catalog tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub scenes: i64,
    pub tracks: i64,
    pub presets: i64,
    pub preset_tracks: i64,
}

/// Count rows in every catalog table in a single statement
pub async fn count_rows(pool: &SqlitePool) -> Result<CatalogCounts> {
    let (scenes, tracks, presets, preset_tracks) = sqlx::query_as::<_, (i64, i64, i64, i64)>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM scenes),
            (SELECT COUNT(*) FROM tracks),
            (SELECT COUNT(*) FROM presets),
            (SELECT COUNT(*) FROM preset_tracks)
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(CatalogCounts {
        scenes,
        tracks,
        presets,
        preset_tracks,
    })
}

/// In-memory database with the catalog schema, for unit tests
///
/// Single connection: each connection to `sqlite::memory:` is its own database.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    noise_common::db::create_schema(&pool).await.unwrap();
    pool
}
