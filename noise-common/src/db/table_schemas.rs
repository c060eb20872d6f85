//! Table Schema Definitions
//!
//! Single source of truth for the catalog tables. Each struct describes one
//! table; [`create_schema`] creates whatever is missing and then adds any
//! column declared here but absent from an older database file.

use crate::db::schema_sync::{ColumnDefinition, IndexDefinition, SchemaSync, TableSchema};
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// `scenes` table
pub struct ScenesTable;

impl TableSchema for ScenesTable {
    fn table_name() -> &'static str {
        "scenes"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "INTEGER").primary_key().autoincrement(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("description", "TEXT").not_null().default("''"),
            ColumnDefinition::new("cover_url", "TEXT").not_null().default("''"),
            ColumnDefinition::new("atmosphere", "TEXT").not_null().default("''"),
        ]
    }
}

/// `tracks` table, owned by `scenes`
pub struct TracksTable;

impl TableSchema for TracksTable {
    fn table_name() -> &'static str {
        "tracks"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "INTEGER").primary_key().autoincrement(),
            ColumnDefinition::new("scene_id", "INTEGER")
                .not_null()
                .references("scenes", "id")
                .on_delete_cascade(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("audio_url", "TEXT").not_null(),
            ColumnDefinition::new("default_volume", "REAL").not_null().default("1.0"),
        ]
    }

    fn indexes() -> Vec<IndexDefinition> {
        vec![IndexDefinition {
            name: "idx_tracks_scene_id",
            columns: &["scene_id"],
        }]
    }
}

/// `presets` table; a preset refers to a scene but does not own it
pub struct PresetsTable;

impl TableSchema for PresetsTable {
    fn table_name() -> &'static str {
        "presets"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "INTEGER").primary_key().autoincrement(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("scene_id", "INTEGER")
                .not_null()
                .references("scenes", "id"),
        ]
    }
}

/// `preset_tracks` join table
pub struct PresetTracksTable;

impl TableSchema for PresetTracksTable {
    fn table_name() -> &'static str {
        "preset_tracks"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "INTEGER").primary_key().autoincrement(),
            ColumnDefinition::new("preset_id", "INTEGER")
                .not_null()
                .references("presets", "id")
                .on_delete_cascade(),
            ColumnDefinition::new("track_id", "INTEGER")
                .not_null()
                .references("tracks", "id"),
            ColumnDefinition::new("volume", "REAL").not_null().default("1.0"),
        ]
    }

    fn indexes() -> Vec<IndexDefinition> {
        vec![IndexDefinition {
            name: "idx_preset_tracks_preset_id",
            columns: &["preset_id"],
        }]
    }
}

/// Names of all catalog tables, parents first
pub const CATALOG_TABLES: [&str; 4] = ["scenes", "tracks", "presets", "preset_tracks"];

/// Create missing tables, then add missing columns to existing ones
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    SchemaSync::create_table::<ScenesTable>(pool).await?;
    SchemaSync::create_table::<TracksTable>(pool).await?;
    SchemaSync::create_table::<PresetsTable>(pool).await?;
    SchemaSync::create_table::<PresetTracksTable>(pool).await?;

    let added = SchemaSync::sync_table::<ScenesTable>(pool).await?
        + SchemaSync::sync_table::<TracksTable>(pool).await?
        + SchemaSync::sync_table::<PresetsTable>(pool).await?
        + SchemaSync::sync_table::<PresetTracksTable>(pool).await?;

    if added > 0 {
        info!("Schema sync added {} column(s)", added);
    }

    Ok(())
}
