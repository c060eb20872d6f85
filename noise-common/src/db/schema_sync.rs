//! Declarative schema and additive synchronization
//!
//! Every table is described once by a [`TableSchema`] implementation. That
//! description drives both halves of startup schema management:
//!
//! 1. **Create** - `CREATE TABLE IF NOT EXISTS` generated from the column list
//! 2. **Sync** - columns present in the description but missing from an
//!    existing database table are added with `ALTER TABLE ADD COLUMN`
//!
//! Only additions are automatic. Type and constraint drift is reported in the
//! log and left alone; SQLite cannot change either without rebuilding the
//! table.
//!
//! # Usage
//!
//! ```rust,ignore
//! pub struct TracksTable;
//!
//! impl TableSchema for TracksTable {
//!     fn table_name() -> &'static str { "tracks" }
//!
//!     fn expected_columns() -> Vec<ColumnDefinition> {
//!         vec![
//!             ColumnDefinition::new("id", "INTEGER").primary_key().autoincrement(),
//!             ColumnDefinition::new("scene_id", "INTEGER").not_null().references("scenes", "id"),
//!             ColumnDefinition::new("name", "TEXT").not_null(),
//!         ]
//!     }
//! }
//!
//! SchemaSync::create_table::<TracksTable>(&pool).await?;
//! SchemaSync::sync_table::<TracksTable>(&pool).await?;
//! ```

use crate::Result;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};

/// Foreign key target of a column
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
    pub on_delete_cascade: bool,
}

/// Column definition with SQL constraints
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    /// SQL type ("TEXT", "INTEGER", "REAL")
    pub sql_type: String,
    pub not_null: bool,
    pub primary_key: bool,
    pub autoincrement: bool,
    /// DEFAULT expression, inserted verbatim
    pub default_value: Option<String>,
    pub references: Option<ForeignKey>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            not_null: false,
            primary_key: false,
            autoincrement: false,
            default_value: None,
            references: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Never reuse ids of deleted rows (INTEGER PRIMARY KEY only)
    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.references = Some(ForeignKey {
            table: table.into(),
            column: column.into(),
            on_delete_cascade: false,
        });
        self
    }

    /// Delete rows referencing a deleted parent (requires [`Self::references`])
    pub fn on_delete_cascade(mut self) -> Self {
        if let Some(fk) = self.references.as_mut() {
            fk.on_delete_cascade = true;
        }
        self
    }

    /// Column clause for CREATE TABLE
    pub fn create_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);

        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
            if self.autoincrement {
                sql.push_str(" AUTOINCREMENT");
            }
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = &self.default_value {
            sql.push_str(&format!(" DEFAULT {}", default));
        }
        if let Some(fk) = &self.references {
            sql.push_str(&format!(" REFERENCES {}({})", fk.table, fk.column));
            if fk.on_delete_cascade {
                sql.push_str(" ON DELETE CASCADE");
            }
        }

        sql
    }

    /// Column clause for ALTER TABLE ADD COLUMN
    ///
    /// SQLite refuses PRIMARY KEY and UNIQUE here, and accepts NOT NULL only
    /// together with a non-NULL default. A REFERENCES clause is only legal on
    /// a column whose default is NULL.
    fn add_column_sql(&self, table: &str) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);

        if self.primary_key {
            warn!(
                "  Cannot add PRIMARY KEY column {}.{} via ALTER TABLE; adding it as a plain column",
                table, self.name
            );
        }

        match (&self.default_value, self.not_null) {
            (Some(default), true) => sql.push_str(&format!(" NOT NULL DEFAULT {}", default)),
            (Some(default), false) => sql.push_str(&format!(" DEFAULT {}", default)),
            (None, true) => warn!(
                "  Cannot add NOT NULL column {}.{} without DEFAULT; adding it as nullable",
                table, self.name
            ),
            (None, false) => {}
        }

        if let (Some(fk), None) = (&self.references, &self.default_value) {
            sql.push_str(&format!(" REFERENCES {}({})", fk.table, fk.column));
            if fk.on_delete_cascade {
                sql.push_str(" ON DELETE CASCADE");
            }
        }

        sql
    }
}

/// Secondary index on a table
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Expected schema of one database table
pub trait TableSchema {
    fn table_name() -> &'static str;

    /// Column definitions in creation order
    fn expected_columns() -> Vec<ColumnDefinition>;

    fn indexes() -> Vec<IndexDefinition> {
        Vec::new()
    }

    /// Full CREATE TABLE IF NOT EXISTS statement
    fn create_table_sql() -> String {
        let columns: Vec<String> = Self::expected_columns()
            .iter()
            .map(|c| format!("    {}", c.create_sql()))
            .collect();

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            Self::table_name(),
            columns.join(",\n")
        )
    }
}

/// Actual column as reported by `PRAGMA table_info`
#[derive(Debug, Clone)]
pub struct ActualColumn {
    pub cid: i64,
    pub name: String,
    pub type_name: String,
    pub not_null: bool,
    pub pk: bool,
}

/// Difference between an expected and an actual table definition
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDrift {
    /// Column missing from the database (auto-fixed)
    MissingColumn(ColumnDefinition),
    /// Column exists with an incompatible type (reported only)
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },
    /// Column exists without an expected constraint (reported only)
    ConstraintMismatch {
        column: String,
        constraint: &'static str,
    },
}

/// Read the actual schema of a table
pub struct SchemaIntrospector;

impl SchemaIntrospector {
    pub async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
        )
        .bind(table_name)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Columns ordered by position
    pub async fn introspect_table(pool: &SqlitePool, table_name: &str) -> Result<Vec<ActualColumn>> {
        let rows = sqlx::query(
            "SELECT cid, name, type, \"notnull\", pk FROM pragma_table_info(?) ORDER BY cid",
        )
        .bind(table_name)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| ActualColumn {
                cid: row.get("cid"),
                name: row.get("name"),
                type_name: row.get("type"),
                not_null: row.get::<i64, _>("notnull") != 0,
                pk: row.get::<i64, _>("pk") != 0,
            })
            .collect())
    }
}

/// Compute drift between expected and actual columns
pub fn compare_columns(expected: &[ColumnDefinition], actual: &[ActualColumn]) -> Vec<SchemaDrift> {
    let mut drift = Vec::new();

    for column in expected {
        let Some(found) = actual.iter().find(|c| c.name.eq_ignore_ascii_case(&column.name)) else {
            drift.push(SchemaDrift::MissingColumn(column.clone()));
            continue;
        };

        if type_affinity(&column.sql_type) != type_affinity(&found.type_name) {
            drift.push(SchemaDrift::TypeMismatch {
                column: column.name.clone(),
                expected: column.sql_type.clone(),
                actual: found.type_name.clone(),
            });
        }

        // PRIMARY KEY columns report notnull = 0 in SQLite
        if column.not_null && !column.primary_key && !found.not_null {
            drift.push(SchemaDrift::ConstraintMismatch {
                column: column.name.clone(),
                constraint: "NOT NULL",
            });
        }

        if column.primary_key && !found.pk {
            drift.push(SchemaDrift::ConstraintMismatch {
                column: column.name.clone(),
                constraint: "PRIMARY KEY",
            });
        }
    }

    drift
}

/// SQLite type affinity of a declared type name
fn type_affinity(declared: &str) -> &'static str {
    let upper = declared.to_ascii_uppercase();

    if upper.contains("INT") {
        "INTEGER"
    } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
        "TEXT"
    } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
        "REAL"
    } else if upper.is_empty() || upper.contains("BLOB") {
        "BLOB"
    } else {
        "NUMERIC"
    }
}

/// Apply schema definitions to a database
pub struct SchemaSync;

impl SchemaSync {
    /// Create the table and its indexes if they do not exist
    pub async fn create_table<T: TableSchema>(pool: &SqlitePool) -> Result<()> {
        sqlx::query(&T::create_table_sql()).execute(pool).await?;

        for index in T::indexes() {
            let sql = format!(
                "CREATE INDEX IF NOT EXISTS {} ON {}({})",
                index.name,
                T::table_name(),
                index.columns.join(", ")
            );
            sqlx::query(&sql).execute(pool).await?;
        }

        Ok(())
    }

    /// Add declared columns missing from an existing table
    ///
    /// Returns the number of columns added.
    pub async fn sync_table<T: TableSchema>(pool: &SqlitePool) -> Result<usize> {
        let table = T::table_name();

        if !SchemaIntrospector::table_exists(pool, table).await? {
            warn!("Schema sync: table '{}' does not exist, skipping", table);
            return Ok(0);
        }

        let actual = SchemaIntrospector::introspect_table(pool, table).await?;
        let drift = compare_columns(&T::expected_columns(), &actual);

        if drift.is_empty() {
            debug!("Schema sync: '{}' up to date", table);
            return Ok(0);
        }

        let mut added = 0;
        for change in drift {
            match change {
                SchemaDrift::MissingColumn(column) => {
                    Self::add_column(pool, table, &column).await?;
                    added += 1;
                }
                SchemaDrift::TypeMismatch { column, expected, actual } => warn!(
                    "  Type mismatch in {}.{}: expected '{}', found '{}'",
                    table, column, expected, actual
                ),
                SchemaDrift::ConstraintMismatch { column, constraint } => warn!(
                    "  Constraint mismatch in {}.{}: missing {}",
                    table, column, constraint
                ),
            }
        }

        Ok(added)
    }

    async fn add_column(pool: &SqlitePool, table: &str, column: &ColumnDefinition) -> Result<()> {
        let sql = format!("ALTER TABLE {} ADD COLUMN {}", table, column.add_column_sql(table));

        info!("  Adding column {}.{} ({})", table, column.name, column.sql_type);

        match sqlx::query(&sql).execute(pool).await {
            Ok(_) => Ok(()),
            // Another process added it between introspection and ALTER
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("duplicate column") => {
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
