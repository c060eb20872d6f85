//! Database models, schema and initialization

pub mod init;
pub mod models;
pub mod schema_sync;
pub mod table_schemas;

pub use init::*;
pub use models::*;
pub use table_schemas::{create_schema, CATALOG_TABLES};
