//! # Environment Noise Common Library
//!
//! Shared code for the environment noise catalog service:
//! - Entity model and declarative table schemas
//! - Database initialization and additive schema synchronization
//! - API view types (JSON response/request shapes)
//! - Configuration resolution
//! - Common error type

pub mod api;
pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
