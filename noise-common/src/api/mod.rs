//! Shared HTTP API types
//!
//! Contains only framework-independent request/response shapes. The service
//! crate wraps them with axum handlers.

pub mod types;

pub use types::{
    AudioItem, ErrorResponse, PresetDetail, PresetTrackDetail, SceneDetail, SceneListItem,
    SessionRecorded, SessionRequest, TrackDetail,
};
