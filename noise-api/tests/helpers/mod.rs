//! Shared helpers for noise-api integration tests
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use noise_api::{build_router, db, AppState};
use noise_common::db::init_database;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// A fully wired app backed by a seeded database in a temp directory
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    /// Holds the database file and audio files; dropped with the app
    pub data_dir: TempDir,
}

/// Seeded app whose data directory also holds a few audio files
pub async fn create_test_app() -> TestApp {
    let data_dir = TempDir::new().unwrap();
    for name in ["ocean_waves.mp3", "light_rain.mp3", "birds.OGG", "readme.txt"] {
        std::fs::write(data_dir.path().join(name), format!("audio:{}", name)).unwrap();
    }

    let pool = init_database(&data_dir.path().join("white_noise.db"))
        .await
        .unwrap();
    db::seed(&pool).await.unwrap();

    let router = build_router(AppState::new(pool.clone(), data_dir.path().to_path_buf()));

    TestApp {
        router,
        pool,
        data_dir,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn options(uri: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri(uri)
        .header(header::ORIGIN, "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = body_bytes(body).await;
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
