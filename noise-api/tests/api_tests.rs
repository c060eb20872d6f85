//! Integration tests for noise-api endpoints
//!
//! Each test builds the full router over a freshly seeded database and
//! drives it with `oneshot`.

mod helpers;

use axum::http::{header, StatusCode};
use helpers::{body_bytes, create_test_app, extract_json, get, options, post_json};
use noise_api::db::count_rows;
use serde_json::json;
use tower::util::ServiceExt; // for `oneshot`

// =============================================================================
// Scenes
// =============================================================================

#[tokio::test]
async fn test_list_scenes_returns_seeded_summaries() {
    let app = create_test_app().await;

    let response = app.router.oneshot(get("/api/v1/scenes")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let scenes = body.as_array().expect("array of scenes");
    assert_eq!(scenes.len(), 2);

    assert_eq!(scenes[0]["id"], 1);
    assert_eq!(scenes[0]["name"], "雨夜静听");
    assert_eq!(scenes[0]["atmosphere"], "Rain Focus");
    assert!(scenes[0]["coverUrl"].as_str().unwrap().starts_with("https://"));
    assert!(scenes[0].get("tracks").is_none());

    assert_eq!(scenes[1]["id"], 2);
    assert_eq!(scenes[1]["name"], "海浪低语");
}

#[tokio::test]
async fn test_get_scene_includes_tracks() {
    let app = create_test_app().await;

    let response = app.router.oneshot(get("/api/v1/scenes/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["atmosphere"], "Coastal Flow");
    assert_eq!(
        body["tracks"],
        json!([{
            "id": 2,
            "name": "远洋海浪",
            "audioUrl": "/data/ocean_waves.mp3",
            "defaultVolume": 0.9
        }])
    );
}

#[tokio::test]
async fn test_get_scene_not_found() {
    let app = create_test_app().await;

    let response = app.router.oneshot(get("/api/v1/scenes/999999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({"error": "scene not found"}));
}

#[tokio::test]
async fn test_get_scene_malformed_ids() {
    let app = create_test_app().await;

    for uri in ["/api/v1/scenes/abc", "/api/v1/scenes/-1", "/api/v1/scenes/1.5"] {
        let response = app.router.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "scene id invalid");
    }
}

#[tokio::test]
async fn test_storage_failure_is_500_with_message() {
    let app = create_test_app().await;
    app.pool.close().await;

    let response = app.router.oneshot(get("/api/v1/scenes")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().starts_with("Database error"));
}

// =============================================================================
// Presets
// =============================================================================

#[tokio::test]
async fn test_list_presets_with_track_details() {
    let app = create_test_app().await;

    let response = app.router.oneshot(get("/api/v1/presets")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body,
        json!([
            {
                "id": 1,
                "name": "学习模式",
                "sceneId": 1,
                "tracks": [{
                    "trackId": 1,
                    "name": "细雨",
                    "volume": 0.9,
                    "audioUrl": "/data/light_rain.mp3"
                }]
            },
            {
                "id": 2,
                "name": "睡眠模式",
                "sceneId": 2,
                "tracks": [{
                    "trackId": 2,
                    "name": "远洋海浪",
                    "volume": 1.0,
                    "audioUrl": "/data/ocean_waves.mp3"
                }]
            }
        ])
    );
}

// =============================================================================
// Listening sessions
// =============================================================================

#[tokio::test]
async fn test_record_session_echoes_payload_without_storing() {
    let app = create_test_app().await;
    let before = count_rows(&app.pool).await.unwrap();

    let payload = json!({"sceneId": 1, "presetId": 1, "durationMinutes": 25, "notes": "deep work"});
    let response = app
        .router
        .oneshot(post_json("/api/v1/listening-session", payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({"status": "recorded", "session": payload}));

    let after = count_rows(&app.pool).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_record_session_minimal_payload() {
    let app = create_test_app().await;

    let response = app
        .router
        .oneshot(post_json("/api/v1/listening-session", r#"{"sceneId": 42}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    // Absent optional fields stay absent in the echo
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["session"], json!({"sceneId": 42}));
}

#[tokio::test]
async fn test_record_session_invalid_payload() {
    let app = create_test_app().await;

    for payload in ["{not json", r#"{"presetId": 1}"#, r#"{"sceneId": "one"}"#] {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/api/v1/listening-session", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);

        let body = extract_json(response.into_body()).await;
        assert_eq!(body, json!({"error": "invalid payload"}));
    }
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_preflight_returns_204_with_cors_headers() {
    let app = create_test_app().await;

    for uri in ["/api/v1/listening-session", "/api/v1/scenes/1", "/nowhere"] {
        let response = app.router.clone().oneshot(options(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{}", uri);

        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Origin, Content-Type, Accept"
        );

        assert!(body_bytes(response.into_body()).await.is_empty());
    }
}

#[tokio::test]
async fn test_cors_headers_on_errors_too() {
    let app = create_test_app().await;

    let response = app.router.oneshot(get("/api/v1/scenes/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

// =============================================================================
// Audio files
// =============================================================================

#[tokio::test]
async fn test_list_audio_files() {
    let app = create_test_app().await;

    let response = app.router.oneshot(get("/api/v1/audio")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    // Extension match ignores case; the database files and readme are skipped
    assert_eq!(
        body,
        json!([
            {"id": 1, "filename": "birds.OGG", "name": "birds", "url": "/data/birds.OGG"},
            {"id": 2, "filename": "light_rain.mp3", "name": "light_rain", "url": "/data/light_rain.mp3"},
            {"id": 3, "filename": "ocean_waves.mp3", "name": "ocean_waves", "url": "/data/ocean_waves.mp3"}
        ])
    );
}

#[tokio::test]
async fn test_list_audio_files_missing_dir() {
    let app = create_test_app().await;
    let router = noise_api::build_router(noise_api::AppState::new(
        app.pool.clone(),
        app.data_dir.path().join("missing"),
    ));

    let response = router.oneshot(get("/api/v1/audio")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({"error": "data directory missing"}));
}

#[tokio::test]
async fn test_data_files_are_served() {
    let app = create_test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(get("/data/light_rain.mp3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(
        body_bytes(response.into_body()).await,
        b"audio:light_rain.mp3".to_vec()
    );

    let response = app.router.oneshot(get("/data/nope.mp3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({"error": "not found"}));
}

#[tokio::test]
async fn test_data_route_never_serves_the_database() {
    let app = create_test_app().await;
    assert!(app.data_dir.path().join("white_noise.db").is_file());

    for uri in [
        "/data/white_noise.db",
        "/data/white_noise.db-wal",
        "/data/white_noise.db-shm",
        "/data/readme.txt",
    ] {
        let response = app.router.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);

        let body = extract_json(response.into_body()).await;
        assert_eq!(body, json!({"error": "not found"}), "{}", uri);
    }
}

#[tokio::test]
async fn test_data_route_rejects_traversal() {
    let app = create_test_app().await;

    for uri in [
        "/data/../secret.txt",
        "/data/%2e%2e/secret.txt",
        "/data/../light_rain.mp3",
        "/data/%2e%2e/%2e%2e/etc/passwd",
    ] {
        let response = app.router.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

// =============================================================================
// Health and fallback
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app().await;

    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "noise-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_path_is_json_404() {
    let app = create_test_app().await;

    let response = app.router.oneshot(get("/api/v2/scenes")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({"error": "not found"}));
}
