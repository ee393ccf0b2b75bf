// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::response::Response;
use ramplo::config::Config;
use ramplo::db::MemoryDb;
use ramplo::middleware::auth::create_jwt;
use ramplo::routes::create_router;
use ramplo::services::CurriculumService;
use ramplo::AppState;
use std::sync::Arc;

/// Curriculum shipped with the server.
#[allow(dead_code)]
pub fn test_curriculum() -> CurriculumService {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/curriculum.json");
    CurriculumService::load_from_file(path).expect("Failed to load curriculum")
}

/// Create a test app backed by a fresh in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: MemoryDb::new(),
        curriculum: test_curriculum(),
    });

    (create_router(state.clone()), state)
}

/// Create a session token signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, is_morty_user: bool, signing_key: &[u8]) -> String {
    create_jwt(user_id, is_morty_user, signing_key).expect("Failed to create test JWT")
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Body is not JSON")
}

/// Serve the app on an ephemeral local port. Returns the base URL.
#[allow(dead_code)]
pub async fn spawn_server() -> (String, Arc<AppState>) {
    let (app, state) = create_test_app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    (format!("http://{}", addr), state)
}
