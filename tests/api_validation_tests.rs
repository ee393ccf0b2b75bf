// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile and progress endpoint tests, including input validation.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;

mod common;

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> axum::response::Response {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

#[tokio::test]
async fn test_profile_completion_shows_in_auth_snapshot() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", false, &state.config.jwt_signing_key);

    let response = send_json(
        &app,
        "PUT",
        "/api/profile",
        &token,
        Some(json!({"role": "Backend Engineer", "team": "Payments", "start_date": "2026-01-05"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = common::body_json(send_json(&app, "GET", "/api/auth/user", &token, None).await).await;
    assert_eq!(snapshot["profile"]["role"], "Backend Engineer");
    assert_eq!(snapshot["profile"]["team"], "Payments");
    assert!(snapshot["progress"].is_null());
}

#[tokio::test]
async fn test_profile_role_required() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", false, &state.config.jwt_signing_key);

    let response = send_json(&app, "PUT", "/api/profile", &token, Some(json!({"role": ""}))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.db.get_profile("u1").is_none());
}

#[tokio::test]
async fn test_profile_role_too_long() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", false, &state.config.jwt_signing_key);

    let response = send_json(
        &app,
        "PUT",
        "/api/profile",
        &token,
        Some(json!({"role": "a".repeat(101)})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_start_date() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", false, &state.config.jwt_signing_key);

    let response = send_json(
        &app,
        "PUT",
        "/api/profile",
        &token,
        Some(json!({"role": "Designer", "start_date": "next monday"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_start_progress_is_idempotent() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("u1", false, &state.config.jwt_signing_key);

    let first = common::body_json(send_json(&app, "POST", "/api/progress/start", &token, None).await).await;
    let second = common::body_json(send_json(&app, "POST", "/api/progress/start", &token, None).await).await;

    assert_eq!(first, second);
    assert_eq!(first["current_week"], 1);
    assert_eq!(first["current_day"], 1);

    let snapshot = common::body_json(send_json(&app, "GET", "/api/auth/user", &token, None).await).await;
    assert_eq!(snapshot["progress"]["current_day"], 1);
}
