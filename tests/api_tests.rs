//! Integration tests for authentication and system endpoints.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{DEFAULT_API_KEY, get, register, send, spawn_app};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _) = spawn_app().await;

    let (status, body) = get(&app, "/api/system/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "alive");

    let (status, body) = get(&app, "/api/system/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], true);
}

#[tokio::test]
async fn test_protected_routes_require_credentials() {
    let (app, _) = spawn_app().await;

    let (status, body) = get(&app, "/api/system/status").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "GET", "/api/system/status", Some("wrong-key"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) =
        send(&app, "GET", "/api/system/status", Some(DEFAULT_API_KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["data"]["catalog"]["printings"], 0);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {DEFAULT_API_KEY}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["username"], "admin");
    assert!(body["data"].get("api_key").is_none());
}

#[tokio::test]
async fn test_register_and_login() {
    let (app, _) = spawn_app().await;

    let api_key = register(&app, "collector").await;
    assert_eq!(api_key.len(), 64);

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&api_key), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "collector");

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "username": "collector", "password": "another password" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "username": "newbie", "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "username": "no spaces", "password": "long enough" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "collector", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["api_key"], api_key.as_str());

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "collector", "password": "wrong password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
    let (app, _) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "username": "admin", "password": "password" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_regenerate_api_key() {
    let (app, _) = spawn_app().await;
    let old_key = register(&app, "rotator").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/api-key/regenerate",
        Some(&old_key),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let new_key = body["data"]["api_key"].as_str().unwrap().to_string();
    assert_ne!(new_key, old_key);

    let (status, _) = send(&app, "GET", "/api/auth/me", Some(&old_key), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/api/auth/api-key", Some(&new_key), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["api_key"], new_key.as_str());
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (app, _) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/system/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
}

#[tokio::test]
async fn test_cors_wraps_the_whole_stack() {
    let (app, _) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/cards/search")
                .header(header::ORIGIN, "http://localhost:7420")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:7420"
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/system/health/live")
                .header(header::ORIGIN, "http://localhost:7420")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
    assert!(response.headers().contains_key("x-request-id"));
}
