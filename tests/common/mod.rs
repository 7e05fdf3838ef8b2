//! Shared helpers for the integration tests: a router over a fresh SQLite
//! file per test, request shortcuts and catalog fixtures.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use binderdex::api::AppState;
use binderdex::config::Config;
use binderdex::domain::{ColorCode, Rarity};
use binderdex::models::card::{CardDesign, CardPrinting, CardSet, CatalogBatch};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Default API key seeded by migration (must match m20250302_add_users.rs)
pub const DEFAULT_API_KEY: &str = "binderdex_default_api_key_please_regenerate";

pub async fn spawn_app() -> (Router, Arc<AppState>) {
    let db_path =
        std::env::temp_dir().join(format!("binderdex-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;

    let state = binderdex::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");

    (binderdex::api::router(state.clone()).await, state)
}

pub async fn spawn_app_with_catalog(batch: CatalogBatch) -> Router {
    let (app, state) = spawn_app().await;
    state
        .store()
        .upsert_catalog(&batch)
        .await
        .expect("Failed to seed catalog");
    app
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    api_key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-Api-Key", key);
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, None).await
}

/// Registers a user and returns its API key.
pub async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({ "username": username, "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["data"]["api_key"].as_str().unwrap().to_string()
}

pub fn set(code: &str, name: &str, released_at: &str) -> CardSet {
    CardSet {
        code: code.to_string(),
        name: name.to_string(),
        set_type: Some("expansion".to_string()),
        released_at: Some(released_at.to_string()),
        icon_svg_uri: None,
    }
}

pub fn design(id: &str, name: &str, colors: &[ColorCode]) -> CardDesign {
    CardDesign {
        id: id.to_string(),
        name: name.to_string(),
        mana_cost: None,
        type_line: "Creature".to_string(),
        oracle_text: None,
        mana_value: 0.0,
        keywords: Vec::new(),
        colors: colors.to_vec(),
    }
}

pub fn printing(
    id: &str,
    design_id: &str,
    set_code: &str,
    rarity: Rarity,
    price_usd: Option<f64>,
) -> CardPrinting {
    CardPrinting {
        id: id.to_string(),
        design_id: design_id.to_string(),
        set_code: set_code.to_string(),
        collector_number: "1".to_string(),
        rarity,
        price_usd,
        price_usd_foil: None,
        image_uri_small: None,
        image_uri_normal: None,
        released_at: None,
    }
}

/// One set, one design per name, one printing per design.
pub fn single_set_catalog(cards: &[(&str, &[ColorCode], Rarity, Option<f64>)]) -> CatalogBatch {
    let mut batch = CatalogBatch {
        sets: vec![set("tst", "Test Set", "2024-01-01")],
        ..CatalogBatch::default()
    };

    for (i, (name, colors, rarity, price)) in cards.iter().enumerate() {
        let design_id = format!("d-{i:03}");
        let printing_id = format!("p-{i:03}");
        batch.designs.push(design(&design_id, name, colors));
        batch
            .printings
            .push(printing(&printing_id, &design_id, "tst", *rarity, *price));
    }

    batch
}

pub fn names(body: &Value) -> Vec<String> {
    body["data"]["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

pub fn ids(body: &Value) -> Vec<String> {
    body["data"]["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}
