//! Integration tests for binder management.

mod common;

use axum::http::StatusCode;
use binderdex::domain::{ColorCode, Rarity};
use binderdex::models::card::CatalogBatch;
use common::{DEFAULT_API_KEY, design, get, printing, register, send, set, spawn_app_with_catalog};
use serde_json::{Value, json};

fn catalog() -> CatalogBatch {
    let mut foil = printing("p-bolt", "d-bolt", "m10", Rarity::Common, Some(1.5));
    foil.price_usd_foil = Some(4.0);

    CatalogBatch {
        sets: vec![set("m10", "Magic 2010", "2009-07-17")],
        designs: vec![
            design("d-bolt", "Lightning Bolt", &[ColorCode::Red]),
            design("d-counter", "Counterspell", &[ColorCode::Blue]),
        ],
        printings: vec![
            foil,
            printing("p-counter", "d-counter", "m10", Rarity::Uncommon, None),
        ],
    }
}

async fn create_binder(app: &axum::Router, key: &str, body: Value) -> i64 {
    let (status, body) = send(app, "POST", "/api/binders", Some(key), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["data"]["id"].as_i64().unwrap()
}

fn entry_quantities(body: &Value) -> Vec<(String, i64, bool)> {
    body["data"]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["printing_id"].as_str().unwrap().to_string(),
                e["quantity"].as_i64().unwrap(),
                e["foil"].as_bool().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_binder_lifecycle() {
    let app = spawn_app_with_catalog(catalog()).await;
    let key = DEFAULT_API_KEY;

    let id = create_binder(&app, key, json!({ "name": "  Trade Binder ", "description": "Extras" })).await;

    let (status, body) = send(&app, "GET", "/api/binders", Some(key), None).await;
    assert_eq!(status, StatusCode::OK);
    let binders = body["data"].as_array().unwrap();
    assert_eq!(binders.len(), 1);
    assert_eq!(binders[0]["name"], "Trade Binder");
    assert_eq!(binders[0]["card_count"], 0);
    assert_eq!(binders[0]["is_public"], false);

    let uri = format!("/api/binders/{id}/cards");
    let (status, _) = send(&app, "POST", &uri, Some(key), Some(json!({ "printing_id": "p-bolt", "quantity": 2 }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", &uri, Some(key), Some(json!({ "printing_id": "p-bolt" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry_quantities(&body), vec![("p-bolt".to_string(), 3, false)]);

    let (_, body) = send(
        &app,
        "POST",
        &uri,
        Some(key),
        Some(json!({ "printing_id": "p-bolt", "foil": true, "condition": "lightly_played" })),
    )
    .await;
    assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "POST", &uri, Some(key), Some(json!({ "printing_id": "p-counter", "quantity": 4 }))).await;
    assert_eq!(body["data"]["card_count"], 8);
    // 3 x 1.5 + 1 x 4.0 (foil) + 4 x unpriced
    assert!((body["data"]["total_value"].as_f64().unwrap() - 8.5).abs() < 1e-9);

    let foil_entry = body["data"]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["foil"] == true)
        .unwrap()
        .clone();
    assert_eq!(foil_entry["condition"], "lightly_played");
    assert_eq!(foil_entry["unit_price"], 4.0);

    let counter_id = body["data"]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["printing_id"] == "p-counter")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let entry_uri = format!("/api/binders/{id}/cards/{counter_id}");
    let (status, body) = send(&app, "PUT", &entry_uri, Some(key), Some(json!({ "quantity": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["card_count"], 5);

    let (status, body) = send(&app, "PUT", &entry_uri, Some(key), Some(json!({ "quantity": 0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["card_count"], 4);
    assert!(
        body["data"]["entries"]
            .as_array()
            .unwrap()
            .iter()
            .all(|e| e["printing_id"] != "p-counter")
    );

    let (status, _) = send(&app, "DELETE", &entry_uri, Some(key), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/api/binders/{id}"), Some(key), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/api/binders/{id}"), Some(key), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_binder_validation() {
    let app = spawn_app_with_catalog(catalog()).await;
    let key = DEFAULT_API_KEY;

    let (status, _) = send(&app, "POST", "/api/binders", Some(key), Some(json!({ "name": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let long_name = "x".repeat(65);
    let (status, _) = send(&app, "POST", "/api/binders", Some(key), Some(json!({ "name": long_name }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = create_binder(&app, key, json!({ "name": "Cube" })).await;
    let uri = format!("/api/binders/{id}/cards");

    let (status, _) = send(&app, "POST", &uri, Some(key), Some(json!({ "printing_id": "p-bolt", "quantity": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", &uri, Some(key), Some(json!({ "printing_id": "p-missing" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(key),
        Some(json!({ "printing_id": "p-bolt", "condition": "mint" })),
    )
    .await;
    assert!(status.is_client_error());

    let (status, _) = send(&app, "GET", "/api/binders/999", Some(key), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/api/binders", None, Some(json!({ "name": "Anon" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_binder_visibility_and_ownership() {
    let app = spawn_app_with_catalog(catalog()).await;
    let owner = DEFAULT_API_KEY;
    let other = register(&app, "rival").await;

    let id = create_binder(&app, owner, json!({ "name": "Vault" })).await;
    let uri = format!("/api/binders/{id}");

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &uri, Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "PUT", &uri, Some(&other), Some(json!({ "is_public": true }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(owner),
        Some(json!({ "is_public": true, "name": "Showcase" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Showcase");

    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_public"], true);

    let (status, _) = send(
        &app,
        "POST",
        &format!("{uri}/cards"),
        Some(&other),
        Some(json!({ "printing_id": "p-bolt" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/binders", Some(&other), None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
