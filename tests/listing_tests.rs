//! Integration tests for marketplace listings.

mod common;

use axum::http::StatusCode;
use binderdex::domain::{ColorCode, Rarity};
use common::{DEFAULT_API_KEY, get, register, send, single_set_catalog, spawn_app_with_catalog};
use serde_json::{Value, json};

const R: &[ColorCode] = &[ColorCode::Red];

async fn list(app: &axum::Router, key: &str, printing_id: &str, price_cents: i64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/listings",
        Some(key),
        Some(json!({ "printing_id": printing_id, "quantity": 1, "price_cents": price_cents })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "listing failed: {body}");
    body["data"]["id"].as_i64().unwrap()
}

fn prices(listings: &Value) -> Vec<i64> {
    listings
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["price_cents"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_and_browse_listings() {
    let app = spawn_app_with_catalog(single_set_catalog(&[
        ("Lightning Bolt", R, Rarity::Common, Some(1.0)),
        ("Shock", R, Rarity::Common, Some(0.1)),
    ]))
    .await;
    let seller = register(&app, "dealer").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/listings",
        Some(&seller),
        Some(json!({
            "printing_id": "p-000",
            "condition": "heavily_played",
            "foil": true,
            "quantity": 2,
            "price_cents": 350
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let listing = &body["data"];
    assert_eq!(listing["seller_name"], "dealer");
    assert_eq!(listing["card_name"], "Lightning Bolt");
    assert_eq!(listing["condition"], "heavily_played");
    assert_eq!(listing["status"], "active");
    assert_eq!(listing["foil"], true);

    list(&app, DEFAULT_API_KEY, "p-000", 125).await;
    list(&app, &seller, "p-000", 900).await;
    list(&app, &seller, "p-001", 10).await;

    let (status, body) = get(&app, "/api/listings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCount"], 4);
    assert_eq!(body["data"]["totalPages"], 1);
    assert_eq!(prices(&body["data"]["listings"]), vec![10, 900, 125, 350]);

    let (_, body) = get(&app, "/api/listings?printing_id=p-001").await;
    assert_eq!(body["data"]["totalCount"], 1);

    let (status, body) = get(&app, "/api/cards/p-000/listings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prices(&body["data"]), vec![125, 350, 900]);

    let (status, _) = get(&app, "/api/cards/p-missing/listings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for page in ["0", "9223372036854775807", "300000000000000000"] {
        let (status, _) = get(&app, &format!("/api/listings?page={page}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "page={page}");
    }
}

#[tokio::test]
async fn test_listing_validation() {
    let app = spawn_app_with_catalog(single_set_catalog(&[(
        "Lightning Bolt",
        R,
        Rarity::Common,
        Some(1.0),
    )]))
    .await;
    let key = DEFAULT_API_KEY;

    let cases = [
        (json!({ "printing_id": "p-000", "quantity": 1, "price_cents": 0 }), StatusCode::BAD_REQUEST),
        (json!({ "printing_id": "p-000", "quantity": 0, "price_cents": 100 }), StatusCode::BAD_REQUEST),
        (json!({ "printing_id": " ", "quantity": 1, "price_cents": 100 }), StatusCode::BAD_REQUEST),
        (json!({ "printing_id": "p-404", "quantity": 1, "price_cents": 100 }), StatusCode::NOT_FOUND),
    ];

    for (payload, expected) in cases {
        let (status, _) = send(&app, "POST", "/api/listings", Some(key), Some(payload.clone())).await;
        assert_eq!(status, expected, "{payload}");
    }

    let (status, _) = send(
        &app,
        "POST",
        "/api/listings",
        None,
        Some(json!({ "printing_id": "p-000", "quantity": 1, "price_cents": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_only_seller_can_withdraw() {
    let app = spawn_app_with_catalog(single_set_catalog(&[(
        "Lightning Bolt",
        R,
        Rarity::Common,
        Some(1.0),
    )]))
    .await;
    let seller = register(&app, "seller").await;
    let buyer = register(&app, "buyer").await;

    let id = list(&app, &seller, "p-000", 200).await;
    let uri = format!("/api/listings/{id}");

    let (status, _) = send(&app, "DELETE", &uri, Some(&buyer), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, Some(&seller), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &uri, Some(&seller), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(&app, "/api/listings").await;
    assert_eq!(body["data"]["totalCount"], 0);
    assert_eq!(body["data"]["totalPages"], 0);
}
