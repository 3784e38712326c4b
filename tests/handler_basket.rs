mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use basket_api::infrastructure::persistence::BasketTtl;
use serde_json::json;

fn server() -> (TestServer, std::sync::Arc<basket_api::prelude::InMemoryBasketStore>) {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(common::basket_app(state)).unwrap();
    (server, store)
}

#[tokio::test]
async fn test_update_then_get_returns_same_basket() {
    let (server, _store) = server();

    let response = server
        .post("/api/basket")
        .json(&common::basket_json("cart-1"))
        .await;

    response.assert_status_ok();
    let written = response.json::<serde_json::Value>();
    assert_eq!(written["id"], "cart-1");
    assert_eq!(written["items"][0]["quantity"], 2);

    let response = server.get("/api/basket").add_query_param("id", "cart-1").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], "cart-1");
    assert_eq!(json["delivery_method_id"], 1);
    assert_eq!(json["shipping_price"], 5.0);
    assert_eq!(json["items"][0]["product_id"], "p1");
    assert_eq!(json["items"][0]["unit_price"], 9.99);
    assert_eq!(json["subtotal"], 19.98);
    assert_eq!(json["total"], 24.98);
}

#[tokio::test]
async fn test_put_is_an_alias_for_post() {
    let (server, _store) = server();

    server
        .put("/api/basket")
        .json(&common::basket_json("cart-put"))
        .await
        .assert_status_ok();

    server.get("/api/basket/cart-put").await.assert_status_ok();
}

#[tokio::test]
async fn test_update_replaces_whole_basket() {
    let (server, _store) = server();

    server
        .post("/api/basket")
        .json(&common::basket_json("cart-1"))
        .await
        .assert_status_ok();

    server
        .post("/api/basket")
        .json(&json!({
            "id": "cart-1",
            "items": [
                { "product_id": "p2", "name": "Gadget", "unit_price": 3.5, "quantity": 1 }
            ]
        }))
        .await
        .assert_status_ok();

    let json = server
        .get("/api/basket/cart-1")
        .await
        .json::<serde_json::Value>();

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product_id"], "p2");
    assert!(json["delivery_method_id"].is_null());
    assert_eq!(json["shipping_price"], 0.0);
}

#[tokio::test]
async fn test_update_drops_zero_quantity_and_merges_duplicates() {
    let (server, _store) = server();

    let response = server
        .post("/api/basket")
        .json(&json!({
            "id": "cart-merge",
            "items": [
                { "product_id": "p1", "name": "Widget", "unit_price": 2.0, "quantity": 1 },
                { "product_id": "p2", "name": "Gadget", "unit_price": 1.0, "quantity": 0 },
                { "product_id": "p1", "name": "Widget", "unit_price": 2.0, "quantity": 3 }
            ]
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product_id"], "p1");
    assert_eq!(items[0]["quantity"], 4);
    assert_eq!(json["subtotal"], 8.0);
}

#[tokio::test]
async fn test_get_missing_basket_returns_not_found() {
    let (server, _store) = server();

    let response = server.get("/api/basket").add_query_param("id", "nope").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_get_without_id_is_validation_error() {
    let (server, _store) = server();

    let response = server.get("/api/basket").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_update_rejects_invalid_basket() {
    let (server, store) = server();

    let response = server
        .post("/api/basket")
        .json(&json!({
            "id": "cart-bad",
            "items": [
                { "product_id": "p1", "name": "Widget", "unit_price": 1.0, "quantity": -3 }
            ]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_update_rejects_blank_id() {
    let (server, store) = server();

    let response = server
        .post("/api/basket")
        .json(&json!({ "id": "   ", "items": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (server, _store) = server();

    server
        .post("/api/basket")
        .json(&common::basket_json("cart-del"))
        .await
        .assert_status_ok();

    let response = server
        .delete("/api/basket")
        .add_query_param("id", "cart-del")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<bool>(), true);

    server
        .get("/api/basket/cart-del")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Deleting again still succeeds
    let response = server.delete("/api/basket/cart-del").await;
    response.assert_status_ok();
    assert_eq!(response.json::<bool>(), true);
}

#[tokio::test]
async fn test_corrupt_payload_returns_retryable_unavailable() {
    let (server, store) = server();
    common::seed_raw(&store, "cart-2", b"{\"id\":\"cart-2\",\"items\":[").await;

    let response = server.get("/api/basket").add_query_param("id", "cart-2").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.header("retry-after"), "1");
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "service_unavailable");
    assert_eq!(json["error"]["details"]["retryable"], true);
}

#[tokio::test]
async fn test_store_outage_returns_retryable_unavailable() {
    let (server, store) = server();
    store.set_available(false);

    let response = server.get("/api/basket").add_query_param("id", "cart-3").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.header("retry-after"), "1");

    let response = server
        .post("/api/basket")
        .json(&common::basket_json("cart-3"))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let response = server.delete("/api/basket/cart-3").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    // Outage is not sticky
    store.set_available(true);
    server
        .post("/api/basket")
        .json(&common::basket_json("cart-3"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_error_body_does_not_leak_store_details() {
    let (server, store) = server();
    store.set_available(false);

    let response = server.get("/api/basket/cart-3").await;

    let body = response.text();
    assert!(!body.contains("in-memory"));
    assert!(!body.to_lowercase().contains("redis"));
}

#[tokio::test]
async fn test_update_rejects_amounts_that_would_overflow_totals() {
    let (server, store) = server();

    let response = server
        .post("/api/basket")
        .json(&json!({
            "id": "cart-big",
            "items": [
                { "product_id": "p1", "name": "W", "unit_price": 5e28, "quantity": 2 }
            ]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(store.is_empty().await);

    // The service keeps answering
    server
        .get("/api/basket/cart-big")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_accepts_largest_allowed_amounts() {
    let (server, _store) = server();

    let response = server
        .post("/api/basket")
        .json(&json!({
            "id": "cart-max",
            "delivery_method_id": 1,
            "shipping_price": 1e9,
            "items": [
                { "product_id": "p1", "name": "W", "unit_price": 1e9, "quantity": 10000 }
            ]
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["subtotal"], 1e13);
    assert_eq!(json["total"], 10_001_000_000_000.0);
}

#[tokio::test]
async fn test_corrupt_oversized_amount_in_store_is_unavailable_not_a_crash() {
    let (server, store) = server();
    common::seed_raw(
        &store,
        "cart-big",
        br#"{"id":"cart-big","delivery_method_id":null,"shipping_price":"0","items":[{"product_id":"p1","name":"W","unit_price":"50000000000000000000000000000","quantity":2}]}"#,
    )
    .await;

    let response = server.get("/api/basket/cart-big").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_out_of_range_ttl_fails_the_write_without_crashing() {
    let (state, _store) = common::create_test_state_with_ttl(BasketTtl::from_secs(u64::MAX / 2));
    let server = TestServer::new(common::basket_app(state)).unwrap();

    let response = server
        .post("/api/basket")
        .json(&json!({ "id": "cart-1" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
