#![allow(dead_code)]

use axum::Router;
use basket_api::api::routes::basket_routes;
use basket_api::application::services::BasketService;
use basket_api::infrastructure::persistence::{BasketTtl, StoreBasketRepository};
use basket_api::infrastructure::store::{BasketStore, InMemoryBasketStore};
use basket_api::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

pub fn create_test_state() -> (AppState, Arc<InMemoryBasketStore>) {
    create_test_state_with_ttl(BasketTtl::DEFAULT)
}

pub fn create_test_state_with_ttl(ttl: BasketTtl) -> (AppState, Arc<InMemoryBasketStore>) {
    let store = Arc::new(InMemoryBasketStore::new());

    let repository = Arc::new(StoreBasketRepository::new(store.clone(), ttl));
    let basket_service = Arc::new(BasketService::new(repository));

    let state = AppState::new(basket_service, store.clone());

    (state, store)
}

/// Basket routes mounted under `/api`, without the rate limiter
/// (which needs the peer address from a real socket).
pub fn basket_app(state: AppState) -> Router {
    Router::new().nest("/api", basket_routes()).with_state(state)
}

/// Writes raw bytes under a basket id, bypassing the codec.
pub async fn seed_raw(store: &InMemoryBasketStore, id: &str, bytes: &[u8]) {
    store
        .set(id, bytes, Duration::from_secs(60))
        .await
        .unwrap();
}

pub fn basket_json(id: &str) -> Value {
    json!({
        "id": id,
        "delivery_method_id": 1,
        "shipping_price": 5.0,
        "items": [
            {
                "product_id": "p1",
                "name": "Widget",
                "unit_price": 9.99,
                "quantity": 2
            }
        ]
    })
}
