//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::BasketService;
use crate::infrastructure::persistence::StoreBasketRepository;
use crate::infrastructure::store::BasketStore;

/// Application state cloned into each request.
///
/// Holds no per-basket data; all basket state lives in the store.
#[derive(Clone)]
pub struct AppState {
    pub basket_service: Arc<BasketService<StoreBasketRepository>>,
    pub store: Arc<dyn BasketStore>,
}

impl AppState {
    pub fn new(
        basket_service: Arc<BasketService<StoreBasketRepository>>,
        store: Arc<dyn BasketStore>,
    ) -> Self {
        Self {
            basket_service,
            store,
        }
    }
}
