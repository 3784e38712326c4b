//! API route configuration.

use crate::api::handlers::{
    delete_basket_by_id_handler, delete_basket_handler, get_basket_by_id_handler,
    get_basket_handler, update_basket_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Basket routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /basket?id={id}` - Fetch a basket
/// - `POST   /basket`         - Create or replace a basket
/// - `PUT    /basket`         - Same as `POST`
/// - `DELETE /basket?id={id}` - Delete a basket (idempotent)
/// - `GET    /basket/{id}`    - Fetch a basket (path form)
/// - `DELETE /basket/{id}`    - Delete a basket (path form)
pub fn basket_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/basket",
            get(get_basket_handler)
                .post(update_basket_handler)
                .put(update_basket_handler)
                .delete(delete_basket_handler),
        )
        .route(
            "/basket/{id}",
            get(get_basket_by_id_handler).delete(delete_basket_by_id_handler),
        )
}
