//! Handlers for basket endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::basket::{BasketDto, BasketIdQuery, BasketResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the basket stored under the `id` query parameter.
///
/// # Endpoint
///
/// `GET /api/basket?id={id}`
///
/// # Response Codes
///
/// - **200 OK**: Basket found
/// - **400 Bad Request**: Missing or blank id
/// - **404 Not Found**: No basket stored under the id (never written, deleted or expired)
/// - **503 Service Unavailable**: Store unreachable or stored basket unreadable; retry later
///
/// # Response
///
/// ```json
/// {
///   "id": "cart-1",
///   "delivery_method_id": null,
///   "shipping_price": 0.0,
///   "items": [
///     { "product_id": "p1", "name": "Widget", "unit_price": 9.99, "quantity": 2,
///       "picture_url": null, "brand": null, "category": null }
///   ],
///   "subtotal": 19.98,
///   "total": 19.98
/// }
/// ```
pub async fn get_basket_handler(
    State(state): State<AppState>,
    Query(query): Query<BasketIdQuery>,
) -> Result<Json<BasketResponse>, AppError> {
    let basket = state.basket_service.get_basket(&query.id).await?;
    Ok(Json(BasketResponse::try_from(basket)?))
}

/// Path variant of [`get_basket_handler`].
///
/// # Endpoint
///
/// `GET /api/basket/{id}`
pub async fn get_basket_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BasketResponse>, AppError> {
    let basket = state.basket_service.get_basket(&id).await?;
    Ok(Json(BasketResponse::try_from(basket)?))
}

/// Creates or replaces a basket.
///
/// # Endpoint
///
/// `POST /api/basket` or `PUT /api/basket`
///
/// The whole basket is replaced; fields are never merged with the stored
/// version. Every successful write renews the basket's expiry.
///
/// # Request Body
///
/// ```json
/// {
///   "id": "cart-1",
///   "delivery_method_id": null,
///   "shipping_price": 0,
///   "items": [
///     { "product_id": "p1", "name": "Widget", "unit_price": 9.99, "quantity": 2 }
///   ]
/// }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: Basket stored; body is the stored basket
/// - **400 Bad Request**: Validation failed
/// - **503 Service Unavailable**: Store unreachable; retry later
pub async fn update_basket_handler(
    State(state): State<AppState>,
    Json(payload): Json<BasketDto>,
) -> Result<Json<BasketResponse>, AppError> {
    let basket = state.basket_service.update_basket(payload).await?;
    Ok(Json(BasketResponse::try_from(basket)?))
}

/// Deletes the basket named by the `id` query parameter.
///
/// # Endpoint
///
/// `DELETE /api/basket?id={id}`
///
/// Idempotent: deleting a basket that does not exist also returns `true`.
///
/// # Response Codes
///
/// - **200 OK**: `true`
/// - **400 Bad Request**: Missing or blank id
/// - **503 Service Unavailable**: Store unreachable; retry later
pub async fn delete_basket_handler(
    State(state): State<AppState>,
    Query(query): Query<BasketIdQuery>,
) -> Result<Json<bool>, AppError> {
    let deleted = state.basket_service.delete_basket(&query.id).await?;
    Ok(Json(deleted))
}

/// Path variant of [`delete_basket_handler`].
///
/// # Endpoint
///
/// `DELETE /api/basket/{id}`
pub async fn delete_basket_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<bool>, AppError> {
    let deleted = state.basket_service.delete_basket(&id).await?;
    Ok(Json(deleted))
}
