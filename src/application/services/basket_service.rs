//! Basket retrieval, update and deletion service.

use std::sync::Arc;

use crate::api::dto::basket::{BasketDto, BasketItemDto};
use crate::domain::entities::{BasketItem, CustomerBasket, MAX_QUANTITY};
use crate::domain::repositories::{BasketRepository, RepositoryError};
use crate::error::AppError;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{error, warn};
use validator::Validate;

/// Service mediating between the transfer contract and the basket repository.
///
/// This is the only layer that turns repository outcomes into client-facing
/// results: a missing basket becomes [`AppError::NotFound`], store and payload
/// failures become a retryable [`AppError::ServiceUnavailable`]. Nothing is
/// retried here.
pub struct BasketService<R: BasketRepository> {
    repository: Arc<R>,
}

impl<R: BasketRepository> BasketService<R> {
    /// Creates a new basket service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Retrieves a basket by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the id is blank.
    /// Returns [`AppError::NotFound`] if no basket is stored under the id.
    /// Returns [`AppError::ServiceUnavailable`] if the store is unreachable or
    /// the stored basket is corrupt.
    pub async fn get_basket(&self, id: &str) -> Result<BasketDto, AppError> {
        let id = normalize_id(id)?;

        let basket = self
            .repository
            .get_basket(id)
            .await
            .map_err(|e| log_repository_error(id, e))?;

        basket.map(BasketDto::from).ok_or_else(|| {
            AppError::not_found(
                format!("Basket with id {id} not found"),
                json!({ "id": id }),
            )
        })
    }

    /// Replaces the whole basket, creating it if it does not exist.
    ///
    /// # Normalization
    ///
    /// - The id is trimmed
    /// - Without a delivery method the shipping price is reset to zero
    /// - Lines with quantity `0` are dropped
    /// - Lines for the same product are merged: quantities are summed and the
    ///   last line's price and display fields win; the merged quantity is held
    ///   to the same per-line cap
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the contract fails validation
    /// (empty or malformed id, price or quantity out of range, too many lines).
    /// Returns [`AppError::ServiceUnavailable`] if the store is unreachable.
    pub async fn update_basket(&self, mut dto: BasketDto) -> Result<BasketDto, AppError> {
        dto.id = dto.id.trim().to_string();
        dto.validate()?;

        let basket = into_entity(dto)?;
        let id = basket.id.clone();

        let stored = self
            .repository
            .update_basket(basket)
            .await
            .map_err(|e| log_repository_error(&id, e))?;

        Ok(BasketDto::from(stored))
    }

    /// Deletes a basket. Succeeds whether or not it existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the id is blank.
    /// Returns [`AppError::ServiceUnavailable`] if the store is unreachable.
    pub async fn delete_basket(&self, id: &str) -> Result<bool, AppError> {
        let id = normalize_id(id)?;

        self.repository
            .delete_basket(id)
            .await
            .map_err(|e| log_repository_error(id, e))
            .map_err(AppError::from)
    }
}

fn normalize_id(id: &str) -> Result<&str, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::bad_request(
            "Basket id must not be empty",
            json!({ "field": "id" }),
        ));
    }
    Ok(id)
}

/// Logs a repository failure at a level matching its severity and passes it on.
fn log_repository_error(id: &str, e: RepositoryError) -> RepositoryError {
    match &e {
        RepositoryError::CorruptPayload { reason, .. } => {
            error!(basket_id = %id, %reason, "Corrupt basket payload in store");
        }
        RepositoryError::StoreUnavailable(reason) => {
            warn!(basket_id = %id, %reason, "Basket store unavailable");
        }
        RepositoryError::InvalidBasket(reason) => {
            warn!(basket_id = %id, %reason, "Basket rejected by repository");
        }
    }
    e
}

/// Maps a validated contract onto the entity, applying the defaulting rules.
fn into_entity(dto: BasketDto) -> Result<CustomerBasket, AppError> {
    let shipping_price = if dto.delivery_method_id.is_some() {
        dto.shipping_price
    } else {
        Decimal::ZERO
    };

    let mut items: Vec<BasketItem> = Vec::with_capacity(dto.items.len());
    for line in dto.items {
        let Some(item) = into_item(line)? else {
            continue;
        };

        match items.iter_mut().find(|i| i.product_id == item.product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(item.quantity)
                    .filter(|quantity| *quantity <= MAX_QUANTITY)
                    .ok_or_else(|| {
                        AppError::bad_request(
                            format!("Quantity must not exceed {MAX_QUANTITY} per product"),
                            json!({ "product_id": item.product_id }),
                        )
                    })?;
                existing.unit_price = item.unit_price;
                existing.name = item.name;
                existing.picture_url = item.picture_url;
                existing.brand = item.brand;
                existing.category = item.category;
            }
            None => items.push(item),
        }
    }

    Ok(CustomerBasket {
        id: dto.id,
        delivery_method_id: dto.delivery_method_id,
        shipping_price,
        items,
    })
}

/// Returns `None` for a zero-quantity line, which means "remove".
fn into_item(line: BasketItemDto) -> Result<Option<BasketItem>, AppError> {
    let quantity = u32::try_from(line.quantity).map_err(|_| {
        AppError::bad_request(
            "Quantity must not be negative",
            json!({ "product_id": line.product_id, "quantity": line.quantity }),
        )
    })?;

    if quantity == 0 {
        return Ok(None);
    }

    Ok(Some(BasketItem {
        product_id: line.product_id.trim().to_string(),
        name: line.name,
        unit_price: line.unit_price,
        quantity,
        picture_url: line.picture_url,
        brand: line.brand,
        category: line.category,
    }))
}
