//! Transfer contract for baskets.
//!
//! [`BasketDto`] is the only basket shape that crosses the service boundary.
//! Amounts travel as JSON numbers; the entity keeps them as exact decimals.

use crate::domain::entities::{BasketItem, CustomerBasket, MAX_AMOUNT, is_valid_amount};
use crate::error::AppError;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{NoneAsEmptyString, serde_as};
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

/// Compiled regex for basket id validation.
static BASKET_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.:-]+$").unwrap());

/// A basket as seen by API clients.
///
/// Accepted by `POST/PUT /api/basket` and returned (inside
/// [`BasketResponse`]) by every basket endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BasketDto {
    /// Client-supplied basket id (session or device token).
    #[validate(length(min = 1, max = 128, message = "Basket id must be 1-128 characters"))]
    #[validate(regex(
        path = *BASKET_ID_REGEX,
        message = "Basket id may only contain letters, digits, '_', '.', ':' and '-'"
    ))]
    pub id: String,

    /// Selected delivery method, `null` until the customer picks one.
    #[serde(default)]
    pub delivery_method_id: Option<i32>,

    /// Price of the selected delivery method. Ignored when no method is set.
    #[serde(default, with = "rust_decimal::serde::float")]
    #[validate(custom(function = "valid_amount"))]
    pub shipping_price: Decimal,

    /// At most 100 lines.
    #[serde(default)]
    #[validate(length(max = 100, message = "Too many items in basket"))]
    #[validate(nested)]
    pub items: Vec<BasketItemDto>,
}

/// A basket line as seen by API clients.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BasketItemDto {
    #[validate(length(min = 1, max = 128, message = "Product id must be 1-128 characters"))]
    pub product_id: String,

    #[validate(length(min = 1, max = 256, message = "Product name must be 1-256 characters"))]
    pub name: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "valid_amount"))]
    pub unit_price: Decimal,

    /// Number of units. `0` removes the line. The cap also applies after
    /// lines for the same product are merged.
    #[validate(range(min = 0, max = 10_000, message = "Quantity must be between 0 and 10000"))]
    pub quantity: i32,

    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default)]
    pub picture_url: Option<String>,

    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default)]
    pub brand: Option<String>,

    #[serde_as(deserialize_as = "NoneAsEmptyString")]
    #[serde(default)]
    pub category: Option<String>,
}

/// Query string for `GET/DELETE /api/basket?id=...`.
///
/// A missing `id` deserializes to an empty string so the service can reject it
/// with the usual validation error body.
#[derive(Debug, Deserialize)]
pub struct BasketIdQuery {
    #[serde(default)]
    pub id: String,
}

/// Response body for basket endpoints: the contract plus derived totals.
///
/// Totals are computed on every response and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct BasketResponse {
    #[serde(flatten)]
    pub basket: BasketDto,

    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

fn valid_amount(value: &Decimal) -> Result<(), ValidationError> {
    if !is_valid_amount(*value) {
        return Err(ValidationError::new("amount_range")
            .with_message(format!("Must be between 0 and {MAX_AMOUNT}").into()));
    }
    Ok(())
}

impl From<CustomerBasket> for BasketDto {
    fn from(basket: CustomerBasket) -> Self {
        Self {
            id: basket.id,
            delivery_method_id: basket.delivery_method_id,
            shipping_price: basket.shipping_price,
            items: basket.items.into_iter().map(BasketItemDto::from).collect(),
        }
    }
}

impl From<BasketItem> for BasketItemDto {
    fn from(item: BasketItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name,
            unit_price: item.unit_price,
            quantity: i32::try_from(item.quantity).unwrap_or(i32::MAX),
            picture_url: item.picture_url,
            brand: item.brand,
            category: item.category,
        }
    }
}

impl TryFrom<BasketDto> for BasketResponse {
    type Error = AppError;

    /// Computes the totals, failing instead of overflowing.
    fn try_from(basket: BasketDto) -> Result<Self, Self::Error> {
        let out_of_range = || {
            AppError::bad_request(
                "Basket total is out of range",
                json!({ "id": basket.id }),
            )
        };

        let subtotal = basket
            .items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| {
                item.unit_price
                    .checked_mul(Decimal::from(item.quantity))
                    .and_then(|line| acc.checked_add(line))
            })
            .ok_or_else(out_of_range)?;
        let total = subtotal
            .checked_add(basket.shipping_price)
            .ok_or_else(out_of_range)?;

        Ok(Self {
            basket,
            subtotal,
            total,
        })
    }
}
