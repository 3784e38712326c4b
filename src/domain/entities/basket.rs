//! Basket entity representing a customer's shopping cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest accepted unit or shipping price.
///
/// With at most 100 lines of 10,000 units each, totals stay far below
/// `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted quantity for a single line.
pub const MAX_QUANTITY: u32 = 10_000;

/// A shopping basket stored under its externally supplied id.
///
/// The id comes from the client (session or device token) and is the only key
/// the basket is stored under. Everything else is replaced wholesale on each
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerBasket {
    pub id: String,
    pub delivery_method_id: Option<i32>,
    pub shipping_price: Decimal,
    pub items: Vec<BasketItem>,
}

/// A single product line in a basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CustomerBasket {
    /// Creates an empty basket with no delivery method and zero shipping.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            delivery_method_id: None,
            shipping_price: Decimal::ZERO,
            items: Vec::new(),
        }
    }

    /// Returns true if the basket has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` over all lines, shipping excluded.
    ///
    /// Returns `None` if the sum does not fit in a `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }

    /// Subtotal plus shipping, or `None` on overflow.
    pub fn total(&self) -> Option<Decimal> {
        self.subtotal()?.checked_add(self.shipping_price)
    }

    /// Checks the invariants every stored basket must satisfy.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason for the first violated invariant:
    /// - empty id
    /// - shipping price outside `0..=MAX_AMOUNT`
    /// - a line with an empty product id, a quantity outside `1..=MAX_QUANTITY`
    ///   or a unit price outside `0..=MAX_AMOUNT`
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("basket id must not be empty".to_string());
        }

        if !is_valid_amount(self.shipping_price) {
            return Err(format!(
                "shipping price must be between 0 and {MAX_AMOUNT}, got {}",
                self.shipping_price
            ));
        }

        for (index, item) in self.items.iter().enumerate() {
            if item.product_id.trim().is_empty() {
                return Err(format!("item {index} has an empty product id"));
            }
            if item.quantity == 0 {
                return Err(format!(
                    "item {index} ({}) has quantity 0",
                    item.product_id
                ));
            }
            if item.quantity > MAX_QUANTITY {
                return Err(format!(
                    "item {index} ({}) has quantity {} above {MAX_QUANTITY}",
                    item.product_id, item.quantity
                ));
            }
            if !is_valid_amount(item.unit_price) {
                return Err(format!(
                    "item {index} ({}) has unit price {} outside 0..={MAX_AMOUNT}",
                    item.product_id, item.unit_price
                ));
            }
        }

        if self.total().is_none() {
            return Err("basket total is out of range".to_string());
        }

        Ok(())
    }
}

impl BasketItem {
    /// Creates a line without the optional display fields.
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            picture_url: None,
            brand: None,
            category: None,
        }
    }

    /// `unit_price * quantity`, or `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Returns true if `value` lies in `0..=MAX_AMOUNT`.
pub fn is_valid_amount(value: Decimal) -> bool {
    (value.is_zero() || value.is_sign_positive()) && value <= MAX_AMOUNT
}
