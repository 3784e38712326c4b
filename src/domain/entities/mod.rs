//! Core domain entities.
//!
//! Entities are plain data structures with invariant checks but no I/O.
//!
//! # Entity Types
//!
//! - [`CustomerBasket`] - A shopping basket keyed by a client-supplied id
//! - [`BasketItem`] - A single line in a basket

pub mod basket;

pub use basket::{BasketItem, CustomerBasket, MAX_AMOUNT, MAX_QUANTITY, is_valid_amount};
