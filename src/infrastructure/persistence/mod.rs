//! Repository implementations backed by the key-value store.
//!
//! # Available Repositories
//!
//! - [`StoreBasketRepository`] - Baskets encoded by [`crate::infrastructure::codec`]
//!   and written with a fixed [`BasketTtl`]

mod store_basket_repository;

pub use store_basket_repository::{BasketTtl, StoreBasketRepository};
