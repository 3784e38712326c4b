//! Key-value store clients holding serialized baskets.
//!
//! Provides a [`BasketStore`] trait with two implementations:
//! - [`RedisBasketStore`] - Production Redis-backed store with native TTL
//! - [`InMemoryBasketStore`] - Process-local store for tests and development,
//!   with a background sweeper standing in for native TTL

mod memory_store;
mod redis_store;
mod service;

pub use memory_store::{InMemoryBasketStore, spawn_sweeper};
pub use redis_store::RedisBasketStore;
pub use service::{BasketStore, StoreError, StoreResult};

#[cfg(test)]
pub use service::MockBasketStore;
