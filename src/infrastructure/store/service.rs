//! Basket store trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during store operations.
///
/// A missing key is not an error; see [`BasketStore::get`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The endpoint could not be reached or the connection dropped.
    #[error("Store connection error: {0}")]
    Unavailable(String),

    /// The call did not complete within the configured response timeout.
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with an error.
    #[error("Store operation error: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Primitive operations against a key-value endpoint.
///
/// Keys are basket ids; values are opaque bytes produced by the codec.
/// Implementations must be thread-safe. Every call is independent; nothing is
/// retried here.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisBasketStore`] - `GET` / `SET EX` / `DEL`
/// - [`crate::infrastructure::store::InMemoryBasketStore`] - `HashMap` with expiry instants
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BasketStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` if the key exists
    /// - `Ok(None)` if it does not (never written, deleted or expired)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity failures or timeouts.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// Every successful write resets the key's time-to-live to `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity failures or timeouts.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> StoreResult<()>;

    /// Removes `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity failures or timeouts.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Checks if the store backend is reachable.
    ///
    /// Used by the health endpoint.
    async fn ping(&self) -> bool;
}
