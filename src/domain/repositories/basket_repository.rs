//! Repository trait for basket data access.

use crate::domain::entities::CustomerBasket;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by basket repositories.
///
/// "Not found" is deliberately absent: a missing basket is `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The basket failed local validation. No store call was made.
    #[error("Invalid basket: {0}")]
    InvalidBasket(String),

    /// Stored bytes exist but do not decode to a valid basket.
    #[error("Corrupt payload for basket '{key}': {reason}")]
    CorruptPayload { key: String, reason: String },

    /// The store could not be reached, timed out, or rejected the command.
    #[error("Basket store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Repository interface for shopping baskets.
///
/// Writes are whole-basket upserts. Two concurrent updates of the same id race
/// and the later write wins; there is no versioning.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::StoreBasketRepository`] - codec + key-value store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BasketRepository: Send + Sync {
    /// Fetches a basket by id.
    ///
    /// Reading does not renew the basket's TTL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(basket))` if stored
    /// - `Ok(None)` if the id was never written, was deleted, or expired
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::CorruptPayload`] if the stored bytes do not decode.
    /// Returns [`RepositoryError::StoreUnavailable`] on store failures.
    async fn get_basket(&self, id: &str) -> Result<Option<CustomerBasket>, RepositoryError>;

    /// Stores the whole basket, creating it if absent, and renews its TTL.
    ///
    /// Returns the basket that was written, without re-reading it.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidBasket`] if the id is empty or another
    /// invariant is violated; the store is not touched in that case.
    /// Returns [`RepositoryError::StoreUnavailable`] on store failures.
    async fn update_basket(&self, basket: CustomerBasket)
    -> Result<CustomerBasket, RepositoryError>;

    /// Deletes a basket.
    ///
    /// Idempotent: returns `Ok(true)` whether or not the basket existed.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::StoreUnavailable`] on store failures.
    async fn delete_basket(&self, id: &str) -> Result<bool, RepositoryError>;
}
