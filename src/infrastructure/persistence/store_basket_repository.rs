//! Basket repository backed by a key-value [`BasketStore`].

use crate::domain::entities::CustomerBasket;
use crate::domain::repositories::{BasketRepository, RepositoryError};
use crate::infrastructure::codec::{BasketCodec, CodecError};
use crate::infrastructure::store::{BasketStore, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Fixed expiry window applied on every basket write.
///
/// Reads never extend it. Expiry itself is left to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasketTtl(Duration);

impl BasketTtl {
    /// 30 days.
    pub const DEFAULT: Self = Self(Duration::from_secs(30 * 24 * 60 * 60));

    pub fn from_secs(seconds: u64) -> Self {
        Self(Duration::from_secs(seconds))
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl Default for BasketTtl {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<StoreError> for RepositoryError {
    fn from(e: StoreError) -> Self {
        RepositoryError::StoreUnavailable(e.to_string())
    }
}

/// [`BasketRepository`] that encodes baskets with [`BasketCodec`] and keeps
/// them in a [`BasketStore`] under their id.
pub struct StoreBasketRepository {
    store: Arc<dyn BasketStore>,
    codec: BasketCodec,
    ttl: BasketTtl,
}

impl StoreBasketRepository {
    pub fn new(store: Arc<dyn BasketStore>, ttl: BasketTtl) -> Self {
        Self {
            store,
            codec: BasketCodec::new(),
            ttl,
        }
    }

    /// The TTL applied on each write.
    pub fn ttl(&self) -> BasketTtl {
        self.ttl
    }

    fn record(op: &'static str, outcome: &'static str) {
        metrics::counter!("basket_store_requests_total", "op" => op, "outcome" => outcome)
            .increment(1);
    }
}

#[async_trait]
impl BasketRepository for StoreBasketRepository {
    async fn get_basket(&self, id: &str) -> Result<Option<CustomerBasket>, RepositoryError> {
        let bytes = match self.store.get(id).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                Self::record("get", "miss");
                return Ok(None);
            }
            Err(e) => {
                Self::record("get", "error");
                return Err(e.into());
            }
        };

        match self.codec.decode(&bytes) {
            Ok(basket) => {
                Self::record("get", "hit");
                Ok(Some(basket))
            }
            Err(CodecError::CorruptPayload(reason) | CodecError::Encode(reason)) => {
                Self::record("get", "corrupt");
                metrics::counter!("basket_corrupt_payload_total").increment(1);
                error!(basket_id = %id, %reason, "Stored basket does not decode");
                Err(RepositoryError::CorruptPayload {
                    key: id.to_string(),
                    reason,
                })
            }
        }
    }

    async fn update_basket(
        &self,
        basket: CustomerBasket,
    ) -> Result<CustomerBasket, RepositoryError> {
        basket
            .check_invariants()
            .map_err(RepositoryError::InvalidBasket)?;

        let bytes = self
            .codec
            .encode(&basket)
            .map_err(|e| RepositoryError::InvalidBasket(e.to_string()))?;

        if let Err(e) = self
            .store
            .set(&basket.id, &bytes, self.ttl.as_duration())
            .await
        {
            Self::record("set", "error");
            return Err(e.into());
        }

        Self::record("set", "ok");
        debug!(
            basket_id = %basket.id,
            items = basket.items.len(),
            "Basket written"
        );

        Ok(basket)
    }

    async fn delete_basket(&self, id: &str) -> Result<bool, RepositoryError> {
        if let Err(e) = self.store.delete(id).await {
            Self::record("delete", "error");
            return Err(e.into());
        }

        Self::record("delete", "ok");
        debug!(basket_id = %id, "Basket deleted");
        Ok(true)
    }
}
