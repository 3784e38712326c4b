//! Redis-backed basket store.

use super::service::{BasketStore, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

/// Redis store for serialized baskets.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
/// Unlike a read-through cache this store is the system of record for baskets,
/// so every failure is reported to the caller instead of being swallowed.
///
/// Each command is bounded by `response_timeout`; an elapsed timeout is
/// reported as [`StoreError::Timeout`].
pub struct RedisBasketStore {
    client: ConnectionManager,
    key_prefix: String,
    response_timeout: Duration,
}

impl RedisBasketStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - Namespace prepended to every basket id (e.g., `"basket:"`)
    /// - `response_timeout` - Upper bound for connecting and for each command
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails. Returns [`StoreError::Timeout`]
    /// if connecting takes longer than `response_timeout`.
    pub async fn connect(
        redis_url: &str,
        key_prefix: &str,
        response_timeout: Duration,
    ) -> StoreResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(response_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Timeout(response_timeout))?
            .map_err(|e| StoreError::Unavailable(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self {
            client: manager,
            key_prefix: key_prefix.to_string(),
            response_timeout,
        };

        let mut conn = store.client.clone();
        store
            .bounded(conn.ping::<()>())
            .await
            .map_err(|e| StoreError::Unavailable(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(store)
    }

    /// Connects with exponential backoff, giving up after `attempts` tries.
    ///
    /// Only used at startup; request-path operations are never retried.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt.
    pub async fn connect_with_retry(
        redis_url: &str,
        key_prefix: &str,
        response_timeout: Duration,
        attempts: usize,
    ) -> StoreResult<Self> {
        info!("Connecting to Redis ({} attempts)", attempts);

        // 200ms, 400ms, 800ms, ... capped at 5s
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(100)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(attempts.saturating_sub(1));

        Retry::start(strategy, move || async move {
            Self::connect(redis_url, key_prefix, response_timeout)
                .await
                .inspect_err(|e| warn!("Redis connection attempt failed: {}", e))
        })
        .await
    }

    /// Remaining time-to-live of a basket key.
    ///
    /// Returns `None` if the key does not exist or has no expiry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on connectivity failures or timeouts.
    pub async fn remaining_ttl(&self, key: &str) -> StoreResult<Option<Duration>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        // TTL returns -2 for a missing key and -1 for a key without expiry.
        let seconds: i64 = self.bounded(conn.ttl(&full_key)).await?;
        Ok(u64::try_from(seconds).ok().map(Duration::from_secs))
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// Runs a Redis command under the response timeout.
    async fn bounded<T>(
        &self,
        command: impl Future<Output = Result<T, RedisError>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.response_timeout, command).await {
            Ok(result) => result.map_err(classify),
            Err(_) => Err(StoreError::Timeout(self.response_timeout)),
        }
    }
}

/// Maps a Redis error to the connectivity/operation split.
fn classify(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_timeout() || e.is_connection_dropped() || e.is_connection_refusal()
    {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Operation(e.to_string())
    }
}

#[async_trait]
impl BasketStore for RedisBasketStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let value: Option<Vec<u8>> = self.bounded(conn.get(&full_key)).await.inspect_err(|e| {
            warn!("Redis GET error for {}: {}", key, e);
        })?;

        match &value {
            Some(bytes) => debug!("Store HIT: {} ({} bytes)", key, bytes.len()),
            None => debug!("Store MISS: {}", key),
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> StoreResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();
        // SET EX rejects 0; anything below a second still needs to expire.
        let ttl_seconds = ttl.as_secs().max(1);

        self.bounded(conn.set_ex::<_, _, ()>(&full_key, value, ttl_seconds))
            .await
            .inspect_err(|e| warn!("Redis SET error for {}: {}", key, e))?;

        debug!(
            "Store SET: {} ({} bytes, TTL: {}s)",
            key,
            value.len(),
            ttl_seconds
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let deleted: i64 = self
            .bounded(conn.del(&full_key))
            .await
            .inspect_err(|e| warn!("Redis DEL error for {}: {}", key, e))?;

        if deleted > 0 {
            debug!("Store DEL: {}", key);
        } else {
            debug!("Store DEL: {} (already absent)", key);
        }
        Ok(())
    }

    async fn ping(&self) -> bool {
        let mut conn = self.client.clone();
        self.bounded(conn.ping::<()>()).await.is_ok()
    }
}
