//! In-memory basket store for tests and local development.

use super::service::{BasketStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// A process-local [`BasketStore`] with per-key expiry.
///
/// Entries carry their expiry instant and read as absent once it passes, so
/// TTL semantics match Redis even without the sweeper. The sweeper
/// ([`spawn_sweeper`]) only reclaims memory.
///
/// The store can be switched offline with [`InMemoryBasketStore::set_available`];
/// every operation then fails with [`StoreError::Unavailable`].
pub struct InMemoryBasketStore {
    entries: RwLock<HashMap<String, Entry>>,
    available: AtomicBool,
}

impl InMemoryBasketStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using in-memory basket store");
        Self {
            entries: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulates the endpoint going away (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of keys currently held, expired-but-unswept ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no keys are held.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Time left before `key` expires, or `None` if absent or already expired.
    pub async fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.expires_at - now)
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory store is offline".to_string(),
            ))
        }
    }
}

impl Default for InMemoryBasketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasketStore for InMemoryBasketStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.ensure_available()?;

        let now = Instant::now();
        let value = self
            .entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone());

        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> StoreResult<()> {
        self.ensure_available()?;

        let expires_at = Instant::now().checked_add(ttl).ok_or_else(|| {
            StoreError::Operation(format!("TTL of {:?} is out of range", ttl))
        })?;

        let entry = Entry {
            value: value.to_vec(),
            expires_at,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.ensure_available()?;

        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn ping(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

/// Spawns a low-priority task that purges expired entries every `interval`.
///
/// Expiry stays renew-on-write-only: the sweeper never touches live entries.
/// The task runs until the returned handle is aborted or the runtime shuts down.
pub fn spawn_sweeper(store: Arc<InMemoryBasketStore>, interval: Duration) -> JoinHandle<()> {
    info!("Basket sweeper started (interval: {:?})", interval);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                debug!("Sweeper purged {} expired basket(s)", purged);
            }
        }
    })
}
