//! In-memory cache backend

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};
use tokio::time::{interval, Duration, Instant};
use tracing::debug;

use sca_core::errors::CacheError;
use sca_core::services::cache::{CacheService, NO_EXPIRY_TTL_SECS};

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

fn effective_ttl(ttl_seconds: i64) -> Duration {
    if ttl_seconds <= 0 {
        Duration::from_secs(NO_EXPIRY_TTL_SECS as u64)
    } else {
        Duration::from_secs(ttl_seconds as u64)
    }
}

/// In-process cache backed by a read-write-locked map
///
/// Readers run concurrently; writers are serialized. Expiry is lazy
/// on access, and a background task additionally sweeps the whole map
/// once per interval so never-read expired keys cannot accumulate.
/// Construction spawns the sweeper, so a Tokio runtime must be
/// running.
pub struct MemoryCache {
    store: Arc<RwLock<HashMap<String, Entry>>>,
    shutdown: Arc<Notify>,
    closed: AtomicBool,
}

impl MemoryCache {
    /// Creates a cache sweeping expired entries once a minute
    pub fn new() -> Self {
        Self::with_sweep_interval(Duration::from_secs(60))
    }

    /// Creates a cache with a custom sweep interval
    pub fn with_sweep_interval(period: Duration) -> Self {
        let store: Arc<RwLock<HashMap<String, Entry>>> = Arc::new(RwLock::new(HashMap::new()));
        let shutdown = Arc::new(Notify::new());

        let sweep_store = Arc::clone(&store);
        let sweep_shutdown = Arc::clone(&shutdown);
        // Anchor the ticker at construction, not at the task's first poll,
        // so the sweep schedule starts when the cache is created.
        let mut ticker = interval(period);
        tokio::spawn(async move {
            // The first tick completes immediately; skip it.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let now = Instant::now();
                        let mut store = sweep_store.write().await;
                        let before = store.len();
                        store.retain(|_, entry| entry.expires_at > now);
                        let swept = before - store.len();
                        if swept > 0 {
                            debug!(swept, "swept expired cache entries");
                        }
                    }
                    _ = sweep_shutdown.notified() => break,
                }
            }
        });

        Self {
            store,
            shutdown,
            closed: AtomicBool::new(false),
        }
    }

    /// Number of live entries, including not-yet-purged expired ones
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + effective_ttl(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, CacheError> {
        {
            let store = self.store.read().await;
            match store.get(key) {
                Some(entry) if !entry.is_expired() => return Ok(entry.value.clone()),
                Some(_) => {}
                None => return Err(CacheError::NotFound),
            }
        }

        // Found but expired: purge under the write lock, re-checking
        // in case a writer replaced the entry in between.
        let mut store = self.store.write().await;
        if let Some(entry) = store.get(key) {
            if entry.is_expired() {
                store.remove(key);
            } else {
                return Ok(entry.value.clone());
            }
        }
        Err(CacheError::NotFound)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        match self.get(key).await {
            Ok(_) => Ok(true),
            Err(CacheError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), CacheError> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.shutdown.notify_one();
        }
        self.store.write().await.clear();
        Ok(())
    }
}
