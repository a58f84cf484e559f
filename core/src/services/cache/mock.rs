//! Mock cache implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::{CacheService, NO_EXPIRY_TTL_SECS};
use crate::errors::CacheError;

struct MockEntry {
    value: String,
    expires_at: Instant,
}

impl MockEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Lock-guarded in-process cache for tests
///
/// Honors the same lazy-expiry contract as the production backends
/// but runs no background sweeper.
pub struct MockCacheService {
    store: Arc<RwLock<HashMap<String, MockEntry>>>,
}

impl MockCacheService {
    /// Create a new empty mock cache
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of live entries, for test assertions
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

impl Default for MockCacheService {
    fn default() -> Self {
        Self::new()
    }
}

fn effective_ttl(ttl_seconds: i64) -> Duration {
    if ttl_seconds <= 0 {
        Duration::from_secs(NO_EXPIRY_TTL_SECS as u64)
    } else {
        Duration::from_secs(ttl_seconds as u64)
    }
}

#[async_trait]
impl CacheService for MockCacheService {
    async fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.insert(
            key.to_string(),
            MockEntry {
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

        // Found but expired: purge under the write lock.
        self.store.write().await.remove(key);
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
        self.store.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_round_trip() {
        let cache = MockCacheService::new();
        cache.set("mission:7", "active", 60).await.unwrap();
        assert_eq!(cache.get("mission:7").await.unwrap(), "active");
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let cache = MockCacheService::new();
        assert!(matches!(
            cache.get("absent").await,
            Err(CacheError::NotFound)
        ));
        assert!(!cache.exists("absent").await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let cache = MockCacheService::new();
        cache.set("k", "v", 60).await.unwrap();
        cache.delete("k").await.unwrap();
        cache.delete("k").await.unwrap();
        assert!(!cache.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn non_positive_ttl_means_long_lived() {
        let cache = MockCacheService::new();
        cache.set("pinned", "v", 0).await.unwrap();
        cache.set("pinned2", "v", -5).await.unwrap();
        assert!(cache.exists("pinned").await.unwrap());
        assert!(cache.exists("pinned2").await.unwrap());
    }

    #[tokio::test]
    async fn json_round_trip() {
        let cache = MockCacheService::new();
        let value = serde_json::json!({"cat": "whiskers", "missions": 3});
        cache.set_json("profile", &value, 60).await.unwrap();
        assert_eq!(cache.get_json("profile").await.unwrap(), value);
    }

    #[tokio::test]
    async fn close_clears_and_stays_usable() {
        let cache = MockCacheService::new();
        cache.set("k", "v", 60).await.unwrap();
        cache.close().await.unwrap();
        cache.close().await.unwrap();
        assert_eq!(cache.len().await, 0);
    }
}
