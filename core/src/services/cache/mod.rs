//! Key-value cache abstraction used as the session-state store
//!
//! The trait is the only thing the token service knows about
//! persistence: concrete backends (in-memory, Redis) live in the
//! infrastructure layer.

mod mock;

pub use mock::MockCacheService;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::errors::CacheError;

/// Effective TTL standing in for "no expiration" when a caller passes
/// a non-positive TTL. One year, matching the session store's needs;
/// true infinite TTL is deliberately not supported.
pub const NO_EXPIRY_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Key-value storage with per-key expiry
///
/// All operations are safe for concurrent invocation. Expiry is lazy:
/// an expired key behaves as absent and is purged on the access that
/// finds it, though backends may also sweep in the background.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Stores `value` under `key`, overwriting any existing value.
    /// A TTL of zero or less maps to [`NO_EXPIRY_TTL_SECS`].
    async fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<(), CacheError>;

    /// Returns the stored value, or [`CacheError::NotFound`] when the
    /// key is absent or its TTL has elapsed.
    async fn get(&self, key: &str) -> Result<String, CacheError>;

    /// Removes the key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// True only if the key is present and unexpired.
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// Stores a JSON value through [`CacheService::set`].
    async fn set_json(&self, key: &str, value: &Value, ttl_seconds: i64) -> Result<(), CacheError> {
        let data = serde_json::to_string(value)?;
        self.set(key, &data, ttl_seconds).await
    }

    /// Retrieves and parses a JSON value through [`CacheService::get`].
    async fn get_json(&self, key: &str) -> Result<Value, CacheError> {
        let data = self.get(key).await?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Liveness check for the backing store.
    async fn ping(&self) -> Result<(), CacheError>;

    /// Releases resources held by the backend. Idempotent.
    async fn close(&self) -> Result<(), CacheError>;
}

#[async_trait]
impl<T: CacheService + ?Sized> CacheService for Arc<T> {
    async fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> Result<(), CacheError> {
        (**self).set(key, value, ttl_seconds).await
    }

    async fn get(&self, key: &str) -> Result<String, CacheError> {
        (**self).get(key).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key).await
    }

    async fn set_json(&self, key: &str, value: &Value, ttl_seconds: i64) -> Result<(), CacheError> {
        (**self).set_json(key, value, ttl_seconds).await
    }

    async fn get_json(&self, key: &str) -> Result<Value, CacheError> {
        (**self).get_json(key).await
    }

    async fn ping(&self) -> Result<(), CacheError> {
        (**self).ping().await
    }

    async fn close(&self) -> Result<(), CacheError> {
        (**self).close().await
    }
}
