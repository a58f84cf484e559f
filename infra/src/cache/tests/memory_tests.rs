//! Tests for the in-memory cache backend

use tokio::time::{advance, Duration};

use sca_core::errors::CacheError;
use sca_core::services::cache::CacheService;

use crate::cache::MemoryCache;

#[tokio::test]
async fn set_get_round_trip() {
    let cache = MemoryCache::new();
    cache.set("refresh_token:1", "token-value", 60).await.unwrap();
    assert_eq!(cache.get("refresh_token:1").await.unwrap(), "token-value");
}

#[tokio::test]
async fn set_overwrites_existing_value() {
    let cache = MemoryCache::new();
    cache.set("k", "first", 60).await.unwrap();
    cache.set("k", "second", 60).await.unwrap();
    assert_eq!(cache.get("k").await.unwrap(), "second");
}

#[tokio::test]
async fn missing_key_is_not_found() {
    let cache = MemoryCache::new();
    assert!(matches!(cache.get("absent").await, Err(CacheError::NotFound)));
    assert!(!cache.exists("absent").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn expired_key_reads_as_absent_and_is_purged() {
    let cache = MemoryCache::new();
    cache.set("short", "v", 1).await.unwrap();
    assert!(cache.exists("short").await.unwrap());

    advance(Duration::from_secs(2)).await;

    assert!(matches!(cache.get("short").await, Err(CacheError::NotFound)));
    // The failed read purged the entry.
    assert_eq!(cache.len().await, 0);
}

#[tokio::test(start_paused = true)]
async fn exists_purges_expired_entries() {
    let cache = MemoryCache::new();
    cache.set("short", "v", 1).await.unwrap();
    advance(Duration::from_secs(2)).await;

    assert!(!cache.exists("short").await.unwrap());
    assert_eq!(cache.len().await, 0);
}

#[tokio::test(start_paused = true)]
async fn background_sweep_purges_never_read_keys() {
    let cache = MemoryCache::with_sweep_interval(Duration::from_secs(5));
    cache.set("a", "v", 1).await.unwrap();
    cache.set("b", "v", 1).await.unwrap();
    cache.set("keep", "v", 600).await.unwrap();
    assert_eq!(cache.len().await, 3);

    advance(Duration::from_secs(6)).await;
    // Let the sweeper task run its tick.
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get("keep").await.unwrap(), "v");
}

#[tokio::test(start_paused = true)]
async fn non_positive_ttl_is_long_lived() {
    let cache = MemoryCache::new();
    cache.set("pinned", "v", 0).await.unwrap();

    advance(Duration::from_secs(30 * 24 * 60 * 60)).await;
    assert_eq!(cache.get("pinned").await.unwrap(), "v");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let cache = MemoryCache::new();
    cache.set("k", "v", 60).await.unwrap();
    cache.delete("k").await.unwrap();
    cache.delete("k").await.unwrap();
    assert!(!cache.exists("k").await.unwrap());
}

#[tokio::test]
async fn json_round_trip() {
    let cache = MemoryCache::new();
    let value = serde_json::json!({"user_id": 1, "role": "admin"});
    cache.set_json("session:1", &value, 60).await.unwrap();
    assert_eq!(cache.get_json("session:1").await.unwrap(), value);
}

#[tokio::test]
async fn get_json_on_non_json_value_fails_serialization() {
    let cache = MemoryCache::new();
    cache.set("raw", "not json", 60).await.unwrap();
    assert!(matches!(
        cache.get_json("raw").await,
        Err(CacheError::Serialization(_))
    ));
}

#[tokio::test]
async fn close_is_idempotent_and_clears() {
    let cache = MemoryCache::new();
    cache.set("k", "v", 60).await.unwrap();

    cache.close().await.unwrap();
    cache.close().await.unwrap();

    assert_eq!(cache.len().await, 0);
    assert!(cache.ping().await.is_ok());
}

#[tokio::test]
async fn concurrent_writers_do_not_lose_updates() {
    use std::sync::Arc;

    let cache = Arc::new(MemoryCache::new());
    let mut handles = Vec::new();
    for i in 0..16 {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            cache.set(&format!("key:{i}"), "v", 60).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(cache.len().await, 16);
}
