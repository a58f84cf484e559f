//! Cache backend selection

use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use sca_core::services::cache::CacheService;
use sca_shared::config::CacheConfig;

use super::{MemoryCache, RedisCache};
use crate::InfraError;

/// Supported cache backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            other => Err(format!("unsupported cache backend: {other}")),
        }
    }
}

/// Builds the configured cache backend
///
/// Redis is the production default; the memory backend suits local
/// development and tests where no external store is available.
pub async fn create_cache(config: &CacheConfig) -> Result<Arc<dyn CacheService>, InfraError> {
    let backend = config
        .backend
        .parse::<CacheBackend>()
        .map_err(InfraError::Config)?;

    info!(?backend, "creating cache backend");
    match backend {
        CacheBackend::Redis => Ok(Arc::new(RedisCache::connect(config).await?)),
        CacheBackend::Memory => Ok(Arc::new(MemoryCache::new())),
    }
}
