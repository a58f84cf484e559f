//! Cache backend configuration

use serde::{Deserialize, Serialize};

/// Cache configuration for session state storage
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Cache backend: "redis" or "memory"
    pub backend: String,

    /// Redis connection URL (ignored by the memory backend)
    pub url: String,

    /// Optional Redis AUTH password, applied when the URL carries none
    pub password: Option<String>,

    /// Redis logical database index
    pub db: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: String::from("redis"),
            url: String::from("redis://localhost:6379"),
            password: None,
            db: 0,
        }
    }
}

impl CacheConfig {
    /// Load cache configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: std::env::var("CACHE_BACKEND").unwrap_or(defaults.backend),
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            password: std::env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
            db: std::env::var("REDIS_DB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.db),
        }
    }

    /// The effective connection URL with password and database applied.
    ///
    /// A password or database already present in the URL wins over the
    /// separate fields.
    pub fn connection_url(&self) -> String {
        let mut url = self.url.clone();

        if let Some(password) = &self.password {
            if !url.contains('@') {
                if let Some(rest) = url.strip_prefix("redis://") {
                    url = format!("redis://:{password}@{rest}");
                }
            }
        }

        // redis URLs address a database via the path segment.
        if self.db != 0 && !has_db_path(&url) {
            url = format!("{}/{}", url.trim_end_matches('/'), self.db);
        }

        url
    }

    /// Configuration for the in-process cache backend
    pub fn memory() -> Self {
        Self {
            backend: String::from("memory"),
            url: String::new(),
            password: None,
            db: 0,
        }
    }
}

fn has_db_path(url: &str) -> bool {
    url.strip_prefix("redis://")
        .map(|rest| rest.contains('/') && !rest.ends_with('/'))
        .unwrap_or(false)
}
