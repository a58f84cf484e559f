//! Cache backends for session state
//!
//! Two implementations of the core `CacheService` trait live here:
//! an in-process map with a background sweeper and a Redis client.
//! The factory picks one from configuration.

mod factory;
mod memory;
mod redis_cache;

#[cfg(test)]
mod tests;

pub use factory::{create_cache, CacheBackend};
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;
