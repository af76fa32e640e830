//! Caching subsystem.
//!
//! Tag extraction results are cached under a content hash of the request
//! (see [`cache_key`]). The store itself sits behind the [`CacheBackend`]
//! trait so the service can share a Redis instance across processes or run
//! with a private in-memory cache:
//!
//! - [`RedisCache`]: shared store, one multiplexed connection acquired per
//!   operation (requires the `redis` feature).
//! - [`MemoryCache`]: moka LRU with per-entry TTL, owned by the process.
//!
//! Values are plain UTF-8 strings; expiry is set on write and entries are
//! never deleted explicitly.

mod key;
mod memory;
#[cfg(feature = "redis")]
mod redis;

pub use key::cache_key;
pub use memory::MemoryCache;
#[cfg(feature = "redis")]
pub use self::redis::RedisCache;

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Default time-to-live for cached tag lists.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Key-value store with expiration.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Backend name for logging and metrics labels.
    fn name(&self) -> &str;

    /// Look up a value. Returns `Ok(None)` on a miss or after expiry.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store (or overwrite) a value that expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}
