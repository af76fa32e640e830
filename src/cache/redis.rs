//! Redis cache backend.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use super::CacheBackend;
use crate::{Result, RtagsError};

/// Default Redis endpoint when none is configured.
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Cache backend storing values in Redis with `SET ... EX`.
///
/// Holds only the parsed client; a multiplexed connection is opened for
/// each operation and dropped when it returns, so an unreachable server
/// fails individual operations rather than startup.
#[derive(Clone)]
pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    /// Create a backend for the given `redis://` URL.
    ///
    /// Only the URL is validated here; no connection is made.
    pub fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            RtagsError::Configuration(format!("invalid Redis URL '{url}': {e}"))
        })?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    fn name(&self) -> &str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        debug!(key, hit = value.is_some(), "redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;
        // Redis rejects EX 0.
        let seconds = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, seconds).await?;
        debug!(key, ttl_secs = seconds, "redis SET");
        Ok(())
    }
}
