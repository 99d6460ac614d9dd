//! Redis-backed counter store.
//!
//! The reference networked backend. Counters are plain Redis strings,
//! incremented with INCR and expired with the key's native TTL; the
//! atomicity of INCR is the only concurrency primitive the rate limiter
//! needs, so multiple application instances can share one counter safely.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use tracing::debug;

use crate::error::Result;

use super::CounterStore;

/// Default namespace prefix for counter keys.
const DEFAULT_KEY_PREFIX: &str = "rateLimit:";

/// A counter store backed by Redis.
///
/// Store keys are prefixed with a constant namespace string (default
/// `"rateLimit:"`) to keep them apart from unrelated cache usage. The
/// connection is a [`ConnectionManager`], which reconnects automatically
/// and is cheap to clone per call.
#[derive(Clone)]
pub struct RedisCounterStore {
    connection: ConnectionManager,
    key_prefix: String,
}

impl std::fmt::Debug for RedisCounterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCounterStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisCounterStore {
    /// Create a store over an existing connection manager.
    pub fn new(connection: ConnectionManager) -> Self {
        Self::with_prefix(connection, DEFAULT_KEY_PREFIX)
    }

    /// Create a store over an existing connection manager with a custom
    /// key prefix.
    pub fn with_prefix(connection: ConnectionManager, key_prefix: impl Into<String>) -> Self {
        Self {
            connection,
            key_prefix: key_prefix.into(),
        }
    }

    /// Connect to Redis and create a store with the default key prefix.
    ///
    /// # Arguments
    /// * `url` - Redis connection URL (e.g., "redis://127.0.0.1/")
    pub async fn connect(url: &str) -> std::result::Result<Self, RedisError> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;

        debug!(url = %url, "Connected counter store to Redis");

        Ok(Self::new(connection))
    }

    /// Get the namespaced Redis key for a rate limiter key.
    fn key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn operations(&self, key: &str) -> Result<u64> {
        let mut conn = self.connection.clone();

        let value: Option<String> = conn.get(self.key(key)).await?;

        Ok(value.and_then(|v| v.parse().ok()).unwrap_or(0))
    }

    async fn ttl(&self, key: &str) -> Result<u64> {
        let mut conn = self.connection.clone();

        // PTTL reports -1 for a key without expiry and -2 for a missing
        // key; both clamp to 0. Sub-second remainders round up so a window
        // with time left never reports 0.
        let millis: i64 = conn.pttl(self.key(key)).await?;

        Ok((millis.max(0) as u64).div_ceil(1000))
    }

    async fn increment(&self, key: &str, interval: u64) -> Result<u64> {
        let mut conn = self.connection.clone();
        let key = self.key(key);

        let operations: u64 = conn.incr(&key, 1).await?;

        // The expiry is attached exactly once, when the increment created
        // the counter. INCR and EXPIRE are not a single atomic unit, but
        // only the creating caller observes 1, so exactly one EXPIRE is
        // issued per window.
        if operations == 1 {
            debug!(key = %key, interval = interval, "Created rate limit counter");
            let _: () = conn.expire(&key, interval as i64).await?;
        }

        Ok(operations)
    }
}
