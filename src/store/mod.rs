//! Counter store trait and backend implementations.

use async_trait::async_trait;

use crate::error::Result;

mod memory;
mod redis;

pub use memory::MemoryCounterStore;
pub use redis::RedisCounterStore;

/// A TTL-backed counter store for rate limit windows.
///
/// This trait abstracts over the networked [`RedisCounterStore`] and the
/// in-process [`MemoryCounterStore`] so a [`RateLimiter`] can work with
/// either. A window is one counter plus one expiry, created together on
/// the first increment; implementations must never leave a counter without
/// a bounded TTL, and must never refresh the TTL on later increments —
/// doing so would turn the fixed window into a sliding one.
///
/// [`RateLimiter`]: crate::ratelimit::RateLimiter
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Get the current counter value for a key.
    ///
    /// Returns 0 when no counter exists; a missing key is not an error.
    async fn operations(&self, key: &str) -> Result<u64>;

    /// Get the seconds remaining until the counter's window resets.
    ///
    /// Sub-second remainders round up; a missing or non-expiring key
    /// reports 0.
    async fn ttl(&self, key: &str) -> Result<u64>;

    /// Atomically increment the counter for a key, returning the
    /// post-increment value.
    ///
    /// When the returned value is 1 the increment created the counter, and
    /// the implementation attaches an expiry of `interval` seconds to it.
    async fn increment(&self, key: &str, interval: u64) -> Result<u64>;
}
