//! Core rate limiter implementation.

use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::{QuotagateError, Result};
use crate::store::CounterStore;

use super::rate::Rate;
use super::status::RateLimiterStatus;

/// The core rate limiter, combining one [`Rate`] policy with one
/// [`CounterStore`] backend.
///
/// The limiter itself is stateless between calls: the counter and its
/// window expiry live entirely in the store, so a single limiter can be
/// shared across any number of concurrent tasks without synchronization.
pub struct RateLimiter {
    /// The rate policy applied to every key
    rate: Rate,
    /// Backend holding the per-key counters
    store: Arc<dyn CounterStore>,
}

impl RateLimiter {
    /// Create a new rate limiter.
    pub fn new(rate: Rate, store: Arc<dyn CounterStore>) -> Self {
        Self { rate, store }
    }

    /// Get the rate policy for this limiter.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Get the rate limit status for the given key, counting this call as
    /// an operation.
    ///
    /// The store counter is only incremented while the window has not yet
    /// been exhausted; once the quota is passed, repeated calls keep
    /// reporting the exceeded state without growing the stored counter.
    pub async fn get_status(&self, key: &str) -> Result<RateLimiterStatus> {
        self.status(key, true).await
    }

    /// Get the rate limit status for the given key without counting this
    /// call as an operation.
    pub async fn peek(&self, key: &str) -> Result<RateLimiterStatus> {
        self.status(key, false).await
    }

    /// Check the rate limit for the given key, returning an error if it
    /// has been exceeded.
    ///
    /// This is the convenience form for callers that prefer `?`-style
    /// gating over inspecting a status value.
    pub async fn check_limited(&self, key: &str) -> Result<()> {
        let status = self.get_status(key).await?;

        if status.exceeded() {
            debug!(key = %key, operations = status.operations(), "Rate limit exceeded");
            return Err(QuotagateError::LimitExceeded);
        }

        Ok(())
    }

    async fn status(&self, key: &str, increment: bool) -> Result<RateLimiterStatus> {
        let store_key = self.store_key(key);

        trace!(
            key = %store_key,
            increment = increment,
            "Checking rate limit"
        );

        let mut operations = self.store.operations(&store_key).await?;

        if increment && operations <= self.rate.quota() {
            // Report attempts from the pre-increment read rather than the
            // store's exact return value. Concurrent callers racing at the
            // quota boundary may each increment once; the worst-case
            // overshoot is bounded by the number of racers in that instant.
            self.store
                .increment(&store_key, self.rate.interval())
                .await?;
            operations += 1;
        }

        let ttl = self.store.ttl(&store_key).await?;

        Ok(RateLimiterStatus::new(operations, self.rate, ttl))
    }

    /// Derive the store key for a rate limiter key.
    ///
    /// The interval suffix keeps counters window-specific, so the same
    /// logical key tracked under two rates with different intervals never
    /// shares a counter.
    fn store_key(&self, key: &str) -> String {
        format!("{}:{}", key, self.rate.interval())
    }
}
