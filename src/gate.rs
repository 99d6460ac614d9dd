//! Admission-control gate for guarding request handlers.
//!
//! A [`RateLimitGate`] wraps a [`RateLimiter`] for use at a framework
//! boundary: the caller injects a closure that resolves a per-request key
//! (client IP, API token, account id), and gets back a [`GateDecision`]
//! carrying the allow/reject verdict plus the conventional rate limit
//! response headers. Building the actual rejection response is left to the
//! integrating layer, which also chooses its fail-open/fail-closed policy
//! for store errors.

use tracing::trace;

use crate::error::Result;
use crate::ratelimit::{RateLimiter, RateLimiterStatus};

/// Header name for the window quota.
pub const HEADER_LIMIT: &str = "RateLimit-Limit";
/// Header name for the operations left in the window.
pub const HEADER_REMAINING: &str = "RateLimit-Remaining";
/// Header name for the seconds until the window resets.
pub const HEADER_RESET: &str = "RateLimit-Reset";
/// Header name for the retry delay on rejection.
pub const HEADER_RETRY_AFTER: &str = "Retry-After";

/// Response metadata for one rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitHeaders {
    /// Quota for the window (`RateLimit-Limit`)
    pub limit: u64,
    /// Operations left before the quota is reached (`RateLimit-Remaining`)
    pub remaining: u64,
    /// Seconds until the window resets (`RateLimit-Reset`)
    pub reset: u64,
    /// Seconds to wait before retrying (`Retry-After`)
    pub retry_after: u64,
}

impl RateLimitHeaders {
    /// Build the header set from a status snapshot.
    pub fn from_status(status: &RateLimiterStatus) -> Self {
        Self {
            limit: status.rate().quota(),
            remaining: status.remaining(),
            reset: status.ttl(),
            retry_after: status.ttl(),
        }
    }

    /// Iterate the headers as name/value pairs, ready to be copied onto a
    /// response.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, String)> {
        [
            (HEADER_LIMIT, self.limit.to_string()),
            (HEADER_REMAINING, self.remaining.to_string()),
            (HEADER_RESET, self.reset.to_string()),
            (HEADER_RETRY_AFTER, self.retry_after.to_string()),
        ]
        .into_iter()
    }
}

/// The outcome of gating one request.
#[derive(Debug, Clone, Copy)]
pub struct GateDecision {
    status: RateLimiterStatus,
}

impl GateDecision {
    /// Whether the guarded action may proceed.
    pub fn allowed(&self) -> bool {
        !self.status.exceeded()
    }

    /// Get the response headers for this check.
    ///
    /// Headers are emitted on allowed and rejected requests alike.
    pub fn headers(&self) -> RateLimitHeaders {
        RateLimitHeaders::from_status(&self.status)
    }

    /// Get the underlying status snapshot.
    pub fn status(&self) -> RateLimiterStatus {
        self.status
    }
}

/// A rate limiting gate for requests of type `R`.
pub struct RateLimitGate<R> {
    limiter: RateLimiter,
    key_fn: Box<dyn Fn(&R) -> String + Send + Sync>,
}

impl<R> RateLimitGate<R> {
    /// Create a gate from a limiter and a per-request key resolver.
    pub fn new(
        limiter: RateLimiter,
        key_fn: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            limiter,
            key_fn: Box::new(key_fn),
        }
    }

    /// Check the rate limit for a request, counting it as an operation.
    ///
    /// Store errors propagate unmodified; the gate performs no retry and
    /// makes no fail-open/fail-closed choice on behalf of the caller.
    pub async fn check(&self, request: &R) -> Result<GateDecision> {
        let key = (self.key_fn)(request);

        trace!(key = %key, "Gating request");

        let status = self.limiter.get_status(&key).await?;

        Ok(GateDecision { status })
    }
}
