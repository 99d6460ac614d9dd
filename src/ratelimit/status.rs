//! Rate limit status snapshot.

use super::rate::Rate;

/// An immutable snapshot of the rate limit state for a single key, produced
/// by one call to [`RateLimiter::get_status`](super::RateLimiter::get_status).
#[derive(Debug, Clone, Copy)]
pub struct RateLimiterStatus {
    /// Operations observed in the current window
    operations: u64,
    /// The rate policy this status was computed against
    rate: Rate,
    /// Seconds remaining until the window resets
    ttl: u64,
}

impl RateLimiterStatus {
    pub(crate) fn new(operations: u64, rate: Rate, ttl: u64) -> Self {
        Self {
            operations,
            rate,
            ttl,
        }
    }

    /// Get the number of operations in the current window.
    pub fn operations(&self) -> u64 {
        self.operations
    }

    /// Get the rate policy applied.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Get the seconds remaining until the window resets.
    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    /// Whether the rate limit has been exceeded.
    ///
    /// The quota itself is still admitted; only operations beyond it are
    /// over the limit.
    pub fn exceeded(&self) -> bool {
        self.operations > self.rate.quota()
    }

    /// Get the operations remaining before the quota is reached.
    pub fn remaining(&self) -> u64 {
        self.rate.quota().saturating_sub(self.operations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceeded_boundary() {
        let rate = Rate::seconds(10, 5).unwrap();

        let at_quota = RateLimiterStatus::new(5, rate, 10);
        assert!(!at_quota.exceeded());

        let over_quota = RateLimiterStatus::new(6, rate, 10);
        assert!(over_quota.exceeded());
    }

    #[test]
    fn test_remaining_saturates() {
        let rate = Rate::seconds(10, 5).unwrap();

        assert_eq!(RateLimiterStatus::new(2, rate, 10).remaining(), 3);
        assert_eq!(RateLimiterStatus::new(5, rate, 10).remaining(), 0);
        assert_eq!(RateLimiterStatus::new(9, rate, 10).remaining(), 0);
    }
}
