//! Rate policy value.

use crate::error::{QuotagateError, Result};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_DAY: u64 = 86400;

/// An immutable rate limiting policy: a window length in seconds and the
/// maximum number of operations allowed inside that window.
///
/// A `Rate` is created once, typically at configuration time, and shared
/// read-only across every check for a given gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    /// Window length in seconds
    interval: u64,
    /// Maximum operations per window
    quota: u64,
}

impl Rate {
    /// Create a new rate policy.
    ///
    /// Both the interval and the quota must be greater than zero; a zero
    /// value is rejected with a configuration error.
    pub fn new(interval: u64, quota: u64) -> Result<Self> {
        if interval == 0 {
            return Err(QuotagateError::Config(
                "Interval must be greater than 0".to_string(),
            ));
        }

        if quota == 0 {
            return Err(QuotagateError::Config(
                "Quota must be greater than 0".to_string(),
            ));
        }

        Ok(Self { interval, quota })
    }

    /// A rate of one second with the given quota.
    pub fn second(quota: u64) -> Result<Self> {
        Self::new(1, quota)
    }

    /// A rate of `n` seconds with the given quota.
    pub fn seconds(n: u64, quota: u64) -> Result<Self> {
        Self::new(n, quota)
    }

    /// A rate of one minute with the given quota.
    pub fn minute(quota: u64) -> Result<Self> {
        Self::new(SECONDS_PER_MINUTE, quota)
    }

    /// A rate of `n` minutes with the given quota.
    pub fn minutes(n: u64, quota: u64) -> Result<Self> {
        Self::new(n * SECONDS_PER_MINUTE, quota)
    }

    /// A rate of one hour with the given quota.
    pub fn hour(quota: u64) -> Result<Self> {
        Self::new(SECONDS_PER_HOUR, quota)
    }

    /// A rate of `n` hours with the given quota.
    pub fn hours(n: u64, quota: u64) -> Result<Self> {
        Self::new(n * SECONDS_PER_HOUR, quota)
    }

    /// A rate of one day with the given quota.
    pub fn day(quota: u64) -> Result<Self> {
        Self::new(SECONDS_PER_DAY, quota)
    }

    /// A rate of `n` days with the given quota.
    pub fn days(n: u64, quota: u64) -> Result<Self> {
        Self::new(n * SECONDS_PER_DAY, quota)
    }

    /// Get the window length in seconds.
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Get the maximum operations per window.
    pub fn quota(&self) -> u64 {
        self.quota
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_creation() {
        let rate = Rate::new(10, 5).unwrap();
        assert_eq!(rate.interval(), 10);
        assert_eq!(rate.quota(), 5);
    }

    #[test]
    fn test_rate_rejects_zero_interval() {
        assert!(matches!(
            Rate::new(0, 5),
            Err(QuotagateError::Config(_))
        ));
    }

    #[test]
    fn test_rate_rejects_zero_quota() {
        assert!(matches!(
            Rate::new(10, 0),
            Err(QuotagateError::Config(_))
        ));
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(Rate::second(5).unwrap().interval(), 1);
        assert_eq!(Rate::seconds(30, 5).unwrap().interval(), 30);
        assert_eq!(Rate::minute(5).unwrap().interval(), 60);
        assert_eq!(Rate::minutes(5, 5).unwrap().interval(), 300);
        assert_eq!(Rate::hour(5).unwrap().interval(), 3600);
        assert_eq!(Rate::hours(2, 5).unwrap().interval(), 7200);
        assert_eq!(Rate::day(5).unwrap().interval(), 86400);
        assert_eq!(Rate::days(7, 5).unwrap().interval(), 604800);
    }

    #[test]
    fn test_convenience_constructors_validate() {
        assert!(Rate::minute(0).is_err());
        assert!(Rate::minutes(0, 100).is_err());
    }
}
