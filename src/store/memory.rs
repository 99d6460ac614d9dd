//! In-memory counter store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::Result;

use super::CounterStore;

/// A single counter with its window deadline.
struct Counter {
    /// Operations recorded in the current window
    operations: AtomicU64,
    /// When the current window expires
    deadline: Mutex<Instant>,
}

impl Counter {
    fn new(interval: u64) -> Self {
        Self {
            operations: AtomicU64::new(0),
            deadline: Mutex::new(Instant::now() + Duration::from_secs(interval)),
        }
    }
}

/// A counter store that keeps windows in process memory.
///
/// This backend mirrors the Redis semantics — counter and expiry created
/// together on first increment, expiry never refreshed within a window —
/// but the state is local to one process. Use it for tests and for
/// single-instance deployments that have no external cache.
#[derive(Default)]
pub struct MemoryCounterStore {
    counters: DashMap<String, Counter>,
}

impl MemoryCounterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of tracked counters.
    ///
    /// Expired windows are reused in place on the next increment for
    /// their key rather than removed, so this may include windows that
    /// are already over.
    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    /// Drop all counters.
    ///
    /// This is primarily useful for testing.
    pub fn clear(&self) {
        self.counters.clear();
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn operations(&self, key: &str) -> Result<u64> {
        let Some(counter) = self.counters.get(key) else {
            return Ok(0);
        };

        let deadline = counter.deadline.lock();
        if Instant::now() >= *deadline {
            return Ok(0);
        }

        Ok(counter.operations.load(Ordering::SeqCst))
    }

    async fn ttl(&self, key: &str) -> Result<u64> {
        let Some(counter) = self.counters.get(key) else {
            return Ok(0);
        };

        let deadline = counter.deadline.lock();
        let remaining = deadline.saturating_duration_since(Instant::now());

        // Round sub-second remainders up, matching Redis PTTL conversion.
        Ok((remaining.as_millis() as u64).div_ceil(1000))
    }

    async fn increment(&self, key: &str, interval: u64) -> Result<u64> {
        let counter = self.counters.entry(key.to_string()).or_insert_with(|| {
            debug!(key = %key, interval = interval, "Created rate limit counter");
            Counter::new(interval)
        });

        let mut deadline = counter.deadline.lock();
        if Instant::now() >= *deadline {
            // The previous window for this key has expired; start a fresh
            // one. The deadline lock makes the reset-and-count-one step
            // atomic with respect to other incrementers.
            counter.operations.store(1, Ordering::SeqCst);
            *deadline = Instant::now() + Duration::from_secs(interval);
            return Ok(1);
        }

        Ok(counter.operations.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_reports_zero() {
        let store = MemoryCounterStore::new();

        assert_eq!(store.operations("absent").await.unwrap(), 0);
        assert_eq!(store.ttl("absent").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_increment_creates_counter() {
        let store = MemoryCounterStore::new();

        assert_eq!(store.increment("key", 10).await.unwrap(), 1);
        assert_eq!(store.increment("key", 10).await.unwrap(), 2);
        assert_eq!(store.operations("key").await.unwrap(), 2);
        assert_eq!(store.counter_count(), 1);
    }

    #[tokio::test]
    async fn test_ttl_within_interval() {
        let store = MemoryCounterStore::new();

        store.increment("key", 10).await.unwrap();

        let ttl = store.ttl("key").await.unwrap();
        assert!(ttl > 0);
        assert!(ttl <= 10);
    }

    #[tokio::test]
    async fn test_expired_window_restarts_at_one() {
        let store = MemoryCounterStore::new();

        store.increment("key", 1).await.unwrap();
        store.increment("key", 1).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(store.operations("key").await.unwrap(), 0);
        assert_eq!(store.ttl("key").await.unwrap(), 0);
        assert_eq!(store.increment("key", 1).await.unwrap(), 1);
        assert!(store.ttl("key").await.unwrap() > 0);
    }

    #[tokio::test]
    async fn test_increment_does_not_refresh_deadline() {
        let store = MemoryCounterStore::new();

        store.increment("key", 2).await.unwrap();
        let ttl_before = store.ttl("key").await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;
        store.increment("key", 2).await.unwrap();

        let ttl_after = store.ttl("key").await.unwrap();
        assert!(ttl_after < ttl_before);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_counted_once_each() {
        use std::sync::Arc;

        let store = Arc::new(MemoryCounterStore::new());
        let mut handles = Vec::new();

        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..25 {
                    store.increment("key", 60).await.unwrap();
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.operations("key").await.unwrap(), 400);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryCounterStore::new();

        store.increment("a", 10).await.unwrap();
        store.increment("b", 10).await.unwrap();
        assert_eq!(store.counter_count(), 2);

        store.clear();
        assert_eq!(store.counter_count(), 0);
        assert_eq!(store.operations("a").await.unwrap(), 0);
    }
}
