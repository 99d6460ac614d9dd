//! Quotagate - Fixed-Window Rate Limiting
//!
//! This crate implements per-key admission control using a fixed-window
//! counter. A [`RateLimiter`] combines a [`Rate`] policy with a
//! [`CounterStore`] backend; all mutable state lives in the store, so a
//! limiter can be shared freely across tasks and processes. The reference
//! backend keeps counters in Redis, using its atomic INCR and native TTL
//! for window expiry.

pub mod config;
pub mod error;
pub mod gate;
pub mod ratelimit;
pub mod store;

pub use error::{QuotagateError, Result};
pub use gate::{GateDecision, RateLimitGate, RateLimitHeaders};
pub use ratelimit::{Rate, RateLimiter, RateLimiterStatus};
pub use store::{CounterStore, MemoryCounterStore, RedisCounterStore};
