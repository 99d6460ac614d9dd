//! Error types for quotagate.

use thiserror::Error;

/// Main error type for quotagate operations.
#[derive(Error, Debug)]
pub enum QuotagateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The rate limit for a key has been exceeded
    #[error("Rate limit exceeded")]
    LimitExceeded,

    /// Counter store communication errors
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for quotagate operations.
pub type Result<T> = std::result::Result<T, QuotagateError>;
