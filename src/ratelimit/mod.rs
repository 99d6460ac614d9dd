//! Rate limiting policy and orchestration.

mod limiter;
mod rate;
mod status;

pub use limiter::RateLimiter;
pub use rate::Rate;
pub use status::RateLimiterStatus;
