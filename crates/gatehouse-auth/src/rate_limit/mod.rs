//! Process-local fixed-window rate limiting.
//!
//! Counters live in this process only; several gate instances behind a
//! load balancer each enforce their own cap.

pub mod limiter;
pub mod rules;
pub mod sweeper;

pub use limiter::{RateLimitDecision, RateLimiter};
pub use rules::{RateLimitRules, RequestThrottle};
pub use sweeper::RateLimitSweeper;
