//! Axum middleware stack.

pub mod cors;
pub mod gate;
pub mod logging;
pub mod rate_limit;
pub mod security_headers;
