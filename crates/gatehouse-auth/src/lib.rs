//! # gatehouse-auth
//!
//! Authentication and authorization for the Gatehouse request gate.
//!
//! ## Modules
//!
//! - `jwt`: signed token issuing and verification
//! - `policy`: route policy table and the authorization check
//! - `gate`: per-request extraction, verification, and policy decision
//! - `rate_limit`: fixed-window counters, rule selection, and the sweeper
//! - `directory`: in-memory principals for sign-in and grant changes
//! - `password`: Argon2id password hashing

pub mod directory;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod policy;
pub mod rate_limit;

pub use directory::PrincipalDirectory;
pub use gate::{DenyReason, GateDecision, RequestGate};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenError};
pub use password::PasswordHasher;
pub use policy::{PolicyEvaluator, RoutePolicyTable};
pub use rate_limit::{RateLimitDecision, RateLimitSweeper, RateLimiter, RequestThrottle};
