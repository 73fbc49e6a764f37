//! Token and redirect configuration.

use serde::{Deserialize, Serialize};

/// Token signing and gate redirect configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Clock-skew tolerance applied to the expiry check, in seconds. Zero by default.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Redirect target for unauthenticated requests.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Redirect target for authenticated requests lacking grants.
    #[serde(default = "default_unauthorized_path")]
    pub unauthorized_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl(),
            leeway_seconds: default_leeway(),
            login_path: default_login_path(),
            unauthorized_path: default_unauthorized_path(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    24
}

fn default_leeway() -> u64 {
    0
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_unauthorized_path() -> String {
    "/unauthorized".to_string()
}
