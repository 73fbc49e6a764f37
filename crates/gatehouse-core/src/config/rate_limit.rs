//! Rate limiter configuration.

use serde::{Deserialize, Serialize};

/// Fixed-window rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether the limiter is active.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Rule applied to paths no other rule claims.
    #[serde(default = "default_rule")]
    pub default: RateLimitRule,
    /// Rules selected by path prefix (longest prefix wins).
    #[serde(default = "default_rules")]
    pub rules: Vec<RateLimitRule>,
    /// Interval between sweeps of expired counters, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            default: default_rule(),
            rules: default_rules(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

/// A named cap over a fixed window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRule {
    /// Rule name, used as the counter key namespace.
    pub name: String,
    /// Path prefixes this rule applies to.
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window length in seconds.
    pub window_seconds: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_rule() -> RateLimitRule {
    RateLimitRule {
        name: "default".to_string(),
        prefixes: Vec::new(),
        max_requests: 1000,
        window_seconds: 900,
    }
}

fn default_rules() -> Vec<RateLimitRule> {
    vec![RateLimitRule {
        name: "sensitive".to_string(),
        prefixes: vec!["/api/auth".to_string(), "/api/admin".to_string()],
        max_requests: 100,
        window_seconds: 900,
    }]
}

fn default_sweep_interval() -> u64 {
    60
}
