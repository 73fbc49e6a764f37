//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so that an empty
//! configuration still yields a working gate.

pub mod app;
pub mod auth;
pub mod directory;
pub mod logging;
pub mod rate_limit;
pub mod security;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::directory::PrincipalRecord;
pub use self::logging::LoggingConfig;
pub use self::rate_limit::{RateLimitConfig, RateLimitRule};
pub use self::security::SecurityHeadersConfig;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::{Permission, PermissionRequirement, Role, RoutePolicy};

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

/// Longest accepted rate-limit window (one day).
pub const MAX_WINDOW_SECONDS: u64 = 24 * 3600;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default + environment overlay + env vars).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Token and redirect settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Route policy table, loaded once at start-up.
    #[serde(default = "default_routes")]
    pub routes: Vec<RoutePolicy>,
    /// Rate limiter settings.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Static security response headers.
    #[serde(default)]
    pub security_headers: SecurityHeadersConfig,
    /// Seed principals for the in-memory directory.
    #[serde(default)]
    pub principals: Vec<PrincipalRecord>,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            routes: default_routes(),
            rate_limit: RateLimitConfig::default(),
            security_headers: SecurityHeadersConfig::default(),
            principals: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the base file at `path` with an optional `config/<env>.toml`
    /// overlay and environment variables prefixed with `GATEHOUSE_`
    /// (`__` separates nested keys, e.g. `GATEHOUSE_AUTH__JWT_SECRET`).
    pub fn load(path: &str, env: &str) -> AppResult<Self> {
        Self::load_from(path, env, None)
    }

    /// Same as [`AppConfig::load`], reading overrides from `vars` instead of
    /// the process environment when given.
    pub fn load_from(
        path: &str,
        env: &str,
        vars: Option<config::Map<String, String>>,
    ) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GATEHOUSE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        tracing::debug!(
            routes = config.routes.len(),
            principals = config.principals.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Rejects configurations the gate cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.token_ttl_hours == 0 || self.auth.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_hours must be between 1 and {MAX_TOKEN_TTL_HOURS}"
            )));
        }
        if self.auth.leeway_seconds > MAX_WINDOW_SECONDS {
            return Err(AppError::configuration(format!(
                "auth.leeway_seconds must not exceed {MAX_WINDOW_SECONDS}"
            )));
        }
        for policy in &self.routes {
            if !policy.pattern.starts_with('/') {
                return Err(AppError::configuration(format!(
                    "Route pattern '{}' must start with '/'",
                    policy.pattern
                )));
            }
        }
        for rule in std::iter::once(&self.rate_limit.default).chain(&self.rate_limit.rules) {
            if rule.max_requests == 0
                || rule.window_seconds == 0
                || rule.window_seconds > MAX_WINDOW_SECONDS
            {
                return Err(AppError::configuration(format!(
                    "Rate limit rule '{}' needs a non-zero cap and a window of 1 to {MAX_WINDOW_SECONDS} seconds",
                    rule.name
                )));
            }
        }
        Ok(())
    }
}

/// The route table shipped with the gate when none is configured.
pub fn default_routes() -> Vec<RoutePolicy> {
    let admin = || PermissionRequirement::RequireAll(vec![Permission::from("admin:access")]);

    vec![
        RoutePolicy::new("/dashboard", PermissionRequirement::default()),
        RoutePolicy::new("/profile", PermissionRequirement::default()),
        RoutePolicy::new(
            "/posts/new",
            PermissionRequirement::RequireAll(vec![
                Permission::from("read:posts"),
                Permission::from("write:posts"),
            ]),
        ),
        RoutePolicy::new("/admin", admin()).with_roles([Role::Admin]),
        RoutePolicy::new("/api/admin", admin()).with_roles([Role::Admin]),
    ]
}
