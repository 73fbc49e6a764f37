//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use gatehouse_auth::directory::PrincipalDirectory;
use gatehouse_auth::gate::RequestGate;
use gatehouse_auth::jwt::{JwtDecoder, JwtEncoder};
use gatehouse_auth::policy::RoutePolicyTable;
use gatehouse_auth::rate_limit::{RateLimiter, RequestThrottle};
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;

use crate::middleware::security_headers::SecurityHeaders;

/// Application state containing all shared services.
///
/// Built once at start-up and passed to every handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start, for uptime reporting
    pub started_at: Instant,

    // ── Auth ─────────────────────────────────────────────────
    /// Token issuer
    pub jwt_encoder: Arc<JwtEncoder>,
    /// Token verifier
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Route policy gate
    pub gate: Arc<RequestGate>,
    /// Principals and credentials
    pub directory: Arc<PrincipalDirectory>,

    // ── Traffic ──────────────────────────────────────────────
    /// Rate limiter with rule selection
    pub throttle: Arc<RequestThrottle>,
    /// Pre-parsed security response headers
    pub security_headers: Arc<SecurityHeaders>,
}

impl AppState {
    /// Wires every service from configuration.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;

        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let table = Arc::new(RoutePolicyTable::new(config.routes.clone()));
        let gate = Arc::new(RequestGate::new(table, Arc::clone(&jwt_decoder)));

        let directory = Arc::new(PrincipalDirectory::from_records(&config.principals)?);
        let throttle = Arc::new(RequestThrottle::new(&config.rate_limit, RateLimiter::new()));
        let security_headers = Arc::new(SecurityHeaders::from_config(&config.security_headers)?);

        tracing::info!(
            protected_routes = gate.table().len(),
            principals = directory.len(),
            rate_limit_enabled = throttle.is_enabled(),
            "Gatehouse state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            jwt_encoder,
            jwt_decoder,
            gate,
            directory,
            throttle,
            security_headers,
        })
    }
}
