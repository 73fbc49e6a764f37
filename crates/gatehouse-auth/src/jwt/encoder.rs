//! Token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use gatehouse_core::config::AuthConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::types::Principal;

use super::claims::Claims;
use super::error::TokenError;

/// Creates signed, time-limited tokens for principals.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token lifetime.
    ttl: chrono::Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The encoded bearer token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: chrono::Duration::hours(config.token_ttl_hours as i64),
        }
    }

    /// Returns the configured token lifetime.
    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Issues a token for `principal`, valid from now for the configured TTL.
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, AppError> {
        self.issue_at(principal, Utc::now())
    }

    /// Issues a token as if signed at `issued_at`.
    pub fn issue_at(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        if !principal.active {
            return Err(AppError::authentication(format!(
                "Principal '{}' is inactive",
                principal.id
            )));
        }

        let expires_at = issued_at + self.ttl;
        let claims = Claims::for_principal(principal, issued_at, expires_at);

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        tracing::debug!(jti = %claims.jti, exp = claims.exp, "Issued token");

        Ok(IssuedToken { token, expires_at })
    }
}
