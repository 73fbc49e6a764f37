//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatehouse_core::types::Principal;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// The authenticated principal.
    pub principal: Principal,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since start-up.
    pub uptime_seconds: u64,
}

/// Body of the landing pages (`/login`, `/dashboard`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    /// Page name.
    pub page: String,
    /// Text for the client.
    pub message: String,
    /// Where the client was redirected from, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    /// The signed-in principal on protected pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
}
