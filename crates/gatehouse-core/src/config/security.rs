//! Static security response headers.

use serde::{Deserialize, Serialize};

/// Headers stamped on every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityHeadersConfig {
    /// Whether the headers are applied at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// `X-Content-Type-Options`.
    #[serde(default = "default_content_type_options")]
    pub content_type_options: String,
    /// `X-Frame-Options`.
    #[serde(default = "default_frame_options")]
    pub frame_options: String,
    /// `X-XSS-Protection`.
    #[serde(default = "default_xss_protection")]
    pub xss_protection: String,
    /// `Referrer-Policy`.
    #[serde(default = "default_referrer_policy")]
    pub referrer_policy: String,
    /// `Permissions-Policy`.
    #[serde(default = "default_permissions_policy")]
    pub permissions_policy: String,
    /// `Content-Security-Policy`.
    #[serde(default = "default_content_security_policy")]
    pub content_security_policy: String,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            content_type_options: default_content_type_options(),
            frame_options: default_frame_options(),
            xss_protection: default_xss_protection(),
            referrer_policy: default_referrer_policy(),
            permissions_policy: default_permissions_policy(),
            content_security_policy: default_content_security_policy(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_content_type_options() -> String {
    "nosniff".to_string()
}

fn default_frame_options() -> String {
    "DENY".to_string()
}

fn default_xss_protection() -> String {
    "1; mode=block".to_string()
}

fn default_referrer_policy() -> String {
    "strict-origin-when-cross-origin".to_string()
}

fn default_permissions_policy() -> String {
    "camera=(), microphone=(), geolocation=()".to_string()
}

fn default_content_security_policy() -> String {
    "default-src 'self'; script-src 'self' 'unsafe-eval' 'unsafe-inline'; \
     style-src 'self' 'unsafe-inline'; img-src 'self' data: https:; \
     font-src 'self' data:; connect-src 'self'; frame-ancestors 'none';"
        .to_string()
}
