//! Static security headers stamped on every response.

use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use gatehouse_core::config::SecurityHeadersConfig;
use gatehouse_core::error::AppError;

use crate::state::AppState;

/// Pre-parsed header set.
#[derive(Debug, Clone, Default)]
pub struct SecurityHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl SecurityHeaders {
    /// Parses the configured values once. Disabled config yields an empty set.
    pub fn from_config(config: &SecurityHeadersConfig) -> Result<Self, AppError> {
        if !config.enabled {
            return Ok(Self::default());
        }

        let pairs = [
            ("x-content-type-options", &config.content_type_options),
            ("x-frame-options", &config.frame_options),
            ("x-xss-protection", &config.xss_protection),
            ("referrer-policy", &config.referrer_policy),
            ("permissions-policy", &config.permissions_policy),
            ("content-security-policy", &config.content_security_policy),
        ];

        let mut headers = Vec::with_capacity(pairs.len());
        for (name, value) in pairs {
            if value.is_empty() {
                continue;
            }
            let value = HeaderValue::from_str(value).map_err(|e| {
                AppError::configuration(format!("Invalid value for header '{name}': {e}"))
            })?;
            headers.push((HeaderName::from_static(name), value));
        }

        Ok(Self { headers })
    }

    /// The headers that will be applied.
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.headers.iter().map(|(n, v)| (n, v))
    }

    /// Writes the headers onto a response, replacing existing values.
    pub fn apply(&self, response: &mut Response) {
        let target = response.headers_mut();
        for (name, value) in &self.headers {
            target.insert(name.clone(), value.clone());
        }
    }
}

/// Adds the configured security headers to every response, redirects and errors included.
pub async fn security_headers(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    state.security_headers.apply(&mut response);
    response
}
