//! Fixed-window rate-limit middleware.
//!
//! Clients are identified by their verified token subject when one is
//! presented, otherwise by forwarded address headers or the peer address.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::{AUTHORIZATION, RETRY_AFTER};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use gatehouse_auth::gate::extract_bearer;
use gatehouse_auth::jwt::JwtDecoder;
use gatehouse_auth::rate_limit::RateLimitDecision;
use gatehouse_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Rate-limit middleware, installed with `from_fn_with_state`.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_identity(request.headers(), peer, &state.jwt_decoder);

    let Some(decision) = state.throttle.check(request.uri().path(), &client) else {
        return next.run(request).await;
    };

    if !decision.allowed {
        let mut response =
            ApiError(AppError::rate_limited("Too many requests, please try again later"))
                .into_response();
        let headers = response.headers_mut();
        headers.insert(RETRY_AFTER, HeaderValue::from(decision.retry_after_seconds));
        write_limit_headers(headers, &decision);
        return response;
    }

    let mut response = next.run(request).await;
    write_limit_headers(response.headers_mut(), &decision);
    response
}

/// Identity used as the rate-limit key.
///
/// Order: `user:<id>` from a valid bearer token, first `X-Forwarded-For`
/// entry, `X-Real-IP`, peer address, then `unknown`.
pub fn client_identity(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    decoder: &JwtDecoder,
) -> String {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if let Some(principal) = extract_bearer(bearer).and_then(|t| decoder.verify(t).ok()) {
        return format!("user:{}", principal.id);
    }

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = real_ip {
        return ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn write_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));
    headers.insert(
        X_RATELIMIT_RESET,
        HeaderValue::from(decision.reset_at.timestamp()),
    );
}
