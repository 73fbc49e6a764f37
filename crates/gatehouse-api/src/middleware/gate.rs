//! Route gate middleware.
//!
//! Runs every request through [`RequestGate`](gatehouse_auth::gate::RequestGate).
//! Allowed requests carry the verified [`Principal`] as a request extension;
//! denied requests are redirected and never reach a handler.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use gatehouse_auth::gate::{DenyReason, GateDecision};
use gatehouse_core::config::AuthConfig;
use gatehouse_core::types::Principal;

use crate::state::AppState;

/// Gate middleware, installed with `from_fn_with_state`.
pub async fn route_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.gate.evaluate(&path, authorization) {
        GateDecision::Unprotected => next.run(request).await,
        GateDecision::Allow(principal) => {
            request.extensions_mut().insert::<Principal>(principal);
            next.run(request).await
        }
        GateDecision::Deny(denial) => {
            Redirect::temporary(&redirect_target(&state.config.auth, denial.reason, &path))
                .into_response()
        }
    }
}

/// Where a denied request is sent.
///
/// Unauthenticated requests go to the login page with the original path
/// in `?redirect=`; unauthorized ones go to the unauthorized page.
pub fn redirect_target(auth: &AuthConfig, reason: DenyReason, path: &str) -> String {
    match reason {
        DenyReason::Unauthenticated => {
            let encoded: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
            format!("{}?redirect={encoded}", auth.login_path)
        }
        DenyReason::Unauthorized => auth.unauthorized_path.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_carries_encoded_path() {
        let auth = AuthConfig::default();
        assert_eq!(
            redirect_target(&auth, DenyReason::Unauthenticated, "/posts/new"),
            "/login?redirect=%2Fposts%2Fnew"
        );
    }

    #[test]
    fn test_unauthorized_redirect_drops_path() {
        let auth = AuthConfig::default();
        assert_eq!(
            redirect_target(&auth, DenyReason::Unauthorized, "/admin/users"),
            "/unauthorized"
        );
    }
}
