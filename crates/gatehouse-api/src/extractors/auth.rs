//! `AuthUser` extractor: reuses the principal attached by the gate, or
//! verifies the bearer token itself on routes the gate does not cover.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use gatehouse_auth::gate::extract_bearer;
use gatehouse_core::error::AppError;
use gatehouse_core::types::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated principal available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(AuthUser(principal.clone()));
        }

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = extract_bearer(header)
            .ok_or_else(|| AppError::authentication("Authentication required"))?;

        let principal = state.jwt_decoder.verify(token).map_err(AppError::from)?;
        Ok(AuthUser(principal))
    }
}

/// The gate-attached principal, if the route was protected and allowed.
#[derive(Debug, Clone, Default)]
pub struct MaybePrincipal(pub Option<Principal>);

impl<S: Send + Sync> FromRequestParts<S> for MaybePrincipal {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybePrincipal(parts.extensions.get::<Principal>().cloned()))
    }
}
