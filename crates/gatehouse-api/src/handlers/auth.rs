//! Auth handlers: login and me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use gatehouse_auth::gate::anonymize_actor;
use gatehouse_core::types::Principal;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    req.validate()?;

    let principal = state.directory.authenticate(&req.email, &req.password)?;
    let issued = state.jwt_encoder.issue(&principal)?;

    tracing::info!(actor = %anonymize_actor(&principal.id), "Principal signed in");

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_at: issued.expires_at,
        principal,
    })))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<Principal>> {
    Json(ApiResponse::ok(auth.0))
}
