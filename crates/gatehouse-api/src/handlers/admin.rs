//! Admin handlers for principal grants and activation.
//!
//! Mounted under `/api/admin`, which the default route table restricts to
//! the `admin` role with `admin:access`.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use gatehouse_auth::gate::anonymize_actor;
use gatehouse_core::error::AppError;
use gatehouse_core::types::Principal;

use crate::dto::request::{SetActiveRequest, UpdateGrantsRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/principals/{id}
pub async fn get_principal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Principal>>, ApiError> {
    let principal = state
        .directory
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("Principal '{id}' not found")))?;
    Ok(Json(ApiResponse::ok(principal)))
}

/// PUT /api/admin/principals/{id}/grants
///
/// Applies to the next login; tokens already issued are unchanged.
pub async fn update_grants(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateGrantsRequest>,
) -> Result<Json<ApiResponse<Principal>>, ApiError> {
    req.validate()?;

    let updated = state.directory.update_grants(&id, req.role, req.permissions)?;
    tracing::info!(
        by = %anonymize_actor(&auth.id),
        target = %anonymize_actor(&id),
        "Grants changed by admin"
    );
    Ok(Json(ApiResponse::ok(updated)))
}

/// PUT /api/admin/principals/{id}/active
///
/// A deactivated principal can no longer sign in. Tokens already issued
/// stay valid until they expire.
pub async fn set_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<ApiResponse<Principal>>, ApiError> {
    let updated = state.directory.set_active(&id, req.active)?;
    tracing::info!(
        by = %anonymize_actor(&auth.id),
        target = %anonymize_actor(&id),
        active = req.active,
        "Activation changed by admin"
    );
    Ok(Json(ApiResponse::ok(updated)))
}
