//! Route definitions for the Gatehouse HTTP API.
//!
//! API routes are mounted under `/api`; landing pages live at the root.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Layers run outermost first: trace, security headers, CORS, request
/// logging, rate limit, gate. Preflight answers from CORS still pass
/// through the security header layer.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::gate::route_gate,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .layer(cors)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::security_headers::security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Auth endpoints: login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Admin endpoints: principal lookup, grant changes, activation
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/principals/{id}",
            get(handlers::admin::get_principal),
        )
        .route(
            "/admin/principals/{id}/grants",
            put(handlers::admin::update_grants),
        )
        .route(
            "/admin/principals/{id}/active",
            put(handlers::admin::set_active),
        )
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Landing pages and redirect targets
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/login", get(handlers::pages::login_page))
        .route("/unauthorized", get(handlers::pages::unauthorized_page))
        .route("/dashboard", get(handlers::pages::dashboard))
        .route("/profile", get(handlers::pages::profile))
        .route("/posts/new", get(handlers::pages::new_post))
        .route("/admin", get(handlers::pages::admin))
}
