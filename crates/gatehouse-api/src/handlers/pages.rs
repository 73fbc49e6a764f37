//! Landing pages used as redirect targets and gate-protected destinations.

use axum::Json;
use axum::extract::Query;

use crate::dto::request::RedirectQuery;
use crate::dto::response::PageResponse;
use crate::extractors::MaybePrincipal;

fn page(name: &str, message: &str, MaybePrincipal(principal): MaybePrincipal) -> Json<PageResponse> {
    Json(PageResponse {
        page: name.to_string(),
        message: message.to_string(),
        redirect: None,
        principal,
    })
}

/// GET /
pub async fn home(principal: MaybePrincipal) -> Json<PageResponse> {
    page("home", "Welcome", principal)
}

/// GET /login
pub async fn login_page(Query(query): Query<RedirectQuery>) -> Json<PageResponse> {
    Json(PageResponse {
        page: "login".to_string(),
        message: "Sign in with POST /api/auth/login".to_string(),
        redirect: query.redirect,
        principal: None,
    })
}

/// GET /unauthorized
pub async fn unauthorized_page() -> Json<PageResponse> {
    page(
        "unauthorized",
        "You do not have access to that page",
        MaybePrincipal::default(),
    )
}

/// GET /dashboard
pub async fn dashboard(principal: MaybePrincipal) -> Json<PageResponse> {
    page("dashboard", "Dashboard", principal)
}

/// GET /profile
pub async fn profile(principal: MaybePrincipal) -> Json<PageResponse> {
    page("profile", "Profile", principal)
}

/// GET /posts/new
pub async fn new_post(principal: MaybePrincipal) -> Json<PageResponse> {
    page("posts.new", "Compose a post", principal)
}

/// GET /admin
pub async fn admin(principal: MaybePrincipal) -> Json<PageResponse> {
    page("admin", "Administration", principal)
}
