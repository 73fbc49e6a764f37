//! Integration tests for the route gate.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;

use gatehouse_auth::jwt::JwtEncoder;

#[tokio::test]
async fn test_valid_token_reaches_protected_page() {
    let app = helpers::TestApp::new();
    let token = app.token_for("writer-1");

    let response = app.request("GET", "/posts/new", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["page"], "posts.new");
    assert_eq!(response.body["principal"]["id"], "writer-1");
}

#[tokio::test]
async fn test_missing_token_redirects_to_login() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/dashboard", None, None).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        Some("/login?redirect=%2Fdashboard")
    );
}

#[tokio::test]
async fn test_expired_token_redirects_to_login() {
    let app = helpers::TestApp::new();
    let principal = app.principal("writer-1");
    let expired = JwtEncoder::new(&app.config.auth)
        .issue_at(&principal, Utc::now() - Duration::hours(25))
        .unwrap();

    let response = app
        .request("GET", "/posts/new", None, Some(&expired.token))
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        Some("/login?redirect=%2Fposts%2Fnew")
    );
}

#[tokio::test]
async fn test_foreign_signature_redirects_to_login() {
    let app = helpers::TestApp::new();
    let mut other = app.config.auth.clone();
    other.jwt_secret = "someone-else".to_string();
    let forged = JwtEncoder::new(&other)
        .issue(&app.principal("admin-1"))
        .unwrap();

    let response = app.request("GET", "/admin", None, Some(&forged.token)).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert!(response.header("location").unwrap().starts_with("/login"));
}

#[tokio::test]
async fn test_partial_permissions_redirect_to_unauthorized() {
    let app = helpers::TestApp::new();
    let token = app.token_for("reader-1");

    let response = app.request("GET", "/posts/new", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), Some("/unauthorized"));
}

#[tokio::test]
async fn test_admin_area_requires_admin_role() {
    let app = helpers::TestApp::new();

    let writer = app
        .request("GET", "/admin", None, Some(&app.token_for("writer-1")))
        .await;
    assert_eq!(writer.header("location"), Some("/unauthorized"));

    let admin = app
        .request("GET", "/admin", None, Some(&app.token_for("admin-1")))
        .await;
    assert_eq!(admin.status, StatusCode::OK);
}

#[tokio::test]
async fn test_segment_boundary_is_respected() {
    let app = helpers::TestApp::new();

    // "/administrator" is not under "/admin"; no route exists, so the router answers.
    let response = app.request("GET", "/administrator", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // A sub-path of "/admin" is gated even without a matching route.
    let response = app.request("GET", "/admin/settings", None, None).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_unprotected_paths_pass_without_token() {
    let app = helpers::TestApp::new();

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");

    let login = app.request("GET", "/login?redirect=%2Fdashboard", None, None).await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["redirect"], "/dashboard");
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = helpers::TestApp::new();

    for response in [
        app.request("GET", "/api/health", None, None).await,
        app.request("GET", "/dashboard", None, None).await,
        app.request("GET", "/nowhere", None, None).await,
        app.request_with_headers(
            "OPTIONS",
            "/api/auth/login",
            None,
            None,
            &[
                ("Origin", "https://app.example.com"),
                ("Access-Control-Request-Method", "POST"),
            ],
        )
        .await,
    ] {
        assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
        assert_eq!(response.header("x-frame-options"), Some("DENY"));
        assert_eq!(
            response.header("referrer-policy"),
            Some("strict-origin-when-cross-origin")
        );
        assert!(response.header("content-security-policy").is_some());
    }
}

#[tokio::test]
async fn test_preflight_is_answered_by_cors() {
    let app = helpers::TestApp::new();

    let response = app
        .request_with_headers(
            "OPTIONS",
            "/api/auth/login",
            None,
            None,
            &[
                ("Origin", "https://app.example.com"),
                ("Access-Control-Request-Method", "POST"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("access-control-allow-methods").is_some());
    assert_eq!(response.header("x-frame-options"), Some("DENY"));
}
