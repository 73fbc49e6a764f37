//! Integration tests for the sign-in flow and admin grant changes.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_login_then_me() {
    let app = helpers::TestApp::new();

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "writer@example.com",
                "password": helpers::PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["data"]["token_type"], "Bearer");
    assert_eq!(login.body["data"]["principal"]["role"], "user");
    let token = login.body["data"]["token"].as_str().unwrap().to_string();

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["id"], "writer-1");
    assert_eq!(
        me.body["data"]["permissions"],
        serde_json::json!(["read:posts", "write:posts"])
    );

    let page = app.request("GET", "/posts/new", None, Some(&token)).await;
    assert_eq!(page.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "writer@example.com",
                "password": "wrong",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert!(response.body.get("data").is_none());
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "nope", "password": "x" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_updates_grants_for_next_login() {
    let app = helpers::TestApp::new();
    let admin = app.token_for("admin-1");
    let old_reader_token = app.token_for("reader-1");

    let response = app
        .request(
            "PUT",
            "/api/admin/principals/reader-1/grants",
            Some(serde_json::json!({
                "role": "user",
                "permissions": ["read:posts", "write:posts"],
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["permissions"],
        serde_json::json!(["read:posts", "write:posts"])
    );

    // Tokens keep the grants they were signed with.
    let stale = app
        .request("GET", "/posts/new", None, Some(&old_reader_token))
        .await;
    assert_eq!(stale.header("location"), Some("/unauthorized"));

    let fresh = app
        .request("GET", "/posts/new", None, Some(&app.token_for("reader-1")))
        .await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_api_is_gated() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "GET",
            "/api/admin/principals/reader-1",
            None,
            Some(&app.token_for("writer-1")),
        )
        .await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), Some("/unauthorized"));

    let missing = app
        .request(
            "GET",
            "/api/admin/principals/nobody",
            None,
            Some(&app.token_for("admin-1")),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_deactivation_blocks_next_login() {
    let app = helpers::TestApp::new();
    let login = || {
        app.request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "writer@example.com",
                "password": helpers::PASSWORD,
            })),
            None,
        )
    };
    assert_eq!(login().await.status, StatusCode::OK);

    let denied = app
        .request(
            "PUT",
            "/api/admin/principals/writer-1/active",
            Some(serde_json::json!({ "active": false })),
            Some(&app.token_for("writer-1")),
        )
        .await;
    assert_eq!(denied.status, StatusCode::TEMPORARY_REDIRECT);

    let response = app
        .request(
            "PUT",
            "/api/admin/principals/writer-1/active",
            Some(serde_json::json!({ "active": false })),
            Some(&app.token_for("admin-1")),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["active"], false);

    assert_eq!(login().await.status, StatusCode::UNAUTHORIZED);
}
