//! Integration tests for the rate limiter.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_sensitive_prefix_caps_at_one_hundred() {
    let app = helpers::TestApp::new();
    let client = [("x-forwarded-for", "203.0.113.7")];

    for i in 0..100 {
        let response = app
            .request_with_headers("GET", "/api/auth/me", None, None, &client)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "request {i}");
    }

    let response = app
        .request_with_headers("GET", "/api/auth/me", None, None, &client)
        .await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["error"], "RATE_LIMITED");
    assert_eq!(response.header("x-ratelimit-remaining"), Some("0"));
    let retry_after: u64 = response.header("retry-after").unwrap().parse().unwrap();
    assert!(retry_after > 0 && retry_after <= 900);
}

#[tokio::test]
async fn test_clients_are_counted_separately() {
    let mut config = helpers::test_config();
    config.rate_limit.default.max_requests = 2;
    let app = helpers::TestApp::with_config(config);

    let a = [("x-forwarded-for", "198.51.100.1")];
    let b = [("x-forwarded-for", "198.51.100.2")];

    for _ in 0..2 {
        let response = app
            .request_with_headers("GET", "/api/health", None, None, &a)
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
    let blocked = app
        .request_with_headers("GET", "/api/health", None, None, &a)
        .await;
    assert_eq!(blocked.status, StatusCode::TOO_MANY_REQUESTS);

    let other = app
        .request_with_headers("GET", "/api/health", None, None, &b)
        .await;
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn test_authenticated_clients_keyed_by_subject() {
    let mut config = helpers::test_config();
    config.rate_limit.default.max_requests = 1;
    let app = helpers::TestApp::with_config(config);
    let token = app.token_for("writer-1");

    let first = app
        .request_with_headers(
            "GET",
            "/dashboard",
            None,
            Some(&token),
            &[("x-forwarded-for", "192.0.2.1")],
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    // Same principal from a different address shares the counter.
    let second = app
        .request_with_headers(
            "GET",
            "/dashboard",
            None,
            Some(&token),
            &[("x-forwarded-for", "192.0.2.2")],
        )
        .await;
    assert_eq!(second.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_limit_headers_on_allowed_response() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("x-ratelimit-limit"), Some("1000"));
    assert_eq!(response.header("x-ratelimit-remaining"), Some("999"));
    assert!(response.header("x-ratelimit-reset").is_some());
}

#[tokio::test]
async fn test_disabled_limiter_adds_no_headers() {
    let mut config = helpers::test_config();
    config.rate_limit.enabled = false;
    let app = helpers::TestApp::with_config(config);

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("x-ratelimit-limit").is_none());
}
