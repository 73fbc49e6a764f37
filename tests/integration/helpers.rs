//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use gatehouse_api::{AppState, build_app};
use gatehouse_auth::jwt::JwtEncoder;
use gatehouse_auth::password::PasswordHasher;
use gatehouse_core::config::{AppConfig, PrincipalRecord};
use gatehouse_core::types::{Permission, Principal, Role};

/// Password shared by every seeded principal.
pub const PASSWORD: &str = "correct horse battery staple";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct access to services
    pub state: AppState,
    /// Application config
    pub config: AppConfig,
}

/// Response captured from the router
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Header value as a string, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    /// Create a test application with the default route table and three principals.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application from a custom config.
    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::from_config(config.clone()).expect("Failed to build state");
        let router = build_app(state.clone());
        Self {
            router,
            state,
            config,
        }
    }

    /// Issue a valid token for a seeded principal.
    pub fn token_for(&self, id: &str) -> String {
        let principal = self.principal(id);
        JwtEncoder::new(&self.config.auth)
            .issue(&principal)
            .expect("Failed to issue token")
            .token
    }

    /// Look up a seeded principal.
    pub fn principal(&self, id: &str) -> Principal {
        self.state
            .directory
            .get(id)
            .unwrap_or_else(|| panic!("No principal '{id}'"))
    }

    /// Send a request to the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, path, body, token, &[]).await
    }

    /// Send a request with extra headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Default config with a test secret and seeded principals:
///
/// - `admin-1`: admin with `admin:access`, `read:posts`, `write:posts`
/// - `writer-1`: user with `read:posts`, `write:posts`
/// - `reader-1`: user with `read:posts` only
pub fn test_config() -> AppConfig {
    let hash = PasswordHasher::new()
        .hash_password(PASSWORD)
        .expect("Failed to hash password");

    let record = |id: &str, email: &str, role: Role, permissions: &[&str]| PrincipalRecord {
        id: id.to_string(),
        email: email.to_string(),
        name: id.to_string(),
        role,
        permissions: permissions.iter().map(|p| Permission::from(*p)).collect(),
        active: true,
        password_hash: hash.clone(),
    };

    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.principals = vec![
        record(
            "admin-1",
            "admin@example.com",
            Role::Admin,
            &["admin:access", "read:posts", "write:posts"],
        ),
        record(
            "writer-1",
            "writer@example.com",
            Role::User,
            &["read:posts", "write:posts"],
        ),
        record("reader-1", "reader@example.com", Role::User, &["read:posts"]),
    ];
    config
}
