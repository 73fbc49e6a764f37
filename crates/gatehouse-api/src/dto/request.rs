//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use gatehouse_core::types::{Permission, Role};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Replaces a principal's role and permissions (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateGrantsRequest {
    /// New role.
    pub role: Role,
    /// New permission set, replacing the old one.
    #[serde(default)]
    #[validate(length(max = 256, message = "Too many permissions"))]
    pub permissions: Vec<Permission>,
}

/// Activates or deactivates a principal (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// Optional `?redirect=` on landing pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectQuery {
    /// Path the client was sent away from.
    pub redirect: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_update_grants_parses_role() {
        let req: UpdateGrantsRequest = serde_json::from_value(serde_json::json!({
            "role": "moderator",
            "permissions": ["moderate:posts"],
        }))
        .unwrap();
        assert_eq!(req.role, Role::Moderator);
        assert_eq!(req.permissions, vec![Permission::from("moderate:posts")]);
    }
}
