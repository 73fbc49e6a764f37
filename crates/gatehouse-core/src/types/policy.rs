//! Declarative route policy entries.

use serde::{Deserialize, Serialize};

use super::principal::{Permission, Role};

/// Permission requirement attached to a protected route.
///
/// Serialized externally tagged, e.g. `{ require_all = ["read:posts"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionRequirement {
    /// Every listed permission must be held.
    RequireAll(Vec<Permission>),
    /// At least one listed permission must be held.
    RequireAny(Vec<Permission>),
}

impl PermissionRequirement {
    /// Returns the listed permissions regardless of the variant.
    pub fn permissions(&self) -> &[Permission] {
        match self {
            Self::RequireAll(list) | Self::RequireAny(list) => list,
        }
    }
}

impl Default for PermissionRequirement {
    fn default() -> Self {
        Self::RequireAll(Vec::new())
    }
}

/// A protected path prefix with its permission and role requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePolicy {
    /// Path prefix, matched on segment boundaries (e.g. `/admin`).
    pub pattern: String,
    /// Required permissions.
    #[serde(default)]
    pub requirement: PermissionRequirement,
    /// Roles allowed on this route. Empty means any role.
    #[serde(default)]
    pub allowed_roles: Vec<Role>,
}

impl RoutePolicy {
    /// Creates a policy with the given pattern and requirement, open to any role.
    pub fn new(pattern: impl Into<String>, requirement: PermissionRequirement) -> Self {
        Self {
            pattern: pattern.into(),
            requirement,
            allowed_roles: Vec::new(),
        }
    }

    /// Restricts the policy to the given roles.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles = roles.into_iter().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_is_externally_tagged() {
        let policy: RoutePolicy = serde_json::from_value(serde_json::json!({
            "pattern": "/posts/new",
            "requirement": { "require_all": ["read:posts", "write:posts"] },
            "allowed_roles": ["admin", "user"],
        }))
        .unwrap();

        assert_eq!(
            policy.requirement,
            PermissionRequirement::RequireAll(vec!["read:posts".into(), "write:posts".into()])
        );
        assert_eq!(policy.allowed_roles, vec![Role::Admin, Role::User]);
    }

    #[test]
    fn test_missing_fields_default_to_open_policy() {
        let policy: RoutePolicy =
            serde_json::from_value(serde_json::json!({ "pattern": "/dashboard" })).unwrap();
        assert!(policy.requirement.permissions().is_empty());
        assert!(policy.allowed_roles.is_empty());
    }
}
