//! Policy evaluation: the single place authorization decisions are made.

use gatehouse_core::error::AppError;
use gatehouse_core::types::{PermissionRequirement, Principal, RoutePolicy};

/// Returns whether `principal` meets the permission requirement alone.
pub fn satisfies_requirement(principal: &Principal, requirement: &PermissionRequirement) -> bool {
    match requirement {
        PermissionRequirement::RequireAll(required) => {
            required.iter().all(|p| principal.has_permission(p))
        }
        PermissionRequirement::RequireAny(required) => {
            required.is_empty() || required.iter().any(|p| principal.has_permission(p))
        }
    }
}

/// Checks principals against route policies.
///
/// A principal is authorized only when both the permission requirement
/// and the role restriction pass.
#[derive(Debug, Clone, Default)]
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    /// Creates a new evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Returns `Ok(())` if allowed, or an `Authorization` error naming the
    /// first failed check.
    pub fn authorize(&self, principal: &Principal, policy: &RoutePolicy) -> Result<(), AppError> {
        if !satisfies_requirement(principal, &policy.requirement) {
            let missing: Vec<&str> = policy
                .requirement
                .permissions()
                .iter()
                .filter(|p| !principal.has_permission(p))
                .map(|p| p.as_str())
                .collect();
            return Err(AppError::authorization(format!(
                "Route '{}' requires permissions [{}]",
                policy.pattern,
                missing.join(", ")
            )));
        }

        if !policy.allowed_roles.is_empty() && !policy.allowed_roles.contains(&principal.role) {
            return Err(AppError::authorization(format!(
                "Role '{}' is not allowed on route '{}'",
                principal.role, policy.pattern
            )));
        }

        Ok(())
    }

    /// Boolean form of [`PolicyEvaluator::authorize`].
    pub fn is_authorized(&self, principal: &Principal, policy: &RoutePolicy) -> bool {
        self.authorize(principal, policy).is_ok()
    }
}
