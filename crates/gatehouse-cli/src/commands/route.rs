//! Route policy inspection.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use gatehouse_auth::policy::RoutePolicyTable;
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::types::{PermissionRequirement, RoutePolicy};

use crate::output::{self, OutputFormat};

/// Arguments for the check-route command
#[derive(Debug, Args)]
pub struct CheckRouteArgs {
    /// Request path, e.g. `/posts/new`
    pub path: String,
}

/// One row of the policy listing.
#[derive(Debug, Serialize, Tabled)]
pub struct PolicyRow {
    /// Path prefix.
    pub pattern: String,
    /// `all` or `any`.
    pub mode: String,
    /// Comma-separated permissions.
    pub permissions: String,
    /// Comma-separated roles, `*` for any.
    pub roles: String,
}

impl From<&RoutePolicy> for PolicyRow {
    fn from(policy: &RoutePolicy) -> Self {
        let mode = match policy.requirement {
            PermissionRequirement::RequireAll(_) => "all",
            PermissionRequirement::RequireAny(_) => "any",
        };
        let permissions = policy
            .requirement
            .permissions()
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let roles = if policy.allowed_roles.is_empty() {
            "*".to_string()
        } else {
            policy
                .allowed_roles
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self {
            pattern: policy.pattern.clone(),
            mode: mode.to_string(),
            permissions,
            roles,
        }
    }
}

/// Prints the policy that governs `path`, if any.
pub fn check(args: &CheckRouteArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let table = RoutePolicyTable::new(config.routes.clone());
    match table.lookup(&args.path) {
        Some(policy) => output::print_list(&[PolicyRow::from(policy)], format),
        None => output::print_warning(&format!("'{}' is not protected", args.path)),
    }
    Ok(())
}

/// Prints the whole table, longest pattern first.
pub fn list(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let table = RoutePolicyTable::new(config.routes.clone());
    let rows: Vec<PolicyRow> = table.iter().map(PolicyRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
