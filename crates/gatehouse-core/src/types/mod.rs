//! Core type definitions used across the Gatehouse workspace.

pub mod policy;
pub mod principal;

pub use policy::{PermissionRequirement, RoutePolicy};
pub use principal::{Permission, Principal, Role};
