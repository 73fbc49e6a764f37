//! Seed principals for the in-memory directory.

use serde::{Deserialize, Serialize};

use crate::types::{Permission, Principal, Role};

/// A principal as written in configuration, including its password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalRecord {
    /// Stable principal identifier.
    pub id: String,
    /// Email address used to sign in.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role held by the principal.
    pub role: Role,
    /// Fine-grained permissions.
    #[serde(default)]
    pub permissions: Vec<Permission>,
    /// Whether the principal may sign in.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Argon2 password hash in PHC string format.
    pub password_hash: String,
}

impl PrincipalRecord {
    /// Returns the principal without its credential.
    pub fn to_principal(&self) -> Principal {
        Principal {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            permissions: self.permissions.clone(),
            active: self.active,
        }
    }
}

fn default_active() -> bool {
    true
}
