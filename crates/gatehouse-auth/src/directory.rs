//! In-memory principal directory seeded from configuration.
//!
//! Grant changes made here apply to future logins only. Tokens already
//! issued keep the role and permissions they were signed with until they
//! expire.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{info, warn};

use gatehouse_core::config::PrincipalRecord;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::types::{Permission, Principal, Role};

use crate::gate::anonymize_actor;
use crate::password::PasswordHasher;

#[derive(Debug, Clone)]
struct StoredPrincipal {
    principal: Principal,
    password_hash: String,
}

/// Principals and their credentials, keyed by id.
#[derive(Debug, Clone)]
pub struct PrincipalDirectory {
    /// Id → principal.
    by_id: Arc<DashMap<String, StoredPrincipal>>,
    /// Lowercased email → id.
    by_email: Arc<DashMap<String, String>>,
    /// Credential verifier.
    hasher: PasswordHasher,
    /// Hash checked when the email is unknown, so every login pays for one Argon2 verification.
    dummy_hash: Arc<str>,
}

impl PrincipalDirectory {
    /// Creates a directory from configured records.
    pub fn from_records(records: &[PrincipalRecord]) -> AppResult<Self> {
        let hasher = PasswordHasher::new();
        let dummy_hash = hasher.hash_password("gatehouse-unknown-principal")?;
        let directory = Self {
            by_id: Arc::new(DashMap::new()),
            by_email: Arc::new(DashMap::new()),
            hasher,
            dummy_hash: Arc::from(dummy_hash),
        };
        for record in records {
            directory.insert(record.to_principal(), record.password_hash.clone())?;
        }
        Ok(directory)
    }

    /// Adds a principal with an Argon2 password hash.
    pub fn insert(&self, principal: Principal, password_hash: String) -> AppResult<()> {
        let email = principal.email.to_lowercase();

        // Lock order is by_id then by_email; no other path holds both.
        let Entry::Vacant(id_slot) = self.by_id.entry(principal.id.clone()) else {
            return Err(AppError::validation(format!(
                "Duplicate principal id '{}'",
                principal.id
            )));
        };
        let Entry::Vacant(email_slot) = self.by_email.entry(email) else {
            return Err(AppError::validation(format!(
                "Duplicate principal email '{}'",
                principal.email
            )));
        };

        email_slot.insert(principal.id.clone());
        id_slot.insert(StoredPrincipal {
            principal,
            password_hash,
        });
        Ok(())
    }

    /// Looks a principal up by id.
    pub fn get(&self, id: &str) -> Option<Principal> {
        self.by_id.get(id).map(|entry| entry.principal.clone())
    }

    /// Number of principals.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Checks credentials and returns the active principal.
    ///
    /// Unknown emails, wrong passwords, and inactive principals all produce
    /// the same `Authentication` error.
    pub fn authenticate(&self, email: &str, password: &str) -> AppResult<Principal> {
        let rejected = || AppError::authentication("Invalid email or password");

        let Some(id) = self
            .by_email
            .get(&email.to_lowercase())
            .map(|entry| entry.value().clone())
        else {
            let _ = self.hasher.verify_password(password, &self.dummy_hash);
            warn!("Login attempt for unknown email");
            return Err(rejected());
        };

        let Some(stored) = self.by_id.get(&id).map(|entry| entry.value().clone()) else {
            let _ = self.hasher.verify_password(password, &self.dummy_hash);
            return Err(rejected());
        };

        if !self
            .hasher
            .verify_password(password, &stored.password_hash)?
        {
            warn!(actor = %anonymize_actor(&id), "Login attempt with wrong password");
            return Err(rejected());
        }

        if !stored.principal.active {
            warn!(actor = %anonymize_actor(&id), "Login attempt for inactive principal");
            return Err(rejected());
        }

        Ok(stored.principal)
    }

    /// Replaces a principal's role and permissions.
    pub fn update_grants(
        &self,
        id: &str,
        role: Role,
        permissions: Vec<Permission>,
    ) -> AppResult<Principal> {
        let mut entry = self
            .by_id
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Principal '{id}' not found")))?;

        entry.principal.role = role;
        entry.principal.permissions = permissions;

        info!(
            actor = %anonymize_actor(id),
            role = %role,
            "Principal grants updated; previously issued tokens keep their grants until expiry"
        );
        Ok(entry.principal.clone())
    }

    /// Marks a principal active or inactive.
    pub fn set_active(&self, id: &str, active: bool) -> AppResult<Principal> {
        let mut entry = self
            .by_id
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Principal '{id}' not found")))?;
        entry.principal.active = active;

        info!(actor = %anonymize_actor(id), active, "Principal activation changed");
        Ok(entry.principal.clone())
    }
}
