//! Claims structure embedded in every issued token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatehouse_core::types::{Permission, Principal, Role};

/// Claims payload: a snapshot of the principal at issuance time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal ID.
    pub sub: String,
    /// Email at issuance.
    pub email: String,
    /// Display name at issuance.
    pub name: String,
    /// Role at issuance.
    pub role: Role,
    /// Permissions at issuance.
    pub permissions: Vec<Permission>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID, useful for correlating log lines.
    pub jti: Uuid,
}

impl Claims {
    /// Builds claims for `principal` valid from `issued_at` until `expires_at`.
    pub fn for_principal(
        principal: &Principal,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: principal.id.clone(),
            email: principal.email.clone(),
            name: principal.name.clone(),
            role: principal.role,
            permissions: principal.permissions.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// Rebuilds the principal snapshot. Only active principals receive tokens.
    pub fn into_principal(self) -> Principal {
        Principal {
            id: self.sub,
            email: self.email,
            name: self.name,
            role: self.role,
            permissions: self.permissions,
            active: true,
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Returns the remaining TTL in seconds (0 if expired).
    pub fn remaining_ttl_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}
