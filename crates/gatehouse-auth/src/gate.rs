//! The request gate: a single synchronous pass per request.
//!
//! ```text
//! START -> TOKEN_EXTRACTED -> VERIFIED -> POLICY_CHECKED -> ALLOW
//!   |            |               |
//!   +------------+---------------+-> DENY(unauthenticated)
//!                                    DENY(unauthorized)   <- POLICY_CHECKED
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use gatehouse_core::types::Principal;

use crate::jwt::{JwtDecoder, TokenError};
use crate::policy::{PolicyEvaluator, RoutePolicyTable};

/// Gate progress, used to report how far a denied request got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStage {
    /// Nothing inspected yet.
    Start,
    /// A bearer token was found in the request.
    TokenExtracted,
    /// The token's signature and expiry checked out.
    Verified,
    /// The principal was evaluated against the route policy.
    PolicyChecked,
}

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No token, a malformed header, or a token that failed verification.
    Unauthenticated,
    /// A valid token whose grants do not satisfy the route policy.
    Unauthorized,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "unauthenticated"),
            Self::Unauthorized => write!(f, "unauthorized"),
        }
    }
}

/// A denial with the internal detail that is logged but never shown to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    /// Outcome category.
    pub reason: DenyReason,
    /// Last stage the request completed before being denied.
    pub stage: GateStage,
    /// Diagnostic detail for logs.
    pub detail: String,
}

/// Outcome of running a request through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// No policy covers the path; forward without inspecting credentials.
    Unprotected,
    /// The principal satisfied the route policy.
    Allow(Principal),
    /// The request must not reach the handler.
    Deny(Denial),
}

impl GateDecision {
    /// Whether the request may proceed.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Self::Deny(_))
    }
}

/// Extracts, verifies, and authorizes bearer tokens against the route table.
#[derive(Debug, Clone)]
pub struct RequestGate {
    /// Protected path prefixes.
    table: Arc<RoutePolicyTable>,
    /// Token verifier.
    decoder: Arc<JwtDecoder>,
    /// Policy checks.
    evaluator: PolicyEvaluator,
}

impl RequestGate {
    /// Creates a gate over the given table and verifier.
    pub fn new(table: Arc<RoutePolicyTable>, decoder: Arc<JwtDecoder>) -> Self {
        Self {
            table,
            decoder,
            evaluator: PolicyEvaluator::new(),
        }
    }

    /// Returns the route table this gate enforces.
    pub fn table(&self) -> &RoutePolicyTable {
        &self.table
    }

    /// Runs one request through the gate.
    ///
    /// `authorization` is the raw `Authorization` header value, if any.
    pub fn evaluate(&self, path: &str, authorization: Option<&str>) -> GateDecision {
        let Some(policy) = self.table.lookup(path) else {
            return GateDecision::Unprotected;
        };

        let Some(token) = extract_bearer(authorization) else {
            return self.deny(
                path,
                None,
                DenyReason::Unauthenticated,
                GateStage::Start,
                "missing or malformed bearer header".to_string(),
            );
        };

        let principal = match self.decoder.verify(token) {
            Ok(principal) => principal,
            Err(err) => {
                let detail = match err {
                    TokenError::Expired => "token expired",
                    _ => "token failed verification",
                };
                return self.deny(
                    path,
                    None,
                    DenyReason::Unauthenticated,
                    GateStage::TokenExtracted,
                    detail.to_string(),
                );
            }
        };

        if let Err(err) = self.evaluator.authorize(&principal, policy) {
            return self.deny(
                path,
                Some(&principal),
                DenyReason::Unauthorized,
                GateStage::Verified,
                err.message,
            );
        }

        debug!(
            path,
            actor = %anonymize_actor(&principal.id),
            policy = %policy.pattern,
            "Gate allowed request"
        );
        GateDecision::Allow(principal)
    }

    fn deny(
        &self,
        path: &str,
        principal: Option<&Principal>,
        reason: DenyReason,
        stage: GateStage,
        detail: String,
    ) -> GateDecision {
        let actor = principal
            .map(|p| anonymize_actor(&p.id))
            .unwrap_or_else(|| "anonymous".to_string());
        warn!(
            path,
            actor = %actor,
            at = %Utc::now().to_rfc3339(),
            reason = %reason,
            stage = ?stage,
            detail = %detail,
            "Gate denied request"
        );
        GateDecision::Deny(Denial {
            reason,
            stage,
            detail,
        })
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively; an empty token is rejected.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    let value = header?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}

/// Stable, non-reversible actor label for logs.
pub fn anonymize_actor(id: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(id.as_bytes()));
    format!("actor:{}", &digest[..12])
}
