//! Token verification failures.

use thiserror::Error;

use gatehouse_core::error::AppError;

/// Why a token could not be issued or verified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Malformed, tampered, or signed with another secret.
    #[error("invalid token signature")]
    InvalidSignature,
    /// Past its expiry timestamp.
    #[error("token has expired")]
    Expired,
    /// Signing failed.
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            // Callers never learn which check failed.
            TokenError::InvalidSignature | TokenError::Expired => {
                AppError::authentication("Authentication required")
            }
            TokenError::Encoding(msg) => AppError::internal(msg),
        }
    }
}
