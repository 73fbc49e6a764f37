//! Token signature and expiry verification.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use gatehouse_core::config::AuthConfig;
use gatehouse_core::types::Principal;

use super::claims::Claims;
use super::error::TokenError;

/// Verifies tokens and recovers the embedded principal.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies `token` and returns the principal snapshot it carries.
    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        self.decode_claims(token).map(Claims::into_principal)
    }

    /// Verifies `token` and returns its raw claims.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::InvalidSignature,
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use gatehouse_core::types::{Permission, Role};

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    fn principal() -> Principal {
        Principal {
            id: "u-42".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            role: Role::User,
            permissions: vec![Permission::from("read:posts")],
            active: true,
        }
    }

    #[test]
    fn test_verify_returns_issued_principal() {
        let cfg = config("secret-one");
        let issued = JwtEncoder::new(&cfg).issue(&principal()).unwrap();
        let verified = JwtDecoder::new(&cfg).verify(&issued.token).unwrap();
        assert_eq!(verified, principal());
    }

    #[test]
    fn test_default_lifetime_is_one_day() {
        let cfg = config("secret-one");
        let issued = JwtEncoder::new(&cfg).issue(&principal()).unwrap();
        let claims = JwtDecoder::new(&cfg).decode_claims(&issued.token).unwrap();
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let cfg = config("secret-one");
        let issued_at = Utc::now() - Duration::hours(25);
        let issued = JwtEncoder::new(&cfg)
            .issue_at(&principal(), issued_at)
            .unwrap();
        assert_eq!(
            JwtDecoder::new(&cfg).verify(&issued.token),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_token_just_past_expiry_is_rejected() {
        let cfg = config("secret-one");
        let issued_at = Utc::now() - Duration::hours(24) - Duration::seconds(2);
        let issued = JwtEncoder::new(&cfg)
            .issue_at(&principal(), issued_at)
            .unwrap();
        assert_eq!(
            JwtDecoder::new(&cfg).verify(&issued.token),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let issued = JwtEncoder::new(&config("secret-one"))
            .issue(&principal())
            .unwrap();
        assert_eq!(
            JwtDecoder::new(&config("secret-two")).verify(&issued.token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_payload_is_invalid_signature() {
        let cfg = config("secret-one");
        let issued = JwtEncoder::new(&cfg).issue(&principal()).unwrap();

        let mut parts: Vec<String> = issued.token.split('.').map(String::from).collect();
        let mut admin = principal();
        admin.role = Role::Admin;
        let forged = JwtEncoder::new(&config("attacker"))
            .issue(&admin)
            .unwrap();
        parts[1] = forged.token.split('.').nth(1).unwrap().to_string();

        assert_eq!(
            JwtDecoder::new(&cfg).verify(&parts.join(".")),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_invalid_signature() {
        let decoder = JwtDecoder::new(&config("secret-one"));
        assert_eq!(
            decoder.verify("not-a-token"),
            Err(TokenError::InvalidSignature)
        );
        assert_eq!(decoder.verify(""), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_inactive_principal_gets_no_token() {
        let mut inactive = principal();
        inactive.active = false;
        assert!(JwtEncoder::new(&config("secret-one")).issue(&inactive).is_err());
    }
}
