//! Token issue and verify commands.

use clap::Args;

use gatehouse_auth::jwt::{JwtDecoder, JwtEncoder, TokenError};
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the issue-token command
#[derive(Debug, Args)]
pub struct IssueTokenArgs {
    /// Principal id from the `principals` table
    #[arg(long)]
    pub id: String,
}

/// Arguments for the verify-token command
#[derive(Debug, Args)]
pub struct VerifyTokenArgs {
    /// The token to check
    pub token: String,
}

/// Issues a token without a password check, for operators.
pub fn issue(args: &IssueTokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let record = config
        .principals
        .iter()
        .find(|p| p.id == args.id)
        .ok_or_else(|| AppError::not_found(format!("Principal '{}' not found", args.id)))?;

    let issued = JwtEncoder::new(&config.auth).issue(&record.to_principal())?;

    match format {
        OutputFormat::Json => output::print_item(
            &serde_json::json!({ "token": issued.token, "expires_at": issued.expires_at }),
            format,
        ),
        OutputFormat::Table => {
            println!("{}", issued.token);
            output::print_kv("Expires", &issued.expires_at.to_rfc3339());
        }
    }
    Ok(())
}

/// Verifies signature and expiry and prints the embedded principal.
pub fn verify(args: &VerifyTokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let decoder = JwtDecoder::new(&config.auth);
    match decoder.decode_claims(&args.token) {
        Ok(claims) => {
            output::print_success("Token is valid");
            output::print_kv("Expires", &claims.expires_at().to_rfc3339());
            output::print_kv("Remaining", &format!("{}s", claims.remaining_ttl_seconds()));
            output::print_item(&claims.into_principal(), format);
            Ok(())
        }
        Err(TokenError::Expired) => Err(AppError::authentication("Token has expired")),
        Err(e) => Err(AppError::authentication(format!("Token rejected: {e}"))),
    }
}
