//! Password hashing for principal records.

use clap::Args;

use gatehouse_auth::password::PasswordHasher;
use gatehouse_core::error::AppError;

/// Arguments for the hash-password command
#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// Plain-text password
    pub password: String,
}

/// Prints the Argon2 hash to paste into `[[principals]] password_hash`.
pub fn execute(args: &HashPasswordArgs) -> Result<(), AppError> {
    let hash = PasswordHasher::new().hash_password(&args.password)?;
    println!("{hash}");
    Ok(())
}
