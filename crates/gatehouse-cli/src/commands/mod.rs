//! CLI command definitions and dispatch.

pub mod password;
pub mod route;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;

/// Gatehouse: JWT route gate and rate limiter
#[derive(Debug, Parser)]
#[command(name = "gatehouse", version, about, long_about = None)]
pub struct Cli {
    /// Path to the base configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay (`config/<env>.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Gatehouse server
    Serve(serve::ServeArgs),
    /// Hash a password for a principal record
    HashPassword(password::HashPasswordArgs),
    /// Issue a token for a configured principal
    IssueToken(token::IssueTokenArgs),
    /// Verify a token and print its principal
    VerifyToken(token::VerifyTokenArgs),
    /// Show which policy protects a path
    CheckRoute(route::CheckRouteArgs),
    /// List the route policy table
    Routes,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self.load_config()?).await,
            Commands::HashPassword(args) => password::execute(args),
            Commands::IssueToken(args) => token::issue(args, &self.load_config()?, self.format),
            Commands::VerifyToken(args) => token::verify(args, &self.load_config()?, self.format),
            Commands::CheckRoute(args) => route::check(args, &self.load_config()?, self.format),
            Commands::Routes => route::list(&self.load_config()?, self.format),
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config, &self.env)
    }
}
