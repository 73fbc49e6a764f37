//! # gatehouse-api
//!
//! HTTP layer for Gatehouse built on Axum.
//!
//! Provides the gate, rate-limit, security-header, logging and CORS
//! middleware, the sign-in and administrative endpoints, landing pages for
//! redirect targets, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
