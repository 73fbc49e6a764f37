//! Argon2id password hashing for directory credentials.

pub mod hasher;

pub use hasher::PasswordHasher;
