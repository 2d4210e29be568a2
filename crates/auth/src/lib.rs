//! Authentication for the resource planner.
//!
//! This crate provides:
//! - JWT access token generation and validation, with a role claim
//! - Salted password hashing and verification

mod error;
mod jwt;
mod password;

pub use error::*;
pub use jwt::*;
pub use password::*;

/// Default JWT expiration time in hours.
pub const DEFAULT_JWT_EXPIRATION_HOURS: u64 = 24;

/// Default JWT issuer.
pub const DEFAULT_JWT_ISSUER: &str = "resource-planner";
