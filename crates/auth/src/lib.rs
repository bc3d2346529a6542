//! Authentication for calshare.
//!
//! This crate provides:
//! - Password hashing and verification (argon2)
//! - Bearer token issuing and verification (HS256 JWT)
//! - Axum extractors for authenticated and optional callers

mod config;
mod error;
mod extractors;
mod password;
mod state;
mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{CurrentUser, OptionalUser};
pub use password::{hash_password, verify_password};
pub use state::AuthState;
pub use token::{issue_token, verify_token, Claims};
