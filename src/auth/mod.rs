//! Credential verification and bearer-token issuance.
//!
//! Passwords are hashed with Argon2id; tokens are HS256 JWTs carrying the
//! user identifier and role.

pub mod config;
pub mod error;
pub mod password;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use token::{AccessTokenClaims, TokenIssuer};
