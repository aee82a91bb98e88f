//! Authentication error types.

use thiserror::Error;

/// Errors raised while hashing credentials or handling tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token was supplied.
    #[error("missing authorization token")]
    MissingToken,

    /// The authorization header does not use the `Bearer` scheme.
    #[error("invalid authorization scheme")]
    InvalidScheme,

    /// The token has expired.
    #[error("token has expired")]
    TokenExpired,

    /// The token failed signature, issuer or claim validation.
    #[error("invalid token: {0}")]
    TokenInvalid(String),

    /// Hashing or signing failed.
    #[error("cryptography error: {0}")]
    Crypto(String),
}
