//! Password hashing and verification using Argon2id.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::auth::error::AuthError;

/// Hashes a plaintext password into a PHC-format string.
///
/// # Errors
///
/// Returns [`AuthError::Crypto`] when hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Crypto(format!("hash error: {err}")))
}

/// Verifies a plaintext password against a PHC-format hash.
///
/// Returns `Ok(true)` on match and `Ok(false)` on mismatch.
///
/// # Errors
///
/// Returns [`AuthError::Crypto`] when the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|err| AuthError::Crypto(format!("invalid hash format: {err}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(AuthError::Crypto(format!("verify error: {err}"))),
    }
}
