//! Authentication configuration.

/// Seven days, the default bearer-token lifetime.
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 7 * 24 * 60 * 60;

/// Configuration for password policy and token signing.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HMAC secret used to sign and verify tokens.
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub token_lifetime_secs: u64,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Minimum accepted password length.
    pub min_password_length: usize,
}

impl AuthConfig {
    /// Creates a configuration with the given secret and default policy.
    #[must_use]
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Self::default()
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            jwt_issuer: "flowment".into(),
            min_password_length: 8,
        }
    }
}
