//! HS256 bearer-token issuance and validation.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::auth::{config::AuthConfig, error::AuthError};
use crate::user::domain::{UserId, UserRole};

/// JWT claims embedded in every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject: the user identifier.
    pub sub: String,
    /// Role of the user when the token was issued.
    pub rol: UserRole,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Returns the user identifier carried by the token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenInvalid`] when the subject is not a UUID.
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub
            .parse()
            .map_err(|_| AuthError::TokenInvalid(format!("malformed subject '{}'", self.sub)))
    }
}

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("jwt_issuer", &self.config.jwt_issuer)
            .field("token_lifetime_secs", &self.config.token_lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates an issuer from authentication configuration.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Returns the configuration the issuer was built from.
    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Issues a signed token for the user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Crypto`] when signing fails.
    pub fn issue(
        &self,
        user_id: UserId,
        role: UserRole,
        clock: &impl Clock,
    ) -> Result<String, AuthError> {
        let now = clock.utc().timestamp();
        let lifetime = i64::try_from(self.config.token_lifetime_secs).unwrap_or(i64::MAX);
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            rol: role,
            iss: self.config.jwt_issuer.clone(),
            iat: now,
            exp: now.saturating_add(lifetime),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::Crypto(format!("JWT encode: {err}")))
    }

    /// Verifies signature, expiry and issuer, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExpired`] for expired tokens and
    /// [`AuthError::TokenInvalid`] for any other validation failure.
    pub fn validate(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.jwt_issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid(err.to_string()),
            })
    }

    /// Extracts and validates the token from an `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingToken`] when no token follows the scheme,
    /// [`AuthError::InvalidScheme`] for non-`Bearer` schemes, and the errors
    /// of [`TokenIssuer::validate`].
    pub fn validate_header(&self, header_value: &str) -> Result<AccessTokenClaims, AuthError> {
        let mut parts = header_value.trim().splitn(2, ' ');
        let scheme = parts.next().ok_or(AuthError::MissingToken)?;
        let token = parts
            .next()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::InvalidScheme);
        }

        self.validate(token)
    }
}
