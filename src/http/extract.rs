//! Request extractors.

use super::{error::ApiError, state::AppState};
use crate::auth::AuthError;
use crate::user::domain::UserId;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Caller identity taken from a validated bearer token.
///
/// Only the subject is kept. Services authorize against the stored role, so
/// the role claimed by the token carries no weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Caller's user identifier.
    pub id: UserId,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|err| AuthError::TokenInvalid(err.to_string()))?;

        let claims = state.tokens().validate_header(header)?;
        Ok(Self {
            id: claims.user_id()?,
        })
    }
}
