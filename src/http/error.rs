//! HTTP error mapping.

use crate::auth::AuthError;
use crate::report::services::ReportError;
use crate::task::services::TaskLifecycleError;
use crate::user::services::UserAccountError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by request handlers, rendered as `{ "message": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or incomplete request (400).
    #[error("{0}")]
    BadRequest(String),
    /// Missing or invalid credentials (401).
    #[error("{0}")]
    Unauthorized(String),
    /// The caller may not perform the operation (403).
    #[error("{0}")]
    Forbidden(String),
    /// The target does not exist (404).
    #[error("{0}")]
    NotFound(String),
    /// The target is still referenced elsewhere (409).
    #[error("{0}")]
    Conflict(String),
    /// Unexpected failure (500). The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wraps an unexpected failure.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Internal(detail) => {
                error!(error = %detail, "request failed");
                "Error en el servidor".to_owned()
            }
            Self::BadRequest(message)
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => message,
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Crypto(_) => Self::internal(err),
            AuthError::MissingToken
            | AuthError::InvalidScheme
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => {
                warn!(error = %err, "rejected bearer token");
                Self::Unauthorized(err.to_string())
            }
        }
    }
}

impl From<UserAccountError> for ApiError {
    fn from(err: UserAccountError) -> Self {
        match err {
            UserAccountError::InvalidInput(_)
            | UserAccountError::EmailTaken(_)
            | UserAccountError::Domain(_) => Self::BadRequest(err.to_string()),
            UserAccountError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            UserAccountError::AccountInactive => Self::Forbidden(err.to_string()),
            UserAccountError::NotFound(_) => Self::NotFound(err.to_string()),
            UserAccountError::InUse(_) => Self::Conflict(err.to_string()),
            UserAccountError::Auth(auth) => auth.into(),
            UserAccountError::Repository(_) => Self::internal(err),
        }
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::InvalidInput(_) | TaskLifecycleError::Conflict(_) => {
                Self::BadRequest(err.to_string())
            }
            TaskLifecycleError::Forbidden(_) | TaskLifecycleError::InvalidTransition(_) => {
                Self::Forbidden(err.to_string())
            }
            TaskLifecycleError::NotFound(_) => Self::NotFound(err.to_string()),
            TaskLifecycleError::Repository(_) | TaskLifecycleError::UserRepository(_) => {
                Self::internal(err)
            }
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidInput(_) => Self::BadRequest(err.to_string()),
            ReportError::Tasks(inner) => inner.into(),
            ReportError::Users(_) | ReportError::Render(_) => Self::internal(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
