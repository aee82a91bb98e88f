//! Error types for user domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The organization is empty after trimming.
    #[error("organization must not be empty")]
    EmptyOrganization,

    /// A text field exceeds its stored column width.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Wire name of the offending field.
        field: &'static str,
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The identifier is not a valid UUID.
    #[error("invalid user identifier '{0}'")]
    InvalidUserId(String),
}

/// Error returned while parsing user roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);

/// Error returned while parsing user statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user status: {0}")]
pub struct ParseUserStatusError(pub String);

/// Error returned while parsing areas.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown area: {0}")]
pub struct ParseAreaError(pub String);

/// Error returned while parsing document types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown document type: {0}")]
pub struct ParseDocumentTypeError(pub String);
