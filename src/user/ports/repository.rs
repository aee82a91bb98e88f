//! Repository port for user persistence and lookup.

use crate::user::domain::{Email, User, UserId, UserRole};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// Criteria for listing users. Unset criteria match every user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Restrict to users holding this role.
    pub role: Option<UserRole>,
    /// Restrict to users of this organization.
    pub organization: Option<String>,
    /// Restrict to these identifiers.
    pub ids: Option<Vec<UserId>>,
}

impl UserFilter {
    /// Returns a filter matching every user.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the filter to a role.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Restricts the filter to an organization.
    #[must_use]
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Restricts the filter to a set of identifiers.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IntoIterator<Item = UserId>) -> Self {
        self.ids = Some(ids.into_iter().collect());
        self
    }

    /// Returns `true` when the user satisfies every criterion.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        self.role.is_none_or(|role| user.role() == role)
            && self
                .organization
                .as_deref()
                .is_none_or(|organization| user.organization() == organization)
            && self
                .ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&user.id()))
    }
}

/// User persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier
    /// exists or [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already registered.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Persists changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist
    /// or [`UserRepositoryError::DuplicateEmail`] when the new email belongs
    /// to another account.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist
    /// or [`UserRepositoryError::InUse`] when stored tasks still reference
    /// the user.
    async fn delete(&self, id: UserId) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by normalized email.
    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>>;

    /// Lists users matching the filter, newest first.
    async fn find(&self, filter: &UserFilter) -> UserRepositoryResult<Vec<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// Another user already owns the email.
    #[error("email already registered: {0}")]
    DuplicateEmail(Email),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// The user is still referenced by tasks.
    #[error("user {0} is referenced by existing tasks")]
    InUse(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
