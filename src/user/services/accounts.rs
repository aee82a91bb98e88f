//! Service layer for registration, sign-in and account administration.

use crate::auth::{AuthError, TokenIssuer, password};
use crate::user::{
    domain::{
        Area, DocumentType, Email, User, UserChanges, UserDomainError, UserId, UserProfile,
        UserRole, UserStatus,
    },
    ports::{UserFilter, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for registering a new account.
///
/// Optional fields that fail to parse fall back to defaults: the role to
/// collaborator and the area to administrative. An unrecognised document
/// type is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
    document_type: Option<String>,
    document_number: Option<String>,
    organization: Option<String>,
    area: Option<String>,
}

impl RegisterUserRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
            organization: Some(organization.into()),
            ..Self::default()
        }
    }

    /// Builds a request from possibly-missing wire fields.
    #[must_use]
    pub fn from_parts(
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
        organization: Option<String>,
    ) -> Self {
        Self {
            name,
            email,
            password,
            organization,
            ..Self::default()
        }
    }

    /// Sets the requested role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the identity document kind.
    #[must_use]
    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }

    /// Sets the identity document number.
    #[must_use]
    pub fn with_document_number(mut self, document_number: impl Into<String>) -> Self {
        self.document_number = Some(document_number.into());
        self
    }

    /// Sets the business area.
    #[must_use]
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }
}

/// Partial account update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New login email.
    pub email: Option<String>,
    /// New document kind.
    pub document_type: Option<String>,
    /// New document number; `Some(None)` clears it.
    pub document_number: Option<Option<String>>,
    /// New role.
    pub role: Option<String>,
    /// New organization.
    pub organization: Option<String>,
    /// New account status.
    pub status: Option<String>,
    /// New business area.
    pub area: Option<String>,
}

/// An account together with a freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    /// The signed-in account.
    pub user: User,
    /// Bearer token for subsequent requests.
    pub token: String,
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum UserAccountError {
    /// A required field is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The email is already registered.
    #[error("email already registered: {0}")]
    EmailTaken(Email),
    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// The account is inactive.
    #[error("account is inactive")]
    AccountInactive,
    /// The user does not exist.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// The user is still referenced by tasks.
    #[error("user {0} is referenced by existing tasks")]
    InUse(UserId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Hashing or token signing failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(UserRepositoryError),
}

impl From<UserRepositoryError> for UserAccountError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateEmail(email) => Self::EmailTaken(email),
            UserRepositoryError::NotFound(id) => Self::NotFound(id),
            UserRepositoryError::InUse(id) => Self::InUse(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for account service operations.
pub type UserAccountResult<T> = Result<T, UserAccountError>;

/// Account registration, authentication and administration service.
pub struct UserAccountService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    tokens: TokenIssuer,
    clock: Arc<C>,
}

impl<R, C> Clone for UserAccountService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            tokens: self.tokens.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> UserAccountService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, tokens: TokenIssuer, clock: Arc<C>) -> Self {
        Self {
            repository,
            tokens,
            clock,
        }
    }

    /// Returns the token issuer used to sign sessions.
    #[must_use]
    pub const fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Registers a new active account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::InvalidInput`] when name, email, password
    /// or organization is missing or the password is too short, and
    /// [`UserAccountError::EmailTaken`] when the email is registered.
    pub async fn register(
        &self,
        request: RegisterUserRequest,
    ) -> UserAccountResult<AuthenticatedSession> {
        let RegisterUserRequest {
            name,
            email,
            password,
            role,
            document_type,
            document_number,
            organization,
            area,
        } = request;

        let (Some(name), Some(raw_email), Some(password), Some(organization)) = (
            name.and_then(present),
            email.and_then(present),
            password.filter(|value| !value.is_empty()),
            organization.and_then(present),
        ) else {
            return Err(UserAccountError::InvalidInput(
                "name, email, password and organization are required".to_owned(),
            ));
        };

        let min_length = self.tokens.config().min_password_length;
        if password.chars().count() < min_length {
            return Err(UserAccountError::InvalidInput(format!(
                "password must be at least {min_length} characters"
            )));
        }

        let email = Email::new(raw_email)
            .map_err(|err| UserAccountError::InvalidInput(err.to_string()))?;
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserAccountError::EmailTaken(email));
        }

        let profile = UserProfile {
            name,
            email,
            role: UserRole::or_collaborator(role.as_deref()),
            document_type: document_type
                .as_deref()
                .and_then(|raw| DocumentType::try_from(raw).ok()),
            document_number,
            organization,
            area: Some(Area::or_administrative(area.as_deref())),
        };

        let password_hash = password::hash_password(&password)?;
        let user = User::register(profile, password_hash, &*self.clock)?;
        self.repository.store(&user).await?;
        info!(user_id = %user.id(), role = %user.role(), "registered user");

        let token = self.tokens.issue(user.id(), user.role(), &*self.clock)?;
        Ok(AuthenticatedSession { user, token })
    }

    /// Verifies credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::InvalidInput`] when either field is
    /// missing, [`UserAccountError::InvalidCredentials`] for an unknown email
    /// or wrong password, and [`UserAccountError::AccountInactive`] for
    /// disabled accounts.
    pub async fn login(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> UserAccountResult<AuthenticatedSession> {
        let (Some(raw_email), Some(password)) = (
            email.and_then(present),
            password.filter(|value| !value.is_empty()),
        ) else {
            return Err(UserAccountError::InvalidInput(
                "email and password are required".to_owned(),
            ));
        };

        let Ok(email) = Email::new(raw_email) else {
            return Err(UserAccountError::InvalidCredentials);
        };
        let Some(user) = self.repository.find_by_email(&email).await? else {
            warn!("sign-in attempt for unknown email");
            return Err(UserAccountError::InvalidCredentials);
        };

        if !password::verify_password(&password, user.password_hash())? {
            warn!(user_id = %user.id(), "sign-in attempt with wrong password");
            return Err(UserAccountError::InvalidCredentials);
        }
        if !user.is_active() {
            return Err(UserAccountError::AccountInactive);
        }

        let token = self.tokens.issue(user.id(), user.role(), &*self.clock)?;
        Ok(AuthenticatedSession { user, token })
    }

    /// Fetches one account.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::NotFound`] when the user does not exist.
    pub async fn get(&self, id: UserId) -> UserAccountResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserAccountError::NotFound(id))
    }

    /// Lists every account, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::Repository`] when the lookup fails.
    pub async fn list(&self) -> UserAccountResult<Vec<User>> {
        Ok(self.repository.find(&UserFilter::all()).await?)
    }

    /// Lists the given accounts, or every account when `ids` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::Repository`] when the lookup fails.
    pub async fn list_by_ids(&self, ids: Vec<UserId>) -> UserAccountResult<Vec<User>> {
        let filter = if ids.is_empty() {
            UserFilter::all()
        } else {
            UserFilter::all().with_ids(ids)
        };
        Ok(self.repository.find(&filter).await?)
    }

    /// Lists the collaborators of an organization sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::InvalidInput`] when the organization is
    /// missing.
    pub async fn collaborators(&self, organization: Option<String>) -> UserAccountResult<Vec<User>> {
        let Some(organization) = organization.and_then(present) else {
            return Err(UserAccountError::InvalidInput(
                "organization is required".to_owned(),
            ));
        };

        let filter = UserFilter::all()
            .with_role(UserRole::Collaborator)
            .with_organization(organization);
        let mut users = self.repository.find(&filter).await?;
        users.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(users)
    }

    /// Applies a partial update to an account.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::NotFound`] when the user does not exist,
    /// [`UserAccountError::EmailTaken`] when the new email belongs to another
    /// account and [`UserAccountError::InvalidInput`] for unparsable values.
    pub async fn update(&self, id: UserId, request: UpdateUserRequest) -> UserAccountResult<User> {
        let mut user = self.get(id).await?;
        let changes = parse_changes(request)?;

        if let Some(email) = changes.email.as_ref().filter(|email| *email != user.email()) {
            if self.repository.find_by_email(email).await?.is_some() {
                return Err(UserAccountError::EmailTaken(email.clone()));
            }
        }

        user.apply(changes)?;
        self.repository.update(&user).await?;
        info!(user_id = %id, "updated user");
        Ok(user)
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::NotFound`] when the user does not exist and
    /// [`UserAccountError::InUse`] when tasks still reference it.
    pub async fn delete(&self, id: UserId) -> UserAccountResult<()> {
        self.repository.delete(id).await?;
        info!(user_id = %id, "deleted user");
        Ok(())
    }
}

fn parse_changes(request: UpdateUserRequest) -> UserAccountResult<UserChanges> {
    Ok(UserChanges {
        name: request.name,
        email: request
            .email
            .and_then(present)
            .map(Email::new)
            .transpose()
            .map_err(invalid_input)?,
        document_type: request
            .document_type
            .and_then(present)
            .map(|raw| DocumentType::try_from(raw.as_str()))
            .transpose()
            .map_err(invalid_input)?,
        document_number: request.document_number,
        role: request
            .role
            .and_then(present)
            .map(|raw| UserRole::try_from(raw.as_str()))
            .transpose()
            .map_err(invalid_input)?,
        organization: request.organization,
        status: request
            .status
            .and_then(present)
            .map(|raw| UserStatus::try_from(raw.as_str()))
            .transpose()
            .map_err(invalid_input)?,
        area: request
            .area
            .and_then(present)
            .map(|raw| Area::try_from(raw.as_str()))
            .transpose()
            .map_err(invalid_input)?,
    })
}

fn invalid_input(err: impl std::fmt::Display) -> UserAccountError {
    UserAccountError::InvalidInput(err.to_string())
}

fn present(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
