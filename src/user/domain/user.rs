//! User aggregate root.

use super::ids::check_len;
use super::{
    Area, DocumentType, Email, MAX_DOCUMENT_NUMBER_LEN, MAX_TEXT_LEN, UserDomainError, UserId,
    UserRole, UserStatus,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated profile fields for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: Email,
    /// Assigned role.
    pub role: UserRole,
    /// Identity document kind, if any.
    pub document_type: Option<DocumentType>,
    /// Identity document number, if any.
    pub document_number: Option<String>,
    /// Owning organization.
    pub organization: String,
    /// Business area, if any.
    pub area: Option<Area>,
}

/// Partial set of profile changes applied by an update.
///
/// `None` leaves the field untouched. The nested option on
/// `document_number` allows clearing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// New display name.
    pub name: Option<String>,
    /// New login email.
    pub email: Option<Email>,
    /// New document kind.
    pub document_type: Option<DocumentType>,
    /// New document number; `Some(None)` clears it.
    pub document_number: Option<Option<String>>,
    /// New role.
    pub role: Option<UserRole>,
    /// New organization.
    pub organization: Option<String>,
    /// New account status.
    pub status: Option<UserStatus>,
    /// New business area.
    pub area: Option<Area>,
}

/// User account aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    password_hash: String,
    role: UserRole,
    document_type: Option<DocumentType>,
    document_number: Option<String>,
    organization: String,
    area: Option<Area>,
    status: UserStatus,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display name.
    pub name: String,
    /// Persisted login email.
    pub email: Email,
    /// Persisted password hash.
    pub password_hash: String,
    /// Persisted role.
    pub role: UserRole,
    /// Persisted document kind.
    pub document_type: Option<DocumentType>,
    /// Persisted document number.
    pub document_number: Option<String>,
    /// Persisted organization.
    pub organization: String,
    /// Persisted business area.
    pub area: Option<Area>,
    /// Persisted account status.
    pub status: UserStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active account.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] or
    /// [`UserDomainError::EmptyOrganization`] when a required text field is
    /// blank and [`UserDomainError::TooLong`] when a field exceeds its width.
    pub fn register(
        profile: UserProfile,
        password_hash: String,
        clock: &impl Clock,
    ) -> Result<Self, UserDomainError> {
        let name = non_blank(profile.name).ok_or(UserDomainError::EmptyName)?;
        let organization =
            non_blank(profile.organization).ok_or(UserDomainError::EmptyOrganization)?;
        let document_number = profile.document_number.and_then(non_blank);
        check_len("name", &name, MAX_TEXT_LEN)?;
        check_len("organizacion", &organization, MAX_TEXT_LEN)?;
        if let Some(number) = document_number.as_deref() {
            check_len("numeroDocumento", number, MAX_DOCUMENT_NUMBER_LEN)?;
        }

        Ok(Self {
            id: UserId::new(),
            name,
            email: profile.email,
            password_hash,
            role: profile.role,
            document_type: profile.document_type,
            document_number,
            organization,
            area: profile.area,
            status: UserStatus::Active,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            document_type: data.document_type,
            document_number: data.document_number,
            organization: data.organization,
            area: data.area,
            status: data.status,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the login email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the document kind, if any.
    #[must_use]
    pub const fn document_type(&self) -> Option<DocumentType> {
        self.document_type
    }

    /// Returns the document number, if any.
    #[must_use]
    pub fn document_number(&self) -> Option<&str> {
        self.document_number.as_deref()
    }

    /// Returns the organization.
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Returns the business area, if any.
    #[must_use]
    pub const fn area(&self) -> Option<Area> {
        self.area
    }

    /// Returns the account status.
    #[must_use]
    pub const fn status(&self) -> UserStatus {
        self.status
    }

    /// Returns `true` when the account may sign in.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies a partial profile update.
    ///
    /// Blank names and organizations are ignored rather than stored.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::TooLong`] when a new value exceeds its
    /// width. The account is left untouched in that case.
    pub fn apply(&mut self, changes: UserChanges) -> Result<(), UserDomainError> {
        let name = changes.name.and_then(non_blank);
        let organization = changes.organization.and_then(non_blank);
        let document_number = changes
            .document_number
            .map(|number| number.and_then(non_blank));
        if let Some(value) = name.as_deref() {
            check_len("name", value, MAX_TEXT_LEN)?;
        }
        if let Some(value) = organization.as_deref() {
            check_len("organizacion", value, MAX_TEXT_LEN)?;
        }
        if let Some(Some(value)) = document_number.as_ref() {
            check_len("numeroDocumento", value, MAX_DOCUMENT_NUMBER_LEN)?;
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(document_type) = changes.document_type {
            self.document_type = Some(document_type);
        }
        if let Some(document_number) = document_number {
            self.document_number = document_number;
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        if let Some(organization) = organization {
            self.organization = organization;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(area) = changes.area {
            self.area = Some(area);
        }
        Ok(())
    }

    /// Returns the public summary embedded in task views.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            document_number: self.document_number.clone(),
        }
    }
}

/// Identity details of a user as shown next to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: Email,
    /// Document number, if registered.
    pub document_number: Option<String>,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
