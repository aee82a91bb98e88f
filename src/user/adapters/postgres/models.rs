//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Normalized login email.
    pub email: String,
    /// Argon2 PHC password hash.
    pub password_hash: String,
    /// Account role.
    pub role: String,
    /// Identity document kind.
    pub document_type: Option<String>,
    /// Identity document number.
    pub document_number: Option<String>,
    /// Owning organization.
    pub organization: String,
    /// Business area.
    pub area: Option<String>,
    /// Account status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Normalized login email.
    pub email: String,
    /// Argon2 PHC password hash.
    pub password_hash: String,
    /// Account role.
    pub role: String,
    /// Identity document kind.
    pub document_type: Option<String>,
    /// Identity document number.
    pub document_number: Option<String>,
    /// Owning organization.
    pub organization: String,
    /// Business area.
    pub area: Option<String>,
    /// Account status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Update model for mutable user columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct UserChangesetRow {
    /// Display name.
    pub name: String,
    /// Normalized login email.
    pub email: String,
    /// Account role.
    pub role: String,
    /// Identity document kind.
    pub document_type: Option<String>,
    /// Identity document number.
    pub document_number: Option<String>,
    /// Owning organization.
    pub organization: String,
    /// Business area.
    pub area: Option<String>,
    /// Account status.
    pub status: String,
}
