//! Account role and status enumerations.

use super::{ParseUserRoleError, ParseUserStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role that decides which task operations a user may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Platform administrator.
    #[serde(rename = "administrador")]
    Administrator,
    /// Creates tasks and fully controls the tasks it created.
    #[serde(rename = "TeamLeader")]
    TeamLeader,
    /// Executes assigned tasks and may only advance their status.
    #[serde(rename = "colaborador")]
    Collaborator,
}

impl UserRole {
    /// All roles in display order.
    pub const ALL: [Self; 3] = [Self::Administrator, Self::TeamLeader, Self::Collaborator];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "administrador",
            Self::TeamLeader => "TeamLeader",
            Self::Collaborator => "colaborador",
        }
    }

    /// Parses a role, falling back to [`UserRole::Collaborator`] for missing
    /// or unrecognised values.
    #[must_use]
    pub fn or_collaborator(value: Option<&str>) -> Self {
        value
            .and_then(|raw| Self::try_from(raw).ok())
            .unwrap_or(Self::Collaborator)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "administrador" => Ok(Self::Administrator),
            "teamleader" => Ok(Self::TeamLeader),
            "colaborador" => Ok(Self::Collaborator),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

/// Whether an account may sign in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    /// The account may sign in.
    #[default]
    #[serde(rename = "activo")]
    Active,
    /// The account is disabled.
    #[serde(rename = "inactivo")]
    Inactive,
}

impl UserStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "activo",
            Self::Inactive => "inactivo",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserStatus {
    type Error = ParseUserStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "activo" => Ok(Self::Active),
            "inactivo" => Ok(Self::Inactive),
            _ => Err(ParseUserStatusError(value.to_owned())),
        }
    }
}
