//! Organizational areas shared by users and tasks.

use super::ParseAreaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Business area a user belongs to or a task is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    /// Administration.
    #[serde(rename = "administrativa")]
    Administrative,
    /// Accounting.
    #[serde(rename = "contabilidad")]
    Accounting,
    /// Operations.
    #[serde(rename = "operativo")]
    Operations,
    /// Human resources.
    #[serde(rename = "recursos humanos")]
    HumanResources,
    /// People management.
    #[serde(rename = "gestion humana")]
    PeopleManagement,
    /// Technology.
    #[serde(rename = "tecnologia")]
    Technology,
}

impl Area {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrative => "administrativa",
            Self::Accounting => "contabilidad",
            Self::Operations => "operativo",
            Self::HumanResources => "recursos humanos",
            Self::PeopleManagement => "gestion humana",
            Self::Technology => "tecnologia",
        }
    }

    /// Parses an area, falling back to [`Area::Administrative`] for missing
    /// or unrecognised values.
    #[must_use]
    pub fn or_administrative(value: Option<&str>) -> Self {
        value
            .and_then(|raw| Self::try_from(raw).ok())
            .unwrap_or(Self::Administrative)
    }

    /// Returns the storage value with its first letter capitalised, as shown
    /// in reports.
    #[must_use]
    pub fn display_label(self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Area {
    type Error = ParseAreaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "administrativa" => Ok(Self::Administrative),
            "contabilidad" => Ok(Self::Accounting),
            "operativo" => Ok(Self::Operations),
            "recursos humanos" => Ok(Self::HumanResources),
            "gestion humana" => Ok(Self::PeopleManagement),
            "tecnologia" => Ok(Self::Technology),
            _ => Err(ParseAreaError(value.to_owned())),
        }
    }
}
