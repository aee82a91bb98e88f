//! Identity document types.

use super::ParseDocumentTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of identity document registered for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Citizenship card.
    #[serde(rename = "CC")]
    CitizenshipCard,
    /// Identity card for minors.
    #[serde(rename = "TI")]
    IdentityCard,
    /// Foreigner identity card.
    #[serde(rename = "CE")]
    ForeignerCard,
    /// Passport.
    #[serde(rename = "PASAPORTE")]
    Passport,
    /// Temporary protection permit.
    #[serde(rename = "PPT")]
    ProtectionPermit,
    /// Tax identification number.
    #[serde(rename = "NIT")]
    TaxId,
    /// Any other document.
    #[serde(rename = "OTRO")]
    Other,
}

impl DocumentType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CitizenshipCard => "CC",
            Self::IdentityCard => "TI",
            Self::ForeignerCard => "CE",
            Self::Passport => "PASAPORTE",
            Self::ProtectionPermit => "PPT",
            Self::TaxId => "NIT",
            Self::Other => "OTRO",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts both the storage codes and the long-form names sent by clients
/// (`cedula`, `tarjeta`, `cedula extranjeria`, ...).
impl TryFrom<&str> for DocumentType {
    type Error = ParseDocumentTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "cc" | "cedula" => Ok(Self::CitizenshipCard),
            "ti" | "tarjeta" => Ok(Self::IdentityCard),
            "ce" | "cedula extranjeria" => Ok(Self::ForeignerCard),
            "pasaporte" => Ok(Self::Passport),
            "ppt" => Ok(Self::ProtectionPermit),
            "nit" => Ok(Self::TaxId),
            "otro" => Ok(Self::Other),
            _ => Err(ParseDocumentTypeError(value.to_owned())),
        }
    }
}
