//! Reopen requests raised by an assignee against a finalized task.

use super::ParseReopenStatusError;
use crate::user::domain::UserId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolution state of a reopen request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReopenStatus {
    /// Waiting for the creator's answer.
    #[serde(rename = "pendiente")]
    Pending,
    /// The creator reopened the task.
    #[serde(rename = "aprobada")]
    Approved,
    /// The creator kept the task finalized.
    #[serde(rename = "rechazada")]
    Rejected,
}

impl ReopenStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Approved => "aprobada",
            Self::Rejected => "rechazada",
        }
    }
}

impl fmt::Display for ReopenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReopenStatus {
    type Error = ParseReopenStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pendiente" => Ok(Self::Pending),
            "aprobada" => Ok(Self::Approved),
            "rechazada" => Ok(Self::Rejected),
            _ => Err(ParseReopenStatusError(value.to_owned())),
        }
    }
}

/// Appeal to unlock a finalized task.
///
/// Serialized as
/// `{ motivo, solicitadoPor, fechaSolicitud, estado, respondidoPor?, fechaRespuesta?, razon? }`
/// both on the wire and in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReopenRequest {
    #[serde(rename = "motivo")]
    reason: String,
    #[serde(rename = "solicitadoPor")]
    requested_by: UserId,
    #[serde(rename = "fechaSolicitud")]
    requested_at: DateTime<Utc>,
    #[serde(rename = "estado")]
    status: ReopenStatus,
    #[serde(
        rename = "respondidoPor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    responded_by: Option<UserId>,
    #[serde(
        rename = "fechaRespuesta",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    responded_at: Option<DateTime<Utc>>,
    #[serde(rename = "razon", default, skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<String>,
}

impl ReopenRequest {
    /// Creates a pending request.
    #[must_use]
    pub const fn pending(reason: String, requested_by: UserId, requested_at: DateTime<Utc>) -> Self {
        Self {
            reason,
            requested_by,
            requested_at,
            status: ReopenStatus::Pending,
            responded_by: None,
            responded_at: None,
            rejection_reason: None,
        }
    }

    /// Returns the reason given by the requester.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns who asked for the reopening.
    #[must_use]
    pub const fn requested_by(&self) -> UserId {
        self.requested_by
    }

    /// Returns when the request was raised.
    #[must_use]
    pub const fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    /// Returns the resolution state.
    #[must_use]
    pub const fn status(&self) -> ReopenStatus {
        self.status
    }

    /// Returns `true` while the request awaits an answer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ReopenStatus::Pending
    }

    /// Returns who answered, once resolved.
    #[must_use]
    pub const fn responded_by(&self) -> Option<UserId> {
        self.responded_by
    }

    /// Returns when the request was answered, once resolved.
    #[must_use]
    pub const fn responded_at(&self) -> Option<DateTime<Utc>> {
        self.responded_at
    }

    /// Returns the rejection reason, if one was given.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub(crate) fn resolve(
        &mut self,
        status: ReopenStatus,
        responder: UserId,
        at: DateTime<Utc>,
        rejection_reason: Option<String>,
    ) {
        self.status = status;
        self.responded_by = Some(responder);
        self.responded_at = Some(at);
        self.rejection_reason = rejection_reason;
    }
}

/// Creator's answer to a pending reopen request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReopenDecision {
    /// Reopen the task, optionally moving its due date and time.
    Approve {
        /// Replacement due date.
        due_on: Option<NaiveDate>,
        /// Replacement due time.
        due_at: Option<NaiveTime>,
    },
    /// Keep the task finalized.
    Reject {
        /// Explanation shown to the requester.
        reason: Option<String>,
    },
}

impl ReopenDecision {
    /// Returns `true` for approvals.
    #[must_use]
    pub const fn is_approval(&self) -> bool {
        matches!(self, Self::Approve { .. })
    }
}
