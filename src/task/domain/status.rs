//! Task status vocabulary and the assignee transition graph.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Assigned to a collaborator, work not started.
    #[serde(rename = "asignada")]
    Assigned,
    /// Work in progress.
    #[serde(rename = "en-proceso")]
    InProgress,
    /// Past its due date without being finalized.
    #[serde(rename = "atrasada")]
    Overdue,
    /// Finished by the assignee.
    #[serde(rename = "finalizada")]
    Finalized,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Assigned,
        Self::InProgress,
        Self::Overdue,
        Self::Finalized,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "asignada",
            Self::InProgress => "en-proceso",
            Self::Overdue => "atrasada",
            Self::Finalized => "finalizada",
        }
    }

    /// Returns `true` when the assignee may move a task from `self` to
    /// `target`.
    #[must_use]
    pub const fn assignee_may_advance_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Assigned | Self::Overdue, Self::InProgress)
                | (Self::Assigned | Self::InProgress | Self::Overdue, Self::Finalized)
        )
    }

    /// Returns `true` for statuses that still expect work.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Assigned | Self::InProgress)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "asignada" => Ok(Self::Assigned),
            "en-proceso" => Ok(Self::InProgress),
            "atrasada" => Ok(Self::Overdue),
            "finalizada" => Ok(Self::Finalized),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
