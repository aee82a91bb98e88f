//! Summary counts printed below each exported sheet.

use crate::task::domain::{TaskStatus, TaskView};
use crate::user::domain::{User, UserRole, UserStatus};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeSet;

/// Totals for the user export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserTally {
    /// Number of exported users.
    pub total: usize,
    /// Users with status `activo`.
    pub active: usize,
    /// Users with status `inactivo`.
    pub inactive: usize,
    /// Users with role `administrador`.
    pub administrators: usize,
    /// Users with role `TeamLeader`.
    pub team_leaders: usize,
    /// Users with role `colaborador`.
    pub collaborators: usize,
}

impl UserTally {
    /// Counts the given users.
    #[must_use]
    pub fn of(users: &[User]) -> Self {
        users.iter().fold(Self::default(), |mut tally, user| {
            tally.total += 1;
            match user.status() {
                UserStatus::Active => tally.active += 1,
                UserStatus::Inactive => tally.inactive += 1,
            }
            match user.role() {
                UserRole::Administrator => tally.administrators += 1,
                UserRole::TeamLeader => tally.team_leaders += 1,
                UserRole::Collaborator => tally.collaborators += 1,
            }
            tally
        })
    }
}

/// Totals for the collaborator export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollaboratorTally {
    /// Number of exported collaborators.
    pub total: usize,
    /// Distinct organizations, sorted.
    pub organizations: BTreeSet<String>,
}

impl CollaboratorTally {
    /// Counts the given collaborators.
    #[must_use]
    pub fn of(users: &[User]) -> Self {
        Self {
            total: users.len(),
            organizations: users
                .iter()
                .map(|user| user.organization().to_owned())
                .collect(),
        }
    }

    /// Joins the organization names for display.
    #[must_use]
    pub fn organization_list(&self) -> String {
        self.organizations
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Totals for the task export, by effective status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskTally {
    /// Number of exported tasks.
    pub total: usize,
    /// Tasks reading as `asignada`.
    pub assigned: usize,
    /// Tasks reading as `en-proceso`.
    pub in_progress: usize,
    /// Tasks reading as `atrasada`.
    pub overdue: usize,
    /// Tasks reading as `finalizada`.
    pub finalized: usize,
}

impl TaskTally {
    /// Counts the given tasks as seen at `now`.
    #[must_use]
    pub fn of(views: &[TaskView], now: DateTime<FixedOffset>) -> Self {
        views.iter().fold(Self::default(), |mut tally, view| {
            tally.total += 1;
            match view.task.effective_status(now) {
                TaskStatus::Assigned => tally.assigned += 1,
                TaskStatus::InProgress => tally.in_progress += 1,
                TaskStatus::Overdue => tally.overdue += 1,
                TaskStatus::Finalized => tally.finalized += 1,
            }
            tally
        })
    }
}
