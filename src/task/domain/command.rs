//! Role-tagged update commands.
//!
//! The caller's verified relationship to a task decides which variant is
//! built, and each variant carries only the fields that relationship may
//! touch.

use super::{Schedule, TaskStatus};
use crate::user::domain::{Area, UserId};
use chrono::{NaiveDate, NaiveTime};

/// Field overrides available to the task's creating team-leader.
///
/// `None` leaves a field untouched. No transition rules apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// New title; blank values are ignored.
    pub title: Option<String>,
    /// New description; a blank value clears it.
    pub description: Option<String>,
    /// New business area.
    pub area: Option<Area>,
    /// New assignee.
    pub assignee: Option<UserId>,
    /// New assignment date.
    pub assigned_on: Option<NaiveDate>,
    /// New assignment time.
    pub assigned_at: Option<NaiveTime>,
    /// New due date.
    pub due_on: Option<NaiveDate>,
    /// New due time.
    pub due_at: Option<NaiveTime>,
    /// Status written as-is.
    pub status: Option<TaskStatus>,
    /// New finalization summary.
    pub finalization_summary: Option<String>,
}

impl TaskEdit {
    pub(crate) fn apply_schedule(&self, schedule: &mut Schedule) {
        if let Some(date) = self.assigned_on {
            schedule.assigned_on = Some(date);
        }
        if let Some(time) = self.assigned_at {
            schedule.assigned_at = Some(time);
        }
        schedule.reschedule(self.due_on, self.due_at);
    }
}

/// Status change requested by the task's assignee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusAdvance {
    /// Target status; a missing value is rejected.
    pub status: Option<TaskStatus>,
    /// Summary stored when the target is [`TaskStatus::Finalized`].
    pub finalization_summary: Option<String>,
}

/// An authorized task update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// Unrestricted override by the creating team-leader.
    Leader(TaskEdit),
    /// Restricted status advance by the assignee.
    Collaborator(StatusAdvance),
}
