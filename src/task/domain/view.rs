//! Task projection with the people involved resolved.

use super::Task;
use crate::user::domain::UserSummary;

/// A task together with its assignee and creator summaries.
///
/// A summary is `None` when the referenced account no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// The task itself.
    pub task: Task,
    /// Assignee summary.
    pub assignee: Option<UserSummary>,
    /// Creator summary.
    pub creator: Option<UserSummary>,
}
