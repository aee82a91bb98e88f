//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned by task construction and lifecycle rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is not a UUID.
    #[error("invalid task identifier: {0}")]
    InvalidTaskId(String),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the stored column width.
    #[error("task title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The observation text is empty after trimming.
    #[error("observation must not be empty")]
    EmptyObservation,

    /// The reopen reason is empty after trimming.
    #[error("reopen reason must not be empty")]
    EmptyReopenReason,

    /// The assignee tried to change a finalized task.
    #[error("task {0} is finalized and cannot be modified")]
    TaskFinalized(TaskId),

    /// The requested status is not reachable by the assignee.
    #[error("status change from {from} to {} is not allowed", to.map_or("<none>", TaskStatus::as_str))]
    TransitionNotAllowed {
        /// Status before the change.
        from: TaskStatus,
        /// Requested status, if one was given.
        to: Option<TaskStatus>,
    },

    /// Only finalized tasks may be reopened.
    #[error("task {0} is not finalized; only finalized tasks may be reopened")]
    NotFinalized(TaskId),

    /// A reopen request is already waiting for an answer.
    #[error("task {0} already has a pending reopen request")]
    ReopenAlreadyPending(TaskId),

    /// There is no pending reopen request to answer.
    #[error("task {0} has no pending reopen request")]
    NoPendingReopen(TaskId),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing reopen request statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown reopen request status: {0}")]
pub struct ParseReopenStatusError(pub String);
