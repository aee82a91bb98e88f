//! Domain model for the task lifecycle and reopen workflow.
//!
//! Tasks move `asignada → en-proceso → finalizada` under their assignee,
//! may be overridden freely by their creating team-leader, and return from
//! `finalizada` to `asignada` only through an approved reopen request.
//! Infrastructure concerns stay outside this boundary.

mod command;
mod error;
mod ids;
mod observation;
mod reopen;
mod schedule;
mod status;
mod task;
mod view;

pub use command::{StatusAdvance, TaskCommand, TaskEdit};
pub use error::{ParseReopenStatusError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use observation::ObservationEntry;
pub use reopen::{ReopenDecision, ReopenRequest, ReopenStatus};
pub use schedule::Schedule;
pub use status::TaskStatus;
pub use task::{MAX_TITLE_LEN, NewTask, PersistedTaskData, Task};
pub use view::TaskView;
