//! Service layer for the task lifecycle and reopen workflow.

use crate::task::{
    domain::{
        NewTask, ReopenDecision, Schedule, StatusAdvance, Task, TaskCommand, TaskDomainError,
        TaskEdit, TaskId, TaskStatus, TaskView,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{Area, User, UserId, UserRole, UserSummary},
    ports::{UserFilter, UserRepository, UserRepositoryError},
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use mockable::Clock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    area: Option<String>,
    assignee: Option<UserId>,
    schedule: Schedule,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, area: impl Into<String>, assignee: UserId) -> Self {
        Self {
            title: Some(title.into()),
            area: Some(area.into()),
            assignee: Some(assignee),
            ..Self::default()
        }
    }

    /// Builds a request from possibly-missing wire fields.
    #[must_use]
    pub fn from_parts(
        title: Option<String>,
        area: Option<String>,
        assignee: Option<UserId>,
    ) -> Self {
        Self {
            title,
            area,
            assignee,
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignment and due dates.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }
}

/// Raw update fields sent by either the creator or the assignee.
///
/// Which fields take effect depends on the caller: the creating
/// team-leader may set any of them, the assignee only `status` and
/// `finalization_summary`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New business area.
    pub area: Option<String>,
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
    /// Requested status.
    pub status: Option<String>,
    /// Finalization summary.
    pub finalization_summary: Option<String>,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// A required field is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The caller may not perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The task is not in a state that allows the operation.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The assignee requested a status change off the allowed edges.
    #[error("{0}")]
    InvalidTransition(String),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// User repository operation failed.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
}

impl From<TaskDomainError> for TaskLifecycleError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::InvalidTaskId(_)
            | TaskDomainError::EmptyTitle
            | TaskDomainError::TitleTooLong { .. }
            | TaskDomainError::EmptyObservation
            | TaskDomainError::EmptyReopenReason => Self::InvalidInput(err.to_string()),
            TaskDomainError::TransitionNotAllowed { .. } => Self::InvalidTransition(err.to_string()),
            TaskDomainError::TaskFinalized(_)
            | TaskDomainError::NotFinalized(_)
            | TaskDomainError::ReopenAlreadyPending(_)
            | TaskDomainError::NoPendingReopen(_) => Self::Conflict(err.to_string()),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every operation is a single read-validate-write against the stores. The
/// acting user's stored role is authoritative.
pub struct TaskLifecycleService<T, U, C>
where
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
    due_offset: FixedOffset,
}

impl<T, U, C> Clone for TaskLifecycleService<T, U, C>
where
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            users: Arc::clone(&self.users),
            clock: Arc::clone(&self.clock),
            due_offset: self.due_offset,
        }
    }
}

impl<T, U, C> TaskLifecycleService<T, U, C>
where
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service reading due dates as UTC.
    #[must_use]
    pub fn new(tasks: Arc<T>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            clock,
            due_offset: Utc.fix(),
        }
    }

    /// Reads stored due dates as wall-clock time at `offset`.
    #[must_use]
    pub const fn with_due_offset(mut self, offset: FixedOffset) -> Self {
        self.due_offset = offset;
        self
    }

    /// Returns the current time at the due-date offset.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.utc().with_timezone(&self.due_offset)
    }

    /// Creates a task assigned to a collaborator.
    ///
    /// The assignee's role and organization are not checked.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] unless the actor is a stored
    /// team-leader and [`TaskLifecycleError::InvalidInput`] when title, area
    /// or assignee is missing or the area is unknown.
    pub async fn create(
        &self,
        actor: UserId,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<TaskView> {
        let creator = self.users.find_by_id(actor).await?;
        if creator.as_ref().map(User::role) != Some(UserRole::TeamLeader) {
            return Err(TaskLifecycleError::Forbidden(
                "only team leaders may create tasks".to_owned(),
            ));
        }

        let CreateTaskRequest {
            title,
            description,
            area,
            assignee,
            schedule,
        } = request;
        let (Some(title), Some(area), Some(assignee)) = (
            title.filter(|value| !value.trim().is_empty()),
            area.filter(|value| !value.trim().is_empty()),
            assignee,
        ) else {
            return Err(TaskLifecycleError::InvalidInput(
                "title, area and assignee are required".to_owned(),
            ));
        };

        let new_task = NewTask {
            title,
            description,
            area: parse_area(&area)?,
            assignee,
            schedule,
        };
        let task = Task::create(new_task, actor, &*self.clock)?;
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), creator = %actor, assignee = %assignee, "created task");

        self.resolve_view(task).await
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<TaskView> {
        let task = self.load(id).await?;
        self.resolve_view(task).await
    }

    /// Lists tasks created by the actor, newest first.
    ///
    /// The status filter compares against the effective status, so overdue
    /// tasks match `atrasada`.
    ///
    /// # Errors
    ///
    /// Returns repository errors from either store.
    pub async fn list_created(
        &self,
        actor: UserId,
        status: Option<TaskStatus>,
        assignee: Option<UserId>,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        let mut filter = TaskFilter::all().created_by(actor);
        filter.assignee = assignee;
        self.find_views(&filter, status).await
    }

    /// Lists tasks assigned to the actor, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors from either store.
    pub async fn list_received(
        &self,
        actor: UserId,
        status: Option<TaskStatus>,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        let filter = TaskFilter::all().assigned_to(actor);
        self.find_views(&filter, status).await
    }

    /// Returns resolved views of the tasks matching `filter`, optionally
    /// narrowed to one effective status.
    ///
    /// # Errors
    ///
    /// Returns repository errors from either store.
    pub async fn find_views(
        &self,
        filter: &TaskFilter,
        status: Option<TaskStatus>,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        let now = self.now();
        let tasks = self
            .tasks
            .find(filter)
            .await?
            .into_iter()
            .filter(|task| status.is_none_or(|wanted| task.effective_status(now) == wanted))
            .collect();
        self.resolve_views(tasks).await
    }

    /// Updates a task on behalf of its creator or its assignee.
    ///
    /// The creating team-leader may overwrite any field with no transition
    /// check. The assignee may only move the status along the allowed edges.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown tasks,
    /// [`TaskLifecycleError::Forbidden`] when the actor is neither creator nor
    /// assignee, [`TaskLifecycleError::Conflict`] when the assignee touches a
    /// finalized task and [`TaskLifecycleError::InvalidTransition`] for
    /// disallowed status changes.
    pub async fn update(
        &self,
        actor: UserId,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<TaskView> {
        let mut task = self.load(id).await?;
        let actor_role = self.users.find_by_id(actor).await?.map(|user| user.role());
        let command = command_for(&task, actor, actor_role, request)?;
        let is_override = matches!(command, TaskCommand::Leader(_));

        task.apply(command, &*self.clock)?;
        self.tasks.update(&task).await?;
        info!(
            task_id = %id,
            actor = %actor,
            status = %task.status(),
            is_override,
            "updated task"
        );

        self.resolve_view(task).await
    }

    /// Appends an observation to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown tasks and
    /// [`TaskLifecycleError::InvalidInput`] for blank text.
    pub async fn add_observation(
        &self,
        actor: UserId,
        id: TaskId,
        text: Option<String>,
    ) -> TaskLifecycleResult<TaskView> {
        let mut task = self.load(id).await?;
        task.record_observation(actor, text.unwrap_or_default(), &*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %id, author = %actor, "recorded observation");

        self.resolve_view(task).await
    }

    /// Attaches a pending reopen request raised by the assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown tasks,
    /// [`TaskLifecycleError::Forbidden`] when the actor is not the assignee,
    /// [`TaskLifecycleError::Conflict`] when the task is not finalized or a
    /// request is already pending and [`TaskLifecycleError::InvalidInput`]
    /// for a blank reason.
    pub async fn request_reopen(
        &self,
        actor: UserId,
        id: TaskId,
        reason: Option<String>,
    ) -> TaskLifecycleResult<TaskView> {
        let mut task = self.load(id).await?;
        if task.assignee() != actor {
            return Err(TaskLifecycleError::Forbidden(
                "only the assignee may request reopening".to_owned(),
            ));
        }

        task.request_reopen(actor, reason.unwrap_or_default(), &*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %id, requester = %actor, "reopen requested");

        self.resolve_view(task).await
    }

    /// Approves or rejects the pending reopen request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for unknown tasks,
    /// [`TaskLifecycleError::Forbidden`] when the actor is not the creator
    /// and [`TaskLifecycleError::Conflict`] when nothing is pending.
    pub async fn respond_reopen(
        &self,
        actor: UserId,
        id: TaskId,
        decision: ReopenDecision,
    ) -> TaskLifecycleResult<TaskView> {
        let mut task = self.load(id).await?;
        if task.creator() != actor {
            return Err(TaskLifecycleError::Forbidden(
                "only the task creator may answer reopen requests".to_owned(),
            ));
        }

        let approved = decision.is_approval();
        task.respond_to_reopen(actor, decision, &*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %id, responder = %actor, approved, "answered reopen request");

        self.resolve_view(task).await
    }

    /// Lists the actor's finalized tasks that carry a pending reopen
    /// request, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] unless the actor is a stored
    /// team-leader.
    pub async fn pending_reopen_requests(
        &self,
        actor: UserId,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        let actor_user = self.users.find_by_id(actor).await?;
        if actor_user.as_ref().map(User::role) != Some(UserRole::TeamLeader) {
            return Err(TaskLifecycleError::Forbidden(
                "only team leaders review reopen requests".to_owned(),
            ));
        }

        let filter = TaskFilter::all()
            .created_by(actor)
            .with_status(TaskStatus::Finalized);
        let tasks = self
            .tasks
            .find(&filter)
            .await?
            .into_iter()
            .filter(Task::has_pending_reopen)
            .collect();
        self.resolve_views(tasks).await
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    async fn resolve_view(&self, task: Task) -> TaskLifecycleResult<TaskView> {
        let mut views = self.resolve_views(vec![task]).await?;
        views.pop().ok_or_else(|| {
            TaskLifecycleError::Repository(TaskRepositoryError::persistence(
                std::io::Error::other("view resolution dropped a task"),
            ))
        })
    }

    async fn resolve_views(&self, tasks: Vec<Task>) -> TaskLifecycleResult<Vec<TaskView>> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let ids: BTreeSet<UserId> = tasks
            .iter()
            .flat_map(|task| [task.assignee(), task.creator()])
            .collect();
        let summaries: HashMap<UserId, UserSummary> = self
            .users
            .find(&UserFilter::all().with_ids(ids))
            .await?
            .iter()
            .map(|user| (user.id(), user.summary()))
            .collect();

        Ok(tasks
            .into_iter()
            .map(|task| TaskView {
                assignee: summaries.get(&task.assignee()).cloned(),
                creator: summaries.get(&task.creator()).cloned(),
                task,
            })
            .collect())
    }
}

/// Chooses the update path from the actor's relationship to the task.
fn command_for(
    task: &Task,
    actor: UserId,
    actor_role: Option<UserRole>,
    request: UpdateTaskRequest,
) -> TaskLifecycleResult<TaskCommand> {
    if task.creator() == actor && actor_role == Some(UserRole::TeamLeader) {
        return leader_edit(request).map(TaskCommand::Leader);
    }
    if task.assignee() != actor {
        return Err(TaskLifecycleError::Forbidden(
            "not authorized for this task".to_owned(),
        ));
    }

    let status = match request.status.as_deref() {
        None => None,
        Some(raw) => Some(TaskStatus::try_from(raw).map_err(|_| {
            TaskLifecycleError::InvalidTransition(format!("status change to '{raw}' is not allowed"))
        })?),
    };
    Ok(TaskCommand::Collaborator(StatusAdvance {
        status,
        finalization_summary: request.finalization_summary,
    }))
}

fn leader_edit(request: UpdateTaskRequest) -> TaskLifecycleResult<TaskEdit> {
    let UpdateTaskRequest {
        title,
        description,
        area,
        assignee,
        assigned_on,
        assigned_at,
        due_on,
        due_at,
        status,
        finalization_summary,
    } = request;

    Ok(TaskEdit {
        title,
        description,
        area: area.as_deref().map(parse_area).transpose()?,
        assignee,
        assigned_on,
        assigned_at,
        due_on,
        due_at,
        status: status
            .as_deref()
            .map(|raw| {
                TaskStatus::try_from(raw)
                    .map_err(|err| TaskLifecycleError::InvalidInput(err.to_string()))
            })
            .transpose()?,
        finalization_summary,
    })
}

fn parse_area(raw: &str) -> TaskLifecycleResult<Area> {
    Area::try_from(raw).map_err(|err| TaskLifecycleError::InvalidInput(err.to_string()))
}
