//! Task aggregate root.

use super::{
    ObservationEntry, ReopenDecision, ReopenRequest, ReopenStatus, Schedule, StatusAdvance,
    TaskCommand, TaskDomainError, TaskEdit, TaskId, TaskStatus,
};
use crate::user::domain::{Area, UserId};
use chrono::{DateTime, FixedOffset, Utc};
use mockable::Clock;

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Validated input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Business area.
    pub area: Area,
    /// Collaborator the task is handed to.
    pub assignee: UserId,
    /// Assignment and due dates.
    pub schedule: Schedule,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    area: Area,
    assignee: UserId,
    creator: UserId,
    schedule: Schedule,
    status: TaskStatus,
    observations: Vec<ObservationEntry>,
    finalization_summary: Option<String>,
    reopen_request: Option<ReopenRequest>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted business area.
    pub area: Area,
    /// Persisted assignee.
    pub assignee: UserId,
    /// Persisted creator.
    pub creator: UserId,
    /// Persisted schedule.
    pub schedule: Schedule,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted observation log, oldest first.
    pub observations: Vec<ObservationEntry>,
    /// Persisted finalization summary.
    pub finalization_summary: Option<String>,
    /// Persisted reopen request.
    pub reopen_request: Option<ReopenRequest>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an assigned task owned by `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank and
    /// [`TaskDomainError::TitleTooLong`] when it exceeds [`MAX_TITLE_LEN`].
    pub fn create(
        new_task: NewTask,
        creator: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = non_blank(new_task.title).ok_or(TaskDomainError::EmptyTitle)?;
        check_title_len(&title)?;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            title,
            description: new_task.description.and_then(non_blank),
            area: new_task.area,
            assignee: new_task.assignee,
            creator,
            schedule: new_task.schedule,
            status: TaskStatus::Assigned,
            observations: Vec::new(),
            finalization_summary: None,
            reopen_request: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            area: data.area,
            assignee: data.assignee,
            creator: data.creator,
            schedule: data.schedule,
            status: data.status,
            observations: data.observations,
            finalization_summary: data.finalization_summary,
            reopen_request: data.reopen_request,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the business area.
    #[must_use]
    pub const fn area(&self) -> Area {
        self.area
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> UserId {
        self.assignee
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator(&self) -> UserId {
        self.creator
    }

    /// Returns the schedule.
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the stored status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the status as seen at `now`.
    ///
    /// Open tasks whose due moment has passed on the wall clock of `now`
    /// read as [`TaskStatus::Overdue`]; the stored status is left as is.
    #[must_use]
    pub fn effective_status(&self, now: DateTime<FixedOffset>) -> TaskStatus {
        if self.status.is_open() && self.schedule.is_past_due(now) {
            TaskStatus::Overdue
        } else {
            self.status
        }
    }

    /// Returns the observation log, oldest first.
    #[must_use]
    pub fn observations(&self) -> &[ObservationEntry] {
        &self.observations
    }

    /// Returns the most recent observation.
    #[must_use]
    pub fn latest_observation(&self) -> Option<&ObservationEntry> {
        self.observations.last()
    }

    /// Returns the finalization summary, if any.
    #[must_use]
    pub fn finalization_summary(&self) -> Option<&str> {
        self.finalization_summary.as_deref()
    }

    /// Returns the reopen request, if one was ever raised.
    #[must_use]
    pub const fn reopen_request(&self) -> Option<&ReopenRequest> {
        self.reopen_request.as_ref()
    }

    /// Returns `true` while a reopen request awaits an answer.
    #[must_use]
    pub fn has_pending_reopen(&self) -> bool {
        self.reopen_request
            .as_ref()
            .is_some_and(ReopenRequest::is_pending)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies an authorized update command.
    ///
    /// A leader edit that moves a finalized task to another status approves
    /// any pending reopen request on the creator's behalf.
    ///
    /// # Errors
    ///
    /// For [`TaskCommand::Collaborator`], returns
    /// [`TaskDomainError::TaskFinalized`] when the task is finalized and
    /// [`TaskDomainError::TransitionNotAllowed`] when the requested status is
    /// missing or off the allowed edges. A leader edit fails only with
    /// [`TaskDomainError::TitleTooLong`], leaving the task untouched.
    pub fn apply(&mut self, command: TaskCommand, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let now = clock.utc();
        match command {
            TaskCommand::Leader(edit) => self.apply_edit(edit, now)?,
            TaskCommand::Collaborator(advance) => self.advance(advance)?,
        }
        self.updated_at = now;
        Ok(())
    }

    fn apply_edit(&mut self, edit: TaskEdit, now: DateTime<Utc>) -> Result<(), TaskDomainError> {
        if let Some(candidate) = edit.title.as_deref() {
            check_title_len(candidate.trim())?;
        }

        edit.apply_schedule(&mut self.schedule);
        let TaskEdit {
            title,
            description,
            area,
            assignee,
            status,
            finalization_summary,
            ..
        } = edit;

        if let Some(title) = title.and_then(non_blank) {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = non_blank(description);
        }
        if let Some(area) = area {
            self.area = area;
        }
        if let Some(assignee) = assignee {
            self.assignee = assignee;
        }
        if let Some(status) = status {
            if self.status == TaskStatus::Finalized && status != TaskStatus::Finalized {
                self.settle_pending_reopen(now);
            }
            self.status = status;
        }
        if let Some(summary) = finalization_summary {
            self.finalization_summary = non_blank(summary);
        }
        Ok(())
    }

    fn settle_pending_reopen(&mut self, now: DateTime<Utc>) {
        let creator = self.creator;
        if let Some(request) = self
            .reopen_request
            .as_mut()
            .filter(|request| request.is_pending())
        {
            request.resolve(ReopenStatus::Approved, creator, now, None);
        }
    }

    fn advance(&mut self, advance: StatusAdvance) -> Result<(), TaskDomainError> {
        if self.status == TaskStatus::Finalized {
            return Err(TaskDomainError::TaskFinalized(self.id));
        }

        let target = advance
            .status
            .filter(|target| self.status.assignee_may_advance_to(*target))
            .ok_or(TaskDomainError::TransitionNotAllowed {
                from: self.status,
                to: advance.status,
            })?;

        self.status = target;
        if target == TaskStatus::Finalized {
            if let Some(summary) = advance.finalization_summary.and_then(non_blank) {
                self.finalization_summary = Some(summary);
            }
        }
        Ok(())
    }

    /// Appends an observation to the log.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyObservation`] when the text is blank.
    pub fn record_observation(
        &mut self,
        author: UserId,
        text: String,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let text = non_blank(text).ok_or(TaskDomainError::EmptyObservation)?;
        let recorded_at = clock.utc();
        self.observations.push(ObservationEntry {
            author,
            text,
            recorded_at,
        });
        self.updated_at = recorded_at;
        Ok(())
    }

    /// Attaches a pending reopen request. The status is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotFinalized`] unless the task is
    /// finalized, [`TaskDomainError::ReopenAlreadyPending`] when a request is
    /// already waiting and [`TaskDomainError::EmptyReopenReason`] for a blank
    /// reason.
    pub fn request_reopen(
        &mut self,
        requester: UserId,
        reason: String,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Finalized {
            return Err(TaskDomainError::NotFinalized(self.id));
        }
        if self.has_pending_reopen() {
            return Err(TaskDomainError::ReopenAlreadyPending(self.id));
        }
        let reason = non_blank(reason).ok_or(TaskDomainError::EmptyReopenReason)?;

        let requested_at = clock.utc();
        self.reopen_request = Some(ReopenRequest::pending(reason, requester, requested_at));
        self.updated_at = requested_at;
        Ok(())
    }

    /// Resolves the pending reopen request.
    ///
    /// Approval sets the status back to [`TaskStatus::Assigned`] and moves
    /// the due date and time when supplied. Rejection leaves the status
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoPendingReopen`] when nothing is pending.
    pub fn respond_to_reopen(
        &mut self,
        responder: UserId,
        decision: ReopenDecision,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let id = self.id;
        let request = self
            .reopen_request
            .as_mut()
            .filter(|request| request.is_pending())
            .ok_or(TaskDomainError::NoPendingReopen(id))?;

        let responded_at = clock.utc();
        match decision {
            ReopenDecision::Approve { due_on, due_at } => {
                request.resolve(ReopenStatus::Approved, responder, responded_at, None);
                self.status = TaskStatus::Assigned;
                self.schedule.reschedule(due_on, due_at);
            }
            ReopenDecision::Reject { reason } => {
                request.resolve(
                    ReopenStatus::Rejected,
                    responder,
                    responded_at,
                    reason.and_then(non_blank),
                );
            }
        }
        self.updated_at = responded_at;
        Ok(())
    }

}

fn check_title_len(title: &str) -> Result<(), TaskDomainError> {
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TaskDomainError::TitleTooLong { max: MAX_TITLE_LEN });
    }
    Ok(())
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
