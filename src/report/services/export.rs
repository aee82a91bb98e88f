//! Report export orchestration.

use crate::report::{
    domain::{ReportDocument, ReportKind},
    ports::{RenderError, ReportRenderer},
};
use crate::task::{
    domain::{TaskId, TaskStatus},
    ports::{TaskFilter, TaskRepository},
    services::{TaskLifecycleError, TaskLifecycleService},
};
use crate::user::{
    domain::{UserId, UserRole},
    ports::{UserFilter, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Selection of tasks to export. Empty criteria export every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskReportRequest {
    /// Only these tasks; empty means all.
    pub ids: Vec<TaskId>,
    /// Only tasks whose effective status matches.
    pub status: Option<TaskStatus>,
    /// Only tasks assigned to this user.
    pub assignee: Option<UserId>,
}

/// Errors raised while exporting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required selection field is missing.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Loading tasks failed.
    #[error(transparent)]
    Tasks(#[from] TaskLifecycleError),
    /// Loading users failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Rendering the workbook failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Loads records and renders them into downloadable workbooks.
pub struct ReportService<T, U, C, R>
where
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
    R: ReportRenderer + ?Sized,
{
    tasks: TaskLifecycleService<T, U, C>,
    users: Arc<U>,
    renderer: Arc<R>,
}

impl<T, U, C, R> Clone for ReportService<T, U, C, R>
where
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
    R: ReportRenderer + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
            users: Arc::clone(&self.users),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

impl<T, U, C, R> ReportService<T, U, C, R>
where
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
    R: ReportRenderer + ?Sized,
{
    /// Creates a report service.
    ///
    /// Report timestamps and overdue statuses follow the due-date offset of
    /// `tasks`.
    #[must_use]
    pub const fn new(
        tasks: TaskLifecycleService<T, U, C>,
        users: Arc<U>,
        renderer: Arc<R>,
    ) -> Self {
        Self {
            tasks,
            users,
            renderer,
        }
    }

    /// Exports accounts, restricted to `ids` when non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Users`] when the lookup fails and
    /// [`ReportError::Render`] when the workbook cannot be built.
    pub async fn export_users(&self, ids: Vec<UserId>) -> ReportResult<ReportDocument> {
        let filter = if ids.is_empty() {
            UserFilter::all()
        } else {
            UserFilter::all().with_ids(ids)
        };
        let users = self.users.find(&filter).await?;
        let bytes = self.renderer.render_users(&users)?;
        info!(rows = users.len(), "exported user report");
        Ok(self.document(ReportKind::Users, bytes))
    }

    /// Exports the collaborators of one organization, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidInput`] when the organization is blank,
    /// [`ReportError::Users`] when the lookup fails and
    /// [`ReportError::Render`] when the workbook cannot be built.
    pub async fn export_collaborators(
        &self,
        organization: Option<String>,
    ) -> ReportResult<ReportDocument> {
        let wanted = organization
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ReportError::InvalidInput("organization is required".to_owned()))?;

        let filter = UserFilter::all()
            .with_role(UserRole::Collaborator)
            .with_organization(wanted);
        let mut users = self.users.find(&filter).await?;
        users.sort_by(|left, right| left.name().cmp(right.name()));

        let bytes = self.renderer.render_collaborators(&users, self.tasks.now())?;
        info!(rows = users.len(), "exported collaborator report");
        Ok(self.document(ReportKind::Collaborators, bytes))
    }

    /// Exports tasks matching the request, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Tasks`] when loading fails and
    /// [`ReportError::Render`] when the workbook cannot be built.
    pub async fn export_tasks(&self, request: TaskReportRequest) -> ReportResult<ReportDocument> {
        let TaskReportRequest {
            ids,
            status,
            assignee,
        } = request;
        let mut filter = TaskFilter::all();
        filter.assignee = assignee;
        if !ids.is_empty() {
            filter = filter.with_ids(ids);
        }

        let views = self.tasks.find_views(&filter, status).await?;
        let bytes = self.renderer.render_tasks(&views, self.tasks.now())?;
        info!(rows = views.len(), "exported task report");
        Ok(self.document(ReportKind::Tasks, bytes))
    }

    fn document(&self, kind: ReportKind, bytes: Vec<u8>) -> ReportDocument {
        ReportDocument::new(kind, self.tasks.now().date_naive(), bytes)
    }
}
