//! Spreadsheet rendering port.

use crate::task::domain::TaskView;
use crate::user::domain::User;
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;
use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Renders exported records into workbook bytes.
#[cfg_attr(test, mockall::automock)]
pub trait ReportRenderer: Send + Sync {
    /// Renders the user listing with its summary block.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Workbook`] when the workbook cannot be built.
    fn render_users(&self, users: &[User]) -> RenderResult<Vec<u8>>;

    /// Renders the collaborator listing generated at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Workbook`] when the workbook cannot be built.
    fn render_collaborators(
        &self,
        users: &[User],
        now: DateTime<FixedOffset>,
    ) -> RenderResult<Vec<u8>>;

    /// Renders the task listing, reading statuses as seen at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Workbook`] when the workbook cannot be built.
    fn render_tasks(
        &self,
        views: &[TaskView],
        now: DateTime<FixedOffset>,
    ) -> RenderResult<Vec<u8>>;
}

/// Errors raised while rendering a workbook.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The spreadsheet writer failed.
    #[error("workbook rendering failed: {0}")]
    Workbook(Arc<dyn std::error::Error + Send + Sync>),
}

impl RenderError {
    /// Wraps a spreadsheet writer error.
    pub fn workbook(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Workbook(Arc::new(err))
    }
}
