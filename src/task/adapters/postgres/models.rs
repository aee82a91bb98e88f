//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Business area.
    pub area: String,
    /// Assigned collaborator.
    pub assignee_id: uuid::Uuid,
    /// Creating team-leader.
    pub creator_id: uuid::Uuid,
    /// Assignment date.
    pub assigned_on: Option<NaiveDate>,
    /// Assignment time.
    pub assigned_at: Option<NaiveTime>,
    /// Due date.
    pub due_on: Option<NaiveDate>,
    /// Due time.
    pub due_at: Option<NaiveTime>,
    /// Stored lifecycle status.
    pub status: String,
    /// Observation log payload.
    pub observations: Value,
    /// Finalization summary.
    pub finalization_summary: Option<String>,
    /// Reopen request payload.
    pub reopen_request: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Business area.
    pub area: String,
    /// Assigned collaborator.
    pub assignee_id: uuid::Uuid,
    /// Creating team-leader.
    pub creator_id: uuid::Uuid,
    /// Assignment date.
    pub assigned_on: Option<NaiveDate>,
    /// Assignment time.
    pub assigned_at: Option<NaiveTime>,
    /// Due date.
    pub due_on: Option<NaiveDate>,
    /// Due time.
    pub due_at: Option<NaiveTime>,
    /// Stored lifecycle status.
    pub status: String,
    /// Observation log payload.
    pub observations: Value,
    /// Finalization summary.
    pub finalization_summary: Option<String>,
    /// Reopen request payload.
    pub reopen_request: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model for task records. Optional columns are written as `NULL`
/// when unset.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangesetRow {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Business area.
    pub area: String,
    /// Assigned collaborator.
    pub assignee_id: uuid::Uuid,
    /// Assignment date.
    pub assigned_on: Option<NaiveDate>,
    /// Assignment time.
    pub assigned_at: Option<NaiveTime>,
    /// Due date.
    pub due_on: Option<NaiveDate>,
    /// Due time.
    pub due_at: Option<NaiveTime>,
    /// Stored lifecycle status.
    pub status: String,
    /// Observation log payload.
    pub observations: Value,
    /// Finalization summary.
    pub finalization_summary: Option<String>,
    /// Reopen request payload.
    pub reopen_request: Option<Value>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
