//! Observation log entries.

use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note attached to a task, usually explaining a delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationEntry {
    /// Who wrote the note.
    #[serde(rename = "autor")]
    pub author: UserId,
    /// Note text.
    #[serde(rename = "texto")]
    pub text: String,
    /// When the note was recorded.
    #[serde(rename = "fecha")]
    pub recorded_at: DateTime<Utc>,
}
