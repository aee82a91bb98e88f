//! Assignment and due dates of a task.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

/// Optional calendar fields attached to a task.
///
/// Dates and times are stored without a zone. They are read as wall-clock
/// time at whatever offset the current instant is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Day the task was handed out.
    pub assigned_on: Option<NaiveDate>,
    /// Time of day the task was handed out.
    pub assigned_at: Option<NaiveTime>,
    /// Day the task is due.
    pub due_on: Option<NaiveDate>,
    /// Time of day the task is due.
    pub due_at: Option<NaiveTime>,
}

impl Schedule {
    /// Returns the due moment as wall-clock time, if a due date is set.
    ///
    /// A due date without a time is due at the last second of that day.
    #[must_use]
    pub fn due_moment(&self) -> Option<NaiveDateTime> {
        let date = self.due_on?;
        let time = self
            .due_at
            .or_else(|| NaiveTime::from_hms_opt(23, 59, 59))?;
        Some(date.and_time(time))
    }

    /// Returns `true` when the due moment lies before the local time of `now`.
    #[must_use]
    pub fn is_past_due(&self, now: DateTime<FixedOffset>) -> bool {
        self.due_moment().is_some_and(|due| due < now.naive_local())
    }

    /// Replaces the due fields that are supplied.
    pub fn reschedule(&mut self, due_on: Option<NaiveDate>, due_at: Option<NaiveTime>) {
        if let Some(date) = due_on {
            self.due_on = Some(date);
        }
        if let Some(time) = due_at {
            self.due_at = Some(time);
        }
    }
}
