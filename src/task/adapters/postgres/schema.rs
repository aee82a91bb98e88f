//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with their embedded observation log and reopen request.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Business area.
        #[max_length = 32]
        area -> Varchar,
        /// Assigned collaborator.
        assignee_id -> Uuid,
        /// Creating team-leader.
        creator_id -> Uuid,
        /// Assignment date.
        assigned_on -> Nullable<Date>,
        /// Assignment time.
        assigned_at -> Nullable<Time>,
        /// Due date.
        due_on -> Nullable<Date>,
        /// Due time.
        due_at -> Nullable<Time>,
        /// Stored lifecycle status.
        #[max_length = 16]
        status -> Varchar,
        /// Observation log as a JSON array.
        observations -> Jsonb,
        /// Finalization summary.
        finalization_summary -> Nullable<Text>,
        /// Reopen request as a JSON object.
        reopen_request -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
