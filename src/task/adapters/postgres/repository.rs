//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangesetRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        ObservationEntry, PersistedTaskData, ReopenRequest, Schedule, Task, TaskId, TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::{Area, UserId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;
use tracing::warn;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let lookup = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if let Some(creator) = lookup.creator {
                query = query.filter(tasks::creator_id.eq(creator.into_inner()));
            }
            if let Some(assignee) = lookup.assignee {
                query = query.filter(tasks::assignee_id.eq(assignee.into_inner()));
            }
            if let Some(status) = lookup.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(ids) = lookup.ids {
                let uuids: Vec<uuid::Uuid> = ids.into_iter().map(TaskId::into_inner).collect();
                query = query.filter(tasks::id.eq_any(uuids));
            }

            let rows = query
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let schedule = task.schedule();
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        area: task.area().as_str().to_owned(),
        assignee_id: task.assignee().into_inner(),
        creator_id: task.creator().into_inner(),
        assigned_on: schedule.assigned_on,
        assigned_at: schedule.assigned_at,
        due_on: schedule.due_on,
        due_at: schedule.due_at,
        status: task.status().as_str().to_owned(),
        observations: encode_observations(task)?,
        finalization_summary: task.finalization_summary().map(str::to_owned),
        reopen_request: encode_reopen_request(task)?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangesetRow> {
    let schedule = task.schedule();
    Ok(TaskChangesetRow {
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        area: task.area().as_str().to_owned(),
        assignee_id: task.assignee().into_inner(),
        assigned_on: schedule.assigned_on,
        assigned_at: schedule.assigned_at,
        due_on: schedule.due_on,
        due_at: schedule.due_at,
        status: task.status().as_str().to_owned(),
        observations: encode_observations(task)?,
        finalization_summary: task.finalization_summary().map(str::to_owned),
        reopen_request: encode_reopen_request(task)?,
        updated_at: task.updated_at(),
    })
}

fn encode_observations(task: &Task) -> TaskRepositoryResult<Value> {
    serde_json::to_value(task.observations()).map_err(TaskRepositoryError::persistence)
}

fn encode_reopen_request(task: &Task) -> TaskRepositoryResult<Option<Value>> {
    task.reopen_request()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        area,
        assignee_id,
        creator_id,
        assigned_on,
        assigned_at,
        due_on,
        due_at,
        status,
        observations,
        finalization_summary,
        reopen_request,
        created_at,
        updated_at,
    } = row;

    let task_id = TaskId::from_uuid(id);
    let data = PersistedTaskData {
        id: task_id,
        title,
        description,
        area: Area::try_from(area.as_str()).map_err(TaskRepositoryError::persistence)?,
        assignee: UserId::from_uuid(assignee_id),
        creator: UserId::from_uuid(creator_id),
        schedule: Schedule {
            assigned_on,
            assigned_at,
            due_on,
            due_at,
        },
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        observations: decode_observations(task_id, observations),
        finalization_summary,
        reopen_request: reopen_request.and_then(|payload| decode_reopen_request(task_id, payload)),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn decode_observations(task_id: TaskId, payload: Value) -> Vec<ObservationEntry> {
    serde_json::from_value(payload).unwrap_or_else(|err| {
        warn!(%task_id, error = %err, "discarding unreadable observation log");
        Vec::new()
    })
}

fn decode_reopen_request(task_id: TaskId, payload: Value) -> Option<ReopenRequest> {
    if payload.is_null() {
        return None;
    }
    serde_json::from_value(payload)
        .inspect_err(|err| warn!(%task_id, error = %err, "discarding unreadable reopen request"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::domain::{NewTask, ReopenStatus, StatusAdvance, TaskCommand};
    use chrono::{NaiveDate, NaiveTime};
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn stored(row: NewTaskRow) -> TaskRow {
        TaskRow {
            id: row.id,
            title: row.title,
            description: row.description,
            area: row.area,
            assignee_id: row.assignee_id,
            creator_id: row.creator_id,
            assigned_on: row.assigned_on,
            assigned_at: row.assigned_at,
            due_on: row.due_on,
            due_at: row.due_at,
            status: row.status,
            observations: row.observations,
            finalization_summary: row.finalization_summary,
            reopen_request: row.reopen_request,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    #[fixture]
    fn reopened_task() -> Task {
        let new_task = NewTask {
            title: "Close month".to_owned(),
            description: Some("Ledger and payroll".to_owned()),
            area: Area::Accounting,
            assignee: UserId::new(),
            schedule: Schedule {
                assigned_on: NaiveDate::from_ymd_opt(2030, 2, 1),
                assigned_at: NaiveTime::from_hms_opt(8, 0, 0),
                due_on: NaiveDate::from_ymd_opt(2030, 3, 1),
                due_at: NaiveTime::from_hms_opt(17, 30, 0),
            },
        };
        let mut task =
            Task::create(new_task, UserId::new(), &DefaultClock).expect("valid task");
        let assignee = task.assignee();
        task.record_observation(assignee, "Waiting on bank".to_owned(), &DefaultClock)
            .expect("observation recorded");
        task.apply(
            TaskCommand::Collaborator(StatusAdvance {
                status: Some(TaskStatus::Finalized),
                finalization_summary: Some("Filed".to_owned()),
            }),
            &DefaultClock,
        )
        .expect("assignee may finalize");
        task.request_reopen(assignee, "Missed a ledger".to_owned(), &DefaultClock)
            .expect("finalized task accepts a request");
        task
    }

    #[rstest]
    fn task_survives_a_row_round_trip(reopened_task: Task) {
        let row = to_new_row(&reopened_task).expect("task should encode");

        let restored = row_to_task(stored(row)).expect("row should decode");

        assert_eq!(restored, reopened_task);
    }

    #[rstest]
    fn changeset_writes_reopen_request_as_json(reopened_task: Task) {
        let changeset = to_changeset(&reopened_task).expect("task should encode");

        let request = changeset.reopen_request.expect("request column set");
        assert_eq!(request["estado"], ReopenStatus::Pending.as_str());
        assert_eq!(request["motivo"], "Missed a ledger");
        assert_eq!(changeset.status, "finalizada");
        assert_eq!(changeset.observations.as_array().map(Vec::len), Some(1));
    }

    #[rstest]
    #[case(json!({ "motivo": "x", "estado": "perdida" }))]
    #[case(json!("pendiente"))]
    #[case(json!(null))]
    fn unreadable_reopen_request_reads_as_absent(#[case] payload: Value) {
        assert!(decode_reopen_request(TaskId::new(), payload).is_none());
    }

    #[rstest]
    #[case(json!({ "autor": "nobody" }))]
    #[case(json!([{ "texto": 42 }]))]
    fn unreadable_observation_log_reads_as_empty(#[case] payload: Value) {
        assert!(decode_observations(TaskId::new(), payload).is_empty());
    }

    #[rstest]
    fn corrupt_json_columns_do_not_fail_the_row(reopened_task: Task) {
        let mut row = stored(to_new_row(&reopened_task).expect("task should encode"));
        row.observations = json!("garbage");
        row.reopen_request = Some(json!(17));

        let restored = row_to_task(row).expect("row should still decode");

        assert!(restored.observations().is_empty());
        assert!(restored.reopen_request().is_none());
        assert_eq!(restored.status(), TaskStatus::Finalized);
    }

    #[rstest]
    #[case::status(|row: &mut TaskRow| row.status = "pausada".to_owned())]
    #[case::area(|row: &mut TaskRow| row.area = "marketing".to_owned())]
    fn unknown_stored_values_are_persistence_errors(
        reopened_task: Task,
        #[case] corrupt: fn(&mut TaskRow),
    ) {
        let mut row = stored(to_new_row(&reopened_task).expect("task should encode"));
        corrupt(&mut row);

        let result = row_to_task(row);

        assert!(matches!(result, Err(TaskRepositoryError::Persistence(_))));
    }
}
