//! In-memory integration tests for the task lifecycle.

use super::helpers::{Backend, backend};
use flowment::task::{
    domain::{ReopenDecision, ReopenStatus, Schedule, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest},
};
use chrono::{Duration, Utc};
use rstest::rstest;

fn status_change(status: &str) -> UpdateTaskRequest {
    UpdateTaskRequest {
        status: Some(status.to_owned()),
        ..UpdateTaskRequest::default()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigned_task_runs_to_completion(backend: Backend) -> Result<(), eyre::Report> {
    let lucia = backend.register("Lucia", "TeamLeader").await?;
    let carlos = backend.register("Carlos", "colaborador").await?;
    let created = backend.assign(lucia.id(), carlos.id(), "Migrate ledger").await?;
    let task_id = created.task.id();

    let started = backend
        .tasks
        .update(carlos.id(), task_id, status_change("en-proceso"))
        .await?;
    let finished = backend
        .tasks
        .update(
            carlos.id(),
            task_id,
            UpdateTaskRequest {
                status: Some("finalizada".to_owned()),
                finalization_summary: Some("Ledger migrated".to_owned()),
                ..UpdateTaskRequest::default()
            },
        )
        .await?;

    assert_eq!(created.task.status(), TaskStatus::Assigned);
    assert_eq!(started.task.status(), TaskStatus::InProgress);
    assert_eq!(finished.task.status(), TaskStatus::Finalized);
    assert_eq!(finished.task.finalization_summary(), Some("Ledger migrated"));
    assert_eq!(
        finished.assignee.map(|summary| summary.name),
        Some("Carlos".to_owned())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn past_due_tasks_read_as_overdue(backend: Backend) -> Result<(), eyre::Report> {
    let lucia = backend.register("Lucia", "TeamLeader").await?;
    let carlos = backend.register("Carlos", "colaborador").await?;
    let yesterday = (Utc::now() - Duration::days(1)).date_naive();
    let request = CreateTaskRequest::new("Late report", "contabilidad", carlos.id()).with_schedule(
        Schedule {
            due_on: Some(yesterday),
            ..Schedule::default()
        },
    );
    backend.tasks.create(lucia.id(), request).await?;
    backend.assign(lucia.id(), carlos.id(), "On time").await?;

    let overdue = backend
        .tasks
        .list_received(carlos.id(), Some(TaskStatus::Overdue))
        .await?;
    let assigned = backend
        .tasks
        .list_received(carlos.id(), Some(TaskStatus::Assigned))
        .await?;

    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue.first().map(|view| view.task.title()), Some("Late report"));
    assert_eq!(assigned.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_reopen_keeps_the_task_closed(backend: Backend) -> Result<(), eyre::Report> {
    let lucia = backend.register("Lucia", "TeamLeader").await?;
    let carlos = backend.register("Carlos", "colaborador").await?;
    let task_id = backend.assign(lucia.id(), carlos.id(), "Audit").await?.task.id();
    backend
        .tasks
        .update(carlos.id(), task_id, status_change("finalizada"))
        .await?;

    backend
        .tasks
        .request_reopen(carlos.id(), task_id, Some("Missing appendix".to_owned()))
        .await?;
    let rejected = backend
        .tasks
        .respond_reopen(
            lucia.id(),
            task_id,
            ReopenDecision::Reject {
                reason: Some("Out of scope".to_owned()),
            },
        )
        .await?;
    let again = backend
        .tasks
        .request_reopen(carlos.id(), task_id, Some("Second try".to_owned()))
        .await?;

    let request = rejected
        .task
        .reopen_request()
        .ok_or_else(|| eyre::eyre!("reopen request should be kept"))?;
    assert_eq!(request.status(), ReopenStatus::Rejected);
    assert_eq!(request.rejection_reason(), Some("Out of scope"));
    assert_eq!(rejected.task.status(), TaskStatus::Finalized);
    assert!(again.task.has_pending_reopen());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_assignee_leaves_an_empty_summary(backend: Backend) -> Result<(), eyre::Report> {
    let lucia = backend.register("Lucia", "TeamLeader").await?;
    let carlos = backend.register("Carlos", "colaborador").await?;
    backend.assign(lucia.id(), carlos.id(), "Inventory").await?;

    backend.accounts.delete(carlos.id()).await?;
    let created = backend.tasks.list_created(lucia.id(), None, None).await?;

    assert_eq!(created.len(), 1);
    assert!(created.first().is_some_and(|view| view.assignee.is_none()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn administrators_cannot_assign_tasks(backend: Backend) -> Result<(), eyre::Report> {
    let ada = backend.register("Ada", "administrador").await?;
    let carlos = backend.register("Carlos", "colaborador").await?;

    let result = backend.assign(ada.id(), carlos.id(), "Not allowed").await;

    let err = result.expect_err("administrators should be refused");
    assert!(err.to_string().contains("create Not allowed"));
    let direct = backend
        .tasks
        .create(ada.id(), CreateTaskRequest::new("Direct", "tecnologia", carlos.id()))
        .await;
    assert!(matches!(direct, Err(TaskLifecycleError::Forbidden(_))));
    Ok(())
}
