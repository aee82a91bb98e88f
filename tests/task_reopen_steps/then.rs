//! Then steps for task reopen BDD scenarios.

use super::world::TaskReopenWorld;
use flowment::task::{
    domain::{ReopenStatus, TaskStatus},
    services::TaskLifecycleError,
};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskReopenWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let (_, _, view) = world.cast()?;

    if view.task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            view.task.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the reopen request is "{status}""#)]
fn reopen_request_is(world: &TaskReopenWorld, status: String) -> Result<(), eyre::Report> {
    let expected = ReopenStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected reopen status in scenario: {err}"))?;
    let (_, _, view) = world.cast()?;
    let request = view
        .task
        .reopen_request()
        .ok_or_else(|| eyre::eyre!("task has no reopen request"))?;

    eyre::ensure!(
        request.status() == expected,
        "expected reopen request {}, found {}",
        expected.as_str(),
        request.status().as_str()
    );
    Ok(())
}

#[then("the last change is refused as an invalid transition")]
fn refused_as_invalid_transition(world: &TaskReopenWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing step result"))?;

    if !matches!(result, Err(TaskLifecycleError::InvalidTransition(_))) {
        return Err(eyre::eyre!("expected InvalidTransition error, got {result:?}"));
    }
    Ok(())
}

#[then("the last change is refused as a conflict")]
fn refused_as_conflict(world: &TaskReopenWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing step result"))?;

    if !matches!(result, Err(TaskLifecycleError::Conflict(_))) {
        return Err(eyre::eyre!("expected Conflict error, got {result:?}"));
    }
    Ok(())
}
