//! When steps for task reopen BDD scenarios.

use super::world::{TaskReopenWorld, run_async};
use flowment::task::{domain::ReopenDecision, services::UpdateTaskRequest};
use rstest_bdd_macros::when;

#[when(r#"the collaborator moves the task to "{status}""#)]
fn collaborator_moves_task(world: &mut TaskReopenWorld, status: String) -> Result<(), eyre::Report> {
    let (_, collaborator, task) = world.cast()?;
    let task_id = task.task.id();

    let result = run_async(world.service.update(
        collaborator,
        task_id,
        UpdateTaskRequest {
            status: Some(status),
            ..UpdateTaskRequest::default()
        },
    ));
    world.record(result);
    Ok(())
}

#[when(r#"the collaborator asks to reopen the task because "{reason}""#)]
fn collaborator_requests_reopen(
    world: &mut TaskReopenWorld,
    reason: String,
) -> Result<(), eyre::Report> {
    let (_, collaborator, task) = world.cast()?;
    let task_id = task.task.id();

    let result = run_async(
        world
            .service
            .request_reopen(collaborator, task_id, Some(reason)),
    );
    world.record(result);
    Ok(())
}

fn answer(world: &mut TaskReopenWorld, decision: ReopenDecision) -> Result<(), eyre::Report> {
    let (leader, _, task) = world.cast()?;
    let task_id = task.task.id();

    let result = run_async(world.service.respond_reopen(leader, task_id, decision));
    world.record(result);
    Ok(())
}

#[when("the leader approves the reopen request")]
fn leader_approves(world: &mut TaskReopenWorld) -> Result<(), eyre::Report> {
    answer(
        world,
        ReopenDecision::Approve {
            due_on: None,
            due_at: None,
        },
    )
}

#[when("the leader rejects the reopen request")]
fn leader_rejects(world: &mut TaskReopenWorld) -> Result<(), eyre::Report> {
    answer(world, ReopenDecision::Reject { reason: None })
}
