//! Given steps for task reopen BDD scenarios.

use super::world::{TaskReopenWorld, run_async};
use flowment::task::services::{CreateTaskRequest, UpdateTaskRequest};
use flowment::user::{domain::UserId, services::RegisterUserRequest};
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn register(world: &TaskReopenWorld, name: &str, role: &str) -> Result<UserId, eyre::Report> {
    let request = RegisterUserRequest::new(
        name,
        format!("{}@scenario.test", name.to_ascii_lowercase()),
        "s3cret-pass",
        "Acme",
    )
    .with_role(role);
    let session = run_async(world.accounts.register(request))
        .wrap_err_with(|| format!("register {name} for scenario"))?;
    Ok(session.user.id())
}

#[given(r#"a team leader "{leader}" and a collaborator "{collaborator}""#)]
fn leader_and_collaborator(
    world: &mut TaskReopenWorld,
    leader: String,
    collaborator: String,
) -> Result<(), eyre::Report> {
    let leader_id = register(world, &leader, "TeamLeader")?;
    let collaborator_id = register(world, &collaborator, "colaborador")?;
    world.leader = Some(leader_id);
    world.collaborator = Some(collaborator_id);
    Ok(())
}

#[given(r#"the leader assigned the task "{title}" to the collaborator"#)]
fn leader_assigned_task(world: &mut TaskReopenWorld, title: String) -> Result<(), eyre::Report> {
    let leader = world
        .leader
        .ok_or_else(|| eyre::eyre!("missing team leader in scenario world"))?;
    let collaborator = world
        .collaborator
        .ok_or_else(|| eyre::eyre!("missing collaborator in scenario world"))?;

    let created = run_async(
        world
            .service
            .create(leader, CreateTaskRequest::new(title, "tecnologia", collaborator)),
    )
    .wrap_err("create task for scenario")?;
    world.task = Some(created);
    Ok(())
}

#[given("the collaborator finalized the task")]
fn collaborator_finalized_task(world: &mut TaskReopenWorld) -> Result<(), eyre::Report> {
    let (_, collaborator, task) = world.cast()?;
    let task_id = task.task.id();

    let finalized = run_async(world.service.update(
        collaborator,
        task_id,
        UpdateTaskRequest {
            status: Some("finalizada".to_owned()),
            ..UpdateTaskRequest::default()
        },
    ))
    .wrap_err("finalize task in scenario setup")?;
    world.task = Some(finalized);
    Ok(())
}
