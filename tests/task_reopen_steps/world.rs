//! Shared world state for task reopen BDD scenarios.

use std::sync::Arc;

use flowment::auth::{AuthConfig, TokenIssuer};
use flowment::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskView,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use flowment::user::{
    adapters::memory::InMemoryUserRepository, domain::UserId, services::UserAccountService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Task service used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;

/// Account service used by the BDD world.
pub type TestAccountService = UserAccountService<InMemoryUserRepository, DefaultClock>;

/// Scenario world for task reopen behaviour tests.
pub struct TaskReopenWorld {
    pub accounts: TestAccountService,
    pub service: TestTaskService,
    pub leader: Option<UserId>,
    pub collaborator: Option<UserId>,
    pub task: Option<TaskView>,
    pub last_result: Option<Result<TaskView, TaskLifecycleError>>,
}

impl TaskReopenWorld {
    /// Creates a world over empty stores.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let clock = Arc::new(DefaultClock);
        let tokens = TokenIssuer::new(AuthConfig::with_secret("scenario-secret"));

        Self {
            accounts: UserAccountService::new(Arc::clone(&users), tokens, Arc::clone(&clock)),
            service: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                users,
                clock,
            ),
            leader: None,
            collaborator: None,
            task: None,
            last_result: None,
        }
    }

    /// Returns the leader, collaborator and task set up by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when any of them is missing.
    pub fn cast(&self) -> Result<(UserId, UserId, &TaskView), eyre::Report> {
        let leader = self
            .leader
            .ok_or_else(|| eyre::eyre!("missing team leader in scenario world"))?;
        let collaborator = self
            .collaborator
            .ok_or_else(|| eyre::eyre!("missing collaborator in scenario world"))?;
        let task = self
            .task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
        Ok((leader, collaborator, task))
    }

    /// Stores the outcome of a step, keeping the task current on success.
    pub fn record(&mut self, result: Result<TaskView, TaskLifecycleError>) {
        if let Ok(ref updated) = result {
            self.task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskReopenWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskReopenWorld {
    TaskReopenWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
