//! Shared fixtures for in-memory integration tests.

use flowment::{
    auth::{AuthConfig, TokenIssuer},
    task::{
        adapters::memory::InMemoryTaskRepository,
        services::{CreateTaskRequest, TaskLifecycleService},
    },
    user::{
        adapters::memory::InMemoryUserRepository,
        domain::{User, UserId},
        services::{RegisterUserRequest, UserAccountService},
    },
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Account service over the shared in-memory store.
pub type Accounts = UserAccountService<InMemoryUserRepository, DefaultClock>;

/// Task service over the shared in-memory stores.
pub type Tasks = TaskLifecycleService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;

/// Services wired over one pair of stores.
pub struct Backend {
    pub users: Arc<InMemoryUserRepository>,
    pub accounts: Accounts,
    pub tasks: Tasks,
}

/// Provides fresh services for each test.
#[fixture]
pub fn backend() -> Backend {
    let users = Arc::new(InMemoryUserRepository::new());
    let tasks_repo = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);
    let tokens = TokenIssuer::new(AuthConfig::with_secret("integration-secret"));

    Backend {
        accounts: UserAccountService::new(Arc::clone(&users), tokens, Arc::clone(&clock)),
        tasks: TaskLifecycleService::new(tasks_repo, Arc::clone(&users), clock),
        users,
    }
}

impl Backend {
    /// Registers an account in organization `Acme`.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn register(&self, name: &str, role: &str) -> Result<User, eyre::Report> {
        let request = RegisterUserRequest::new(
            name,
            format!("{}@acme.test", name.to_ascii_lowercase()),
            "s3cret-pass",
            "Acme",
        )
        .with_role(role);
        let session = self
            .accounts
            .register(request)
            .await
            .map_err(|err| eyre::eyre!("register {name}: {err}"))?;
        Ok(session.user)
    }

    /// Creates a technology task assigned by `leader` to `assignee`.
    ///
    /// # Errors
    ///
    /// Returns an error if creation fails.
    pub async fn assign(
        &self,
        leader: UserId,
        assignee: UserId,
        title: &str,
    ) -> Result<flowment::task::domain::TaskView, eyre::Report> {
        self.tasks
            .create(leader, CreateTaskRequest::new(title, "tecnologia", assignee))
            .await
            .map_err(|err| eyre::eyre!("create {title}: {err}"))
    }
}
