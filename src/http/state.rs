//! Shared application state handed to every handler.

use crate::auth::TokenIssuer;
use crate::report::{adapters::XlsxReportRenderer, ports::ReportRenderer, services::ReportService};
use crate::task::{
    adapters::memory::InMemoryTaskRepository, ports::TaskRepository,
    services::TaskLifecycleService,
};
use crate::user::{
    adapters::memory::InMemoryUserRepository, ports::UserRepository,
    services::UserAccountService,
};
use chrono::{DateTime, FixedOffset};
use mockable::DefaultClock;
use std::sync::Arc;

/// Account service over injected stores.
pub type AccountService = UserAccountService<dyn UserRepository, DefaultClock>;

/// Task lifecycle service over injected stores.
pub type TaskService = TaskLifecycleService<dyn TaskRepository, dyn UserRepository, DefaultClock>;

/// Report service over injected stores and renderer.
pub type ExportService =
    ReportService<dyn TaskRepository, dyn UserRepository, DefaultClock, dyn ReportRenderer>;

/// Services shared by the request handlers.
#[derive(Clone)]
pub struct AppState {
    accounts: AccountService,
    tasks: TaskService,
    reports: ExportService,
}

impl AppState {
    /// Wires the services over the given stores, reading due dates at
    /// `due_offset`.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        users: Arc<dyn UserRepository>,
        tokens: TokenIssuer,
        due_offset: FixedOffset,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        let renderer: Arc<dyn ReportRenderer> = Arc::new(XlsxReportRenderer::new());
        let lifecycle = TaskLifecycleService::new(tasks, Arc::clone(&users), Arc::clone(&clock))
            .with_due_offset(due_offset);
        let reports = ReportService::new(lifecycle.clone(), Arc::clone(&users), renderer);

        Self {
            accounts: UserAccountService::new(users, tokens, clock),
            tasks: lifecycle,
            reports,
        }
    }

    /// Wires the services over fresh in-memory stores.
    #[must_use]
    pub fn in_memory(tokens: TokenIssuer, due_offset: FixedOffset) -> Self {
        Self::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            tokens,
            due_offset,
        )
    }

    /// Returns the account service.
    #[must_use]
    pub const fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    /// Returns the task lifecycle service.
    #[must_use]
    pub const fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    /// Returns the report service.
    #[must_use]
    pub const fn reports(&self) -> &ExportService {
        &self.reports
    }

    /// Returns the bearer-token issuer.
    #[must_use]
    pub const fn tokens(&self) -> &TokenIssuer {
        self.accounts.tokens()
    }

    /// Returns the current time at the due-date offset.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.tasks.now()
    }
}
