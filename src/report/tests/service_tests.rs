//! Service tests for report selection and document metadata.

use super::user;
use std::sync::Arc;

use crate::report::{
    domain::{ReportKind, XLSX_CONTENT_TYPE},
    ports::{RenderError, renderer::MockReportRenderer},
    services::{ReportError, ReportService, TaskReportRequest},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskStatus,
    services::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest},
};
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{User, UserId, UserRole, UserStatus},
    ports::UserRepository,
};
use mockable::DefaultClock;
use rstest::rstest;

type Lifecycle = TaskLifecycleService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;
type TestService = ReportService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    DefaultClock,
    MockReportRenderer,
>;

struct Fixture {
    users: Arc<InMemoryUserRepository>,
    lifecycle: Lifecycle,
}

impl Fixture {
    fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let lifecycle = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&users),
            Arc::new(DefaultClock),
        );
        Self { users, lifecycle }
    }

    async fn add(&self, name: &str, role: UserRole, organization: &str) -> UserId {
        let account = user(name, role, organization, UserStatus::Active);
        self.users.store(&account).await.expect("store user");
        account.id()
    }

    fn service(&self, renderer: MockReportRenderer) -> TestService {
        ReportService::new(
            self.lifecycle.clone(),
            Arc::clone(&self.users),
            Arc::new(renderer),
        )
    }
}

fn names(users: &[User]) -> Vec<u8> {
    users
        .iter()
        .map(User::name)
        .collect::<Vec<_>>()
        .join(",")
        .into_bytes()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_export_honours_the_id_selection() {
    let fixture = Fixture::new();
    let ana = fixture.add("Ana", UserRole::TeamLeader, "Acme").await;
    fixture.add("Zoe", UserRole::Collaborator, "Acme").await;
    let mut renderer = MockReportRenderer::new();
    renderer
        .expect_render_users()
        .times(1)
        .returning(|users| Ok(names(users)));

    let document = fixture
        .service(renderer)
        .export_users(vec![ana])
        .await
        .expect("export should succeed");

    assert_eq!(document.bytes(), b"Ana");
    assert_eq!(document.kind(), ReportKind::Users);
    assert!(document.filename().starts_with("usuarios_"));
    assert!(document.filename().ends_with(".xlsx"));
    assert_eq!(
        XLSX_CONTENT_TYPE,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn collaborator_export_filters_role_and_organization() {
    let fixture = Fixture::new();
    fixture.add("Zoe", UserRole::Collaborator, "Acme").await;
    fixture.add("Bruno", UserRole::Collaborator, "Acme").await;
    fixture.add("Lia", UserRole::TeamLeader, "Acme").await;
    fixture.add("Eva", UserRole::Collaborator, "Globex").await;
    let mut renderer = MockReportRenderer::new();
    renderer
        .expect_render_collaborators()
        .times(1)
        .returning(|users, _| Ok(names(users)));

    let document = fixture
        .service(renderer)
        .export_collaborators(Some(" Acme ".to_owned()))
        .await
        .expect("export should succeed");

    assert_eq!(document.bytes(), b"Bruno,Zoe");
}

#[rstest]
#[case(None)]
#[case(Some("   "))]
#[tokio::test(flavor = "multi_thread")]
async fn collaborator_export_requires_organization(#[case] organization: Option<&str>) {
    let fixture = Fixture::new();

    let result = fixture
        .service(MockReportRenderer::new())
        .export_collaborators(organization.map(str::to_owned))
        .await;

    assert!(matches!(result, Err(ReportError::InvalidInput(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_export_applies_status_and_assignee_filters() {
    let fixture = Fixture::new();
    let leader = fixture.add("Lia", UserRole::TeamLeader, "Acme").await;
    let zoe = fixture.add("Zoe", UserRole::Collaborator, "Acme").await;
    let bruno = fixture.add("Bruno", UserRole::Collaborator, "Acme").await;
    for (title, assignee) in [("Audit", zoe), ("Deploy", zoe), ("Backup", bruno)] {
        fixture
            .lifecycle
            .create(leader, CreateTaskRequest::new(title, "tecnologia", assignee))
            .await
            .expect("task creation should succeed");
    }
    let started = fixture
        .lifecycle
        .list_received(zoe, None)
        .await
        .expect("listing should succeed")
        .into_iter()
        .find(|view| view.task.title() == "Deploy")
        .expect("task present")
        .task
        .id();
    fixture
        .lifecycle
        .update(
            zoe,
            started,
            UpdateTaskRequest {
                status: Some("en-proceso".to_owned()),
                ..UpdateTaskRequest::default()
            },
        )
        .await
        .expect("start should succeed");
    let mut renderer = MockReportRenderer::new();
    renderer.expect_render_tasks().times(1).returning(|views, _| {
        Ok(views
            .iter()
            .map(|view| view.task.title())
            .collect::<Vec<_>>()
            .join(",")
            .into_bytes())
    });

    let document = fixture
        .service(renderer)
        .export_tasks(TaskReportRequest {
            status: Some(TaskStatus::Assigned),
            assignee: Some(zoe),
            ..TaskReportRequest::default()
        })
        .await
        .expect("export should succeed");

    assert_eq!(document.bytes(), b"Audit");
    assert_eq!(document.kind(), ReportKind::Tasks);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn render_failure_is_surfaced() {
    let fixture = Fixture::new();
    let mut renderer = MockReportRenderer::new();
    renderer.expect_render_users().returning(|_| {
        Err(RenderError::workbook(std::io::Error::other("disk full")))
    });

    let result = fixture.service(renderer).export_users(Vec::new()).await;

    assert!(matches!(result, Err(ReportError::Render(_))));
}
