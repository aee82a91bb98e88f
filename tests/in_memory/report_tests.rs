//! In-memory integration tests for spreadsheet exports.

use super::helpers::{Backend, backend};
use flowment::report::{
    adapters::XlsxReportRenderer,
    domain::ReportKind,
    services::{ReportError, ReportService, TaskReportRequest},
};
use flowment::task::domain::TaskStatus;
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

fn exporter(
    backend: &Backend,
) -> ReportService<
    flowment::task::adapters::memory::InMemoryTaskRepository,
    flowment::user::adapters::memory::InMemoryUserRepository,
    DefaultClock,
    XlsxReportRenderer,
> {
    ReportService::new(
        backend.tasks.clone(),
        Arc::clone(&backend.users),
        Arc::new(XlsxReportRenderer::new()),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_export_renders_a_workbook(backend: Backend) -> Result<(), eyre::Report> {
    let lucia = backend.register("Lucia", "TeamLeader").await?;
    let carlos = backend.register("Carlos", "colaborador").await?;
    backend.assign(lucia.id(), carlos.id(), "Payroll").await?;
    backend.assign(lucia.id(), carlos.id(), "Budget").await?;

    let document = exporter(&backend)
        .export_tasks(TaskReportRequest {
            status: Some(TaskStatus::Assigned),
            ..TaskReportRequest::default()
        })
        .await?;

    assert_eq!(document.kind(), ReportKind::Tasks);
    assert!(document.filename().starts_with("reporte_tareas_"));
    assert!(document.bytes().starts_with(b"PK"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_and_collaborator_exports_render(backend: Backend) -> Result<(), eyre::Report> {
    backend.register("Lucia", "TeamLeader").await?;
    backend.register("Carlos", "colaborador").await?;
    let service = exporter(&backend);

    let users = service.export_users(Vec::new()).await?;
    let collaborators = service
        .export_collaborators(Some("Acme".to_owned()))
        .await?;
    let missing = service.export_collaborators(None).await;

    assert!(users.filename().starts_with("usuarios_"));
    assert!(users.bytes().starts_with(b"PK"));
    assert!(collaborators
        .filename()
        .starts_with("informacion-colaboradores-"));
    assert!(matches!(missing, Err(ReportError::InvalidInput(_))));
    Ok(())
}
