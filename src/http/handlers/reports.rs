//! Spreadsheet export handlers.

use crate::http::{
    dto::{CollaboratorExportForm, TaskExportForm, UserExportForm},
    error::ApiResult,
    extract::AuthenticatedUser,
    state::AppState,
};
use crate::report::{
    domain::{ReportDocument, XLSX_CONTENT_TYPE},
    services::TaskReportRequest,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

fn attachment(document: ReportDocument) -> Response {
    let disposition = format!("attachment; filename={}", document.filename());
    (
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
            (CONTENT_DISPOSITION, disposition),
        ],
        document.into_bytes(),
    )
        .into_response()
}

/// `POST /auth/usuarios/exportar`
pub async fn export_users(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    payload: Result<Json<UserExportForm>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(form) = payload?;
    let document = state.reports().export_users(form.usuarios).await?;
    Ok(attachment(document))
}

/// `POST /auth/exportar-colaboradores`
pub async fn export_collaborators(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    payload: Result<Json<CollaboratorExportForm>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(form) = payload?;
    let document = state
        .reports()
        .export_collaborators(form.organizacion)
        .await?;
    Ok(attachment(document))
}

/// `POST /reportes/exportar`
pub async fn export_tasks(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    payload: Result<Json<TaskExportForm>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(form) = payload?;
    let request = TaskReportRequest::try_from(form)?;
    let document = state.reports().export_tasks(request).await?;
    Ok(attachment(document))
}
