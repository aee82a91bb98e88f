//! Task handlers under `/tareas`.

use crate::http::{
    dto::{
        CreateTaskBody, ObservationForm, ReopenAnswerForm, ReopenForm, TaskBody, TaskEnvelope,
        TaskQuery, UpdateTaskBody, status_filter,
    },
    error::ApiResult,
    extract::AuthenticatedUser,
    state::AppState,
};
use crate::task::domain::{ReopenDecision, TaskId, TaskView};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

fn envelope(state: &AppState, message: &str, view: TaskView) -> Json<TaskEnvelope> {
    Json(TaskEnvelope {
        message: message.to_owned(),
        tarea: TaskBody::from_view(view, state.now()),
    })
}

/// `POST /tareas`
pub async fn create(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskEnvelope>)> {
    let Json(body) = payload?;
    let view = state.tasks().create(caller.id, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        envelope(&state, "Tarea creada exitosamente", view),
    ))
}

/// `GET /tareas?estado=&colaboradorId=`
pub async fn list_created(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    query: Result<Query<TaskQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TaskBody>>> {
    let Query(params) = query?;
    let status = status_filter(params.estado.as_deref())?;
    let views = state
        .tasks()
        .list_created(caller.id, status, params.colaborador_id)
        .await?;
    Ok(Json(TaskBody::from_views(views, state.now())))
}

/// `GET /tareas/recibidas?estado=`
pub async fn list_received(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    query: Result<Query<TaskQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TaskBody>>> {
    let Query(params) = query?;
    let status = status_filter(params.estado.as_deref())?;
    let views = state.tasks().list_received(caller.id, status).await?;
    Ok(Json(TaskBody::from_views(views, state.now())))
}

/// `GET /tareas/reaperturas/pendientes`
pub async fn pending_reopen_requests(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> ApiResult<Json<Vec<TaskBody>>> {
    let views = state.tasks().pending_reopen_requests(caller.id).await?;
    Ok(Json(TaskBody::from_views(views, state.now())))
}

/// `GET /tareas/{id}`
pub async fn get(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    id: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<Json<TaskBody>> {
    let Path(task_id) = id?;
    let view = state.tasks().get(task_id).await?;
    Ok(Json(TaskBody::from_view(view, state.now())))
}

/// `PUT /tareas/{id}`
pub async fn update(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    id: Result<Path<TaskId>, PathRejection>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> ApiResult<Json<TaskEnvelope>> {
    let Path(task_id) = id?;
    let Json(body) = payload?;
    let view = state.tasks().update(caller.id, task_id, body.into()).await?;
    Ok(envelope(&state, "Tarea actualizada exitosamente", view))
}

/// `POST /tareas/{id}/observacion`
pub async fn add_observation(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    id: Result<Path<TaskId>, PathRejection>,
    payload: Result<Json<ObservationForm>, JsonRejection>,
) -> ApiResult<Json<TaskEnvelope>> {
    let Path(task_id) = id?;
    let Json(form) = payload?;
    let view = state
        .tasks()
        .add_observation(caller.id, task_id, form.observacion)
        .await?;
    Ok(envelope(&state, "Observación agregada exitosamente", view))
}

/// `POST /tareas/{id}/solicitar-reapertura`
pub async fn request_reopen(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    id: Result<Path<TaskId>, PathRejection>,
    payload: Result<Json<ReopenForm>, JsonRejection>,
) -> ApiResult<Json<TaskEnvelope>> {
    let Path(task_id) = id?;
    let Json(form) = payload?;
    let view = state
        .tasks()
        .request_reopen(caller.id, task_id, form.motivo)
        .await?;
    Ok(envelope(&state, "Solicitud enviada exitosamente", view))
}

/// `POST /tareas/{id}/responder-reapertura`
pub async fn respond_reopen(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    id: Result<Path<TaskId>, PathRejection>,
    payload: Result<Json<ReopenAnswerForm>, JsonRejection>,
) -> ApiResult<Json<TaskEnvelope>> {
    let Path(task_id) = id?;
    let Json(form) = payload?;
    let decision = ReopenDecision::try_from(form)?;
    let message = if decision.is_approval() {
        "Solicitud aprobada"
    } else {
        "Solicitud rechazada"
    };
    let view = state
        .tasks()
        .respond_reopen(caller.id, task_id, decision)
        .await?;
    Ok(envelope(&state, message, view))
}
