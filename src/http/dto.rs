//! JSON bodies in the wire vocabulary of the public API.

use crate::report::services::TaskReportRequest;
use crate::task::{
    domain::{ReopenDecision, ReopenRequest, Schedule, TaskId, TaskStatus, TaskView},
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use crate::user::{
    domain::{Area, DocumentType, User, UserId, UserRole, UserStatus, UserSummary},
    services::{RegisterUserRequest, UpdateUserRequest},
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Plain `{ message }` acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageBody {
    /// Creates an acknowledgement.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Account as returned to clients. The password hash is never exposed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    /// Identifier.
    #[serde(rename = "id_usuario")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Role.
    #[serde(rename = "rol")]
    pub role: UserRole,
    /// Document type.
    #[serde(rename = "tipoDocumento")]
    pub document_type: Option<DocumentType>,
    /// Document number.
    #[serde(rename = "numeroDocumento")]
    pub document_number: Option<String>,
    /// Organization.
    #[serde(rename = "organizacion")]
    pub organization: String,
    /// Business area.
    pub area: Option<Area>,
    /// Account status.
    #[serde(rename = "estado")]
    pub status: UserStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_owned(),
            email: user.email().as_str().to_owned(),
            role: user.role(),
            document_type: user.document_type(),
            document_number: user.document_number().map(str::to_owned),
            organization: user.organization().to_owned(),
            area: user.area(),
            status: user.status(),
            created_at: user.created_at(),
        }
    }
}

/// `{ message, token, usuario }` returned by register and login.
#[derive(Debug, Clone, Serialize)]
pub struct SessionBody {
    /// Outcome message.
    pub message: String,
    /// Bearer token.
    pub token: String,
    /// Signed-in account.
    pub usuario: UserBody,
}

/// `{ message, usuario }` returned by account updates.
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    /// Outcome message.
    pub message: String,
    /// Updated account.
    pub usuario: UserBody,
}

/// Person shown next to a task.
#[derive(Debug, Clone, Serialize)]
pub struct PersonBody {
    /// Identifier.
    pub id_usuario: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Document number.
    #[serde(rename = "numeroDocumento", skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
}

impl From<UserSummary> for PersonBody {
    fn from(summary: UserSummary) -> Self {
        Self {
            id_usuario: summary.id,
            name: summary.name,
            email: summary.email.as_str().to_owned(),
            document_number: summary.document_number,
        }
    }
}

/// Observation log entry as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ObservationBody {
    /// Author.
    pub autor: UserId,
    /// Text.
    pub texto: String,
    /// Recorded at.
    pub fecha: DateTime<Utc>,
}

/// Task as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBody {
    /// Identifier.
    #[serde(rename = "id_tarea")]
    pub id: TaskId,
    /// Title.
    pub titulo: String,
    /// Description.
    pub descripcion: Option<String>,
    /// Business area.
    pub area: Area,
    /// Effective status.
    pub estado: TaskStatus,
    /// Assignment date.
    pub fecha_asignacion: Option<NaiveDate>,
    /// Assignment time.
    pub hora_asignacion: Option<NaiveTime>,
    /// Due date.
    pub fecha_vencimiento: Option<NaiveDate>,
    /// Due time.
    pub hora_vencimiento: Option<NaiveTime>,
    /// Finalization summary.
    pub resumen_finalizacion: Option<String>,
    /// Latest observation text.
    pub observacion: Option<String>,
    /// Full observation log, oldest first.
    pub observaciones: Vec<ObservationBody>,
    /// Reopen request, if one was ever raised.
    pub solicitud_reapertura: Option<ReopenRequest>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Assignee.
    pub colaborador: Option<PersonBody>,
    /// Creator.
    pub creador: Option<PersonBody>,
}

impl TaskBody {
    /// Projects a resolved task as seen at `now`.
    #[must_use]
    pub fn from_view(view: TaskView, now: DateTime<FixedOffset>) -> Self {
        let TaskView {
            task,
            assignee,
            creator,
        } = view;
        let schedule = *task.schedule();

        Self {
            id: task.id(),
            titulo: task.title().to_owned(),
            descripcion: task.description().map(str::to_owned),
            area: task.area(),
            estado: task.effective_status(now),
            fecha_asignacion: schedule.assigned_on,
            hora_asignacion: schedule.assigned_at,
            fecha_vencimiento: schedule.due_on,
            hora_vencimiento: schedule.due_at,
            resumen_finalizacion: task.finalization_summary().map(str::to_owned),
            observacion: task.latest_observation().map(|entry| entry.text.clone()),
            observaciones: task
                .observations()
                .iter()
                .map(|entry| ObservationBody {
                    autor: entry.author,
                    texto: entry.text.clone(),
                    fecha: entry.recorded_at,
                })
                .collect(),
            solicitud_reapertura: task.reopen_request().cloned(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            colaborador: assignee.map(PersonBody::from),
            creador: creator.map(PersonBody::from),
        }
    }

    /// Projects a list of resolved tasks as seen at `now`.
    #[must_use]
    pub fn from_views(views: Vec<TaskView>, now: DateTime<FixedOffset>) -> Vec<Self> {
        views
            .into_iter()
            .map(|view| Self::from_view(view, now))
            .collect()
    }
}

/// `{ message, tarea }` returned by task mutations.
#[derive(Debug, Clone, Serialize)]
pub struct TaskEnvelope {
    /// Outcome message.
    pub message: String,
    /// Task after the change.
    pub tarea: TaskBody,
}

/// Registration form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    /// Display name.
    pub name: Option<String>,
    /// Login email.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
    /// Requested role.
    #[serde(alias = "rol")]
    pub role: Option<String>,
    /// Document type.
    pub tipo_documento: Option<String>,
    /// Document number.
    pub numero_documento: Option<String>,
    /// Organization.
    pub organizacion: Option<String>,
    /// Business area.
    pub area: Option<String>,
}

impl From<RegisterBody> for RegisterUserRequest {
    fn from(body: RegisterBody) -> Self {
        let mut request =
            Self::from_parts(body.name, body.email, body.password, body.organizacion);
        if let Some(role) = body.role {
            request = request.with_role(role);
        }
        if let Some(document_type) = body.tipo_documento {
            request = request.with_document_type(document_type);
        }
        if let Some(document_number) = body.numero_documento {
            request = request.with_document_number(document_number);
        }
        if let Some(area) = body.area {
            request = request.with_area(area);
        }
        request
    }
}

/// Sign-in form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginBody {
    /// Login email.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
}

/// Partial account update. An empty `numeroDocumento` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    /// Display name.
    pub name: Option<String>,
    /// Login email.
    pub email: Option<String>,
    /// Document type.
    pub tipo_documento: Option<String>,
    /// Document number.
    pub numero_documento: Option<String>,
    /// Role.
    pub rol: Option<String>,
    /// Organization.
    pub organizacion: Option<String>,
    /// Account status.
    pub estado: Option<String>,
    /// Business area.
    pub area: Option<String>,
}

impl From<UpdateUserBody> for UpdateUserRequest {
    fn from(body: UpdateUserBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            document_type: body.tipo_documento,
            document_number: body
                .numero_documento
                .map(|value| Some(value).filter(|number| !number.trim().is_empty())),
            role: body.rol,
            organization: body.organizacion,
            status: body.estado,
            area: body.area,
        }
    }
}

/// Collaborator lookup query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationQuery {
    /// Organization name.
    pub organizacion: Option<String>,
}

/// Task creation form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Title.
    pub titulo: Option<String>,
    /// Description.
    pub descripcion: Option<String>,
    /// Business area.
    pub area: Option<String>,
    /// Assignee.
    pub colaborador_id: Option<UserId>,
    /// Assignment date.
    pub fecha_asignacion: Option<NaiveDate>,
    /// Assignment time.
    pub hora_asignacion: Option<NaiveTime>,
    /// Due date.
    pub fecha_vencimiento: Option<NaiveDate>,
    /// Due time.
    pub hora_vencimiento: Option<NaiveTime>,
}

impl From<CreateTaskBody> for CreateTaskRequest {
    fn from(body: CreateTaskBody) -> Self {
        let schedule = Schedule {
            assigned_on: body.fecha_asignacion,
            assigned_at: body.hora_asignacion,
            due_on: body.fecha_vencimiento,
            due_at: body.hora_vencimiento,
        };
        let request = Self::from_parts(body.titulo, body.area, body.colaborador_id)
            .with_schedule(schedule);
        match body.descripcion {
            Some(description) => request.with_description(description),
            None => request,
        }
    }
}

/// Task update form; which fields apply depends on the caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    /// Title.
    pub titulo: Option<String>,
    /// Description.
    pub descripcion: Option<String>,
    /// Business area.
    pub area: Option<String>,
    /// Assignee.
    pub colaborador_id: Option<UserId>,
    /// Assignment date.
    pub fecha_asignacion: Option<NaiveDate>,
    /// Assignment time.
    pub hora_asignacion: Option<NaiveTime>,
    /// Due date.
    pub fecha_vencimiento: Option<NaiveDate>,
    /// Due time.
    pub hora_vencimiento: Option<NaiveTime>,
    /// Requested status.
    pub estado: Option<String>,
    /// Finalization summary.
    pub resumen_finalizacion: Option<String>,
}

impl From<UpdateTaskBody> for UpdateTaskRequest {
    fn from(body: UpdateTaskBody) -> Self {
        Self {
            title: body.titulo,
            description: body.descripcion,
            area: body.area,
            assignee: body.colaborador_id,
            assigned_on: body.fecha_asignacion,
            assigned_at: body.hora_asignacion,
            due_on: body.fecha_vencimiento,
            due_at: body.hora_vencimiento,
            status: body.estado,
            finalization_summary: body.resumen_finalizacion,
        }
    }
}

/// Task listing query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    /// Effective status to match.
    pub estado: Option<String>,
    /// Assignee to match.
    pub colaborador_id: Option<UserId>,
}

/// Parses an optional status filter; blank means no filter.
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] for unknown statuses.
pub fn status_filter(raw: Option<&str>) -> Result<Option<TaskStatus>, ApiError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            TaskStatus::try_from(value).map_err(|err| ApiError::BadRequest(err.to_string()))
        })
        .transpose()
}

/// Observation form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationForm {
    /// Note text.
    pub observacion: Option<String>,
}

/// Reopen request form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReopenForm {
    /// Why the task should be reopened.
    pub motivo: Option<String>,
}

/// Answer to a reopen request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReopenAnswerForm {
    /// `true` approves, `false` rejects.
    pub aprobada: Option<bool>,
    /// Rejection reason.
    pub razon: Option<String>,
    /// New due date on approval.
    pub nueva_fecha_vencimiento: Option<NaiveDate>,
    /// New due time on approval.
    pub nueva_hora_vencimiento: Option<NaiveTime>,
}

impl TryFrom<ReopenAnswerForm> for ReopenDecision {
    type Error = ApiError;

    fn try_from(form: ReopenAnswerForm) -> Result<Self, ApiError> {
        match form.aprobada {
            Some(true) => Ok(Self::Approve {
                due_on: form.nueva_fecha_vencimiento,
                due_at: form.nueva_hora_vencimiento,
            }),
            Some(false) => Ok(Self::Reject { reason: form.razon }),
            None => Err(ApiError::BadRequest("aprobada is required".to_owned())),
        }
    }
}

/// User export selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserExportForm {
    /// Users to export; empty exports everyone.
    #[serde(default)]
    pub usuarios: Vec<UserId>,
}

/// Collaborator export selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollaboratorExportForm {
    /// Organization to export.
    pub organizacion: Option<String>,
}

/// Task export selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskExportForm {
    /// Tasks to export; empty exports every task.
    #[serde(default)]
    pub tareas: Vec<TaskId>,
    /// Additional filters.
    #[serde(default)]
    pub filtros: TaskQuery,
}

impl TryFrom<TaskExportForm> for TaskReportRequest {
    type Error = ApiError;

    fn try_from(form: TaskExportForm) -> Result<Self, ApiError> {
        Ok(Self {
            ids: form.tareas,
            status: status_filter(form.filtros.estado.as_deref())?,
            assignee: form.filtros.colaborador_id,
        })
    }
}
