//! Route table.

use super::{
    handlers::{accounts, reports, tasks},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Builds the application router over the shared state.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(accounts::register))
        .route("/auth/login", post(accounts::login))
        .route("/auth/perfil", get(accounts::profile))
        .route("/auth/colaboradores", get(accounts::collaborators))
        .route("/auth/usuarios", get(accounts::list_users))
        .route("/auth/usuarios/exportar", post(reports::export_users))
        .route(
            "/auth/usuarios/{id}",
            get(accounts::get_user)
                .put(accounts::update_user)
                .delete(accounts::delete_user),
        )
        .route(
            "/auth/exportar-colaboradores",
            post(reports::export_collaborators),
        )
        .route("/tareas", get(tasks::list_created).post(tasks::create))
        .route("/tareas/recibidas", get(tasks::list_received))
        .route(
            "/tareas/reaperturas/pendientes",
            get(tasks::pending_reopen_requests),
        )
        .route("/tareas/{id}", get(tasks::get).put(tasks::update))
        .route("/tareas/{id}/observacion", post(tasks::add_observation))
        .route(
            "/tareas/{id}/solicitar-reapertura",
            post(tasks::request_reopen),
        )
        .route(
            "/tareas/{id}/responder-reapertura",
            post(tasks::respond_reopen),
        )
        .route("/reportes/exportar", post(reports::export_tasks))
        .with_state(state)
}
