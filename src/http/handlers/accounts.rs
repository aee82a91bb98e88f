//! Account handlers under `/auth`.

use crate::http::{
    dto::{
        LoginBody, MessageBody, OrganizationQuery, RegisterBody, SessionBody, UpdateUserBody,
        UserBody, UserEnvelope,
    },
    error::ApiResult,
    extract::AuthenticatedUser,
    state::AppState,
};
use crate::user::domain::UserId;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::info;

/// `POST /auth/register`
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SessionBody>)> {
    let Json(body) = payload?;
    let session = state.accounts().register(body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionBody {
            message: "Usuario registrado exitosamente".to_owned(),
            token: session.token,
            usuario: UserBody::from(&session.user),
        }),
    ))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginBody>, JsonRejection>,
) -> ApiResult<Json<SessionBody>> {
    let Json(body) = payload?;
    let session = state.accounts().login(body.email, body.password).await?;
    Ok(Json(SessionBody {
        message: "Login exitoso".to_owned(),
        token: session.token,
        usuario: UserBody::from(&session.user),
    }))
}

/// `GET /auth/perfil`
pub async fn profile(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> ApiResult<Json<UserBody>> {
    let user = state.accounts().get(caller.id).await?;
    Ok(Json(UserBody::from(&user)))
}

/// `GET /auth/colaboradores?organizacion=`
pub async fn collaborators(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    query: Result<Query<OrganizationQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<UserBody>>> {
    let Query(params) = query?;
    let users = state.accounts().collaborators(params.organizacion).await?;
    Ok(Json(users.iter().map(UserBody::from).collect()))
}

/// `GET /auth/usuarios`
pub async fn list_users(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
) -> ApiResult<Json<Vec<UserBody>>> {
    let users = state.accounts().list().await?;
    Ok(Json(users.iter().map(UserBody::from).collect()))
}

/// `GET /auth/usuarios/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<UserBody>> {
    let Path(user_id) = id?;
    let user = state.accounts().get(user_id).await?;
    Ok(Json(UserBody::from(&user)))
}

/// `PUT /auth/usuarios/{id}`
pub async fn update_user(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    id: Result<Path<UserId>, PathRejection>,
    payload: Result<Json<UpdateUserBody>, JsonRejection>,
) -> ApiResult<Json<UserEnvelope>> {
    let Path(user_id) = id?;
    let Json(body) = payload?;
    let user = state.accounts().update(user_id, body.into()).await?;
    info!(user_id = %user_id, actor = %caller.id, "account updated over http");
    Ok(Json(UserEnvelope {
        message: "Usuario actualizado exitosamente".to_owned(),
        usuario: UserBody::from(&user),
    }))
}

/// `DELETE /auth/usuarios/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<Json<MessageBody>> {
    let Path(user_id) = id?;
    state.accounts().delete(user_id).await?;
    info!(user_id = %user_id, actor = %caller.id, "account deleted over http");
    Ok(Json(MessageBody::new("Usuario eliminado exitosamente")))
}
