//! Router tests driven through `tower::ServiceExt::oneshot`.


use crate::auth::{AuthConfig, TokenIssuer};
use crate::http::{AppState, router};
use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::{FixedOffset, Offset, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub(super) struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Bytes,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).expect("response body should be JSON")
    }
}

pub(super) fn app() -> Router {
    app_at(Utc.fix())
}

pub(super) fn app_at(due_offset: FixedOffset) -> Router {
    let tokens = TokenIssuer::new(AuthConfig::with_secret("router-test-secret"));
    router(AppState::in_memory(tokens, due_offset))
}

pub(super) async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
    }
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    Reply {
        status,
        headers,
        bytes,
    }
}

/// Registered account: bearer token and identifier.
pub(super) struct Session {
    pub token: String,
    pub id: String,
}

pub(super) async fn register(app: &Router, name: &str, role: &str) -> Session {
    let reply = send(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": format!("{}@example.com", name.to_ascii_lowercase()),
            "password": "s3cret-pass",
            "role": role,
            "organizacion": "Acme",
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "registration failed");
    let body = reply.json();
    Session {
        token: body["token"].as_str().expect("token present").to_owned(),
        id: body["usuario"]["id_usuario"]
            .as_str()
            .expect("id present")
            .to_owned(),
    }
}

pub(super) async fn create_task(app: &Router, leader: &Session, assignee: &Session) -> String {
    let reply = send(
        app,
        Method::POST,
        "/tareas",
        Some(&leader.token),
        Some(json!({
            "titulo": "T1",
            "area": "tecnologia",
            "colaboradorId": assignee.id,
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "task creation failed");
    reply.json()["tarea"]["id_tarea"]
        .as_str()
        .expect("task id present")
        .to_owned()
}

pub(super) async fn set_status(app: &Router, actor: &Session, task_id: &str, status: &str) -> Reply {
    send(
        app,
        Method::PUT,
        &format!("/tareas/{task_id}"),
        Some(&actor.token),
        Some(json!({ "estado": status })),
    )
    .await
}
