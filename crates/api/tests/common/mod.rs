#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use staffledger_api::config::ServerConfig;
use staffledger_api::router::build_app_router;
use staffledger_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        min_password_length: 8,
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST a JSON body and return the parsed response, asserting the status.
pub async fn post_ok(pool: &PgPool, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(build_test_app(pool.clone()), uri, body).await;
    assert!(
        response.status().is_success(),
        "POST {uri} failed with {}",
        response.status()
    );
    body_json(response).await
}

/// Create a project spanning March 2025 (Mon 03-03 .. Sun 03-30) and return its id.
pub async fn create_project(pool: &PgPool, name: &str) -> i64 {
    let json = post_ok(
        pool,
        "/api/v1/projects",
        serde_json::json!({
            "name": name,
            "client_name": "Acme",
            "start_date": "2025-03-03",
            "end_date": "2025-03-30",
        }),
    )
    .await;
    json["id"].as_i64().unwrap()
}

/// Create a user and return its id.
pub async fn create_user(pool: &PgPool, email: &str, name: &str) -> i64 {
    let json = post_ok(
        pool,
        "/api/v1/users",
        serde_json::json!({"email": email, "name": name}),
    )
    .await;
    json["id"].as_i64().unwrap()
}

/// Create one phase under a project and return its id.
pub async fn create_phase(pool: &PgPool, project_id: i64, name: &str) -> i64 {
    let json = post_ok(
        pool,
        &format!("/api/v1/projects/{project_id}/phases"),
        serde_json::json!([{
            "phase_name": name,
            "start_date": "2025-03-03",
            "end_date": "2025-03-30",
        }]),
    )
    .await;
    json.as_array()
        .unwrap()
        .iter()
        .find(|p| p["phase_name"] == name)
        .unwrap()["id"]
        .as_i64()
        .unwrap()
}

/// Create a task in a phase and return its id.
pub async fn create_task(pool: &PgPool, phase_id: i64, title: &str) -> i64 {
    let json = post_ok(
        pool,
        "/api/v1/tasks",
        serde_json::json!({
            "phase_id": phase_id,
            "title": title,
            "start_date": "2025-03-03",
            "end_date": "2025-03-14",
            "due_date": "2025-03-14",
            "budget": 2000,
        }),
    )
    .await;
    json["id"].as_i64().unwrap()
}

/// Log hours against a task.
pub async fn log_hours(pool: &PgPool, task_id: i64, user_id: i64, date: &str, hours: f64, billable: bool) {
    post_ok(
        pool,
        "/api/v1/tasks/time-entries",
        serde_json::json!({
            "task_id": task_id,
            "user_id": user_id,
            "work_date": date,
            "hours": hours,
            "is_billable": billable,
        }),
    )
    .await;
}
