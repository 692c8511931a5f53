//! HTTP tests for projects, staffing and phases.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Project CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        json!({
            "name": "Apollo",
            "client_name": "Acme",
            "start_date": "2025-03-03",
            "end_date": "2025-03-30",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Apollo");
    assert_eq!(json["start_date"], "2025-03-03");
    assert_eq!(json["started"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_with_bad_date_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        json!({
            "name": "Apollo",
            "client_name": "Acme",
            "start_date": "03/03/2025",
            "end_date": "2025-03-30",
        }),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_update_and_list_project(pool: PgPool) {
    let id = common::create_project(&pool, "Apollo").await;

    let response = get(common::build_test_app(pool.clone()), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{id}"),
        json!({"started": true, "client_name": "Globex"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["started"], true);
    assert_eq!(json["client_name"], "Globex");
    assert_eq!(json["name"], "Apollo");

    let list = body_json(get(common::build_test_app(pool), "/api/v1/projects").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_project_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        common::build_test_app(pool.clone()),
        "/api/v1/projects/999999",
        json!({"name": "Nope"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(common::build_test_app(pool), "/api/v1/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_project_cascades(pool: PgPool) {
    let id = common::create_project(&pool, "Apollo").await;
    let user = common::create_user(&pool, "ana@example.com", "Ana").await;
    let phase = common::create_phase(&pool, id, "Build").await;
    let task = common::create_task(&pool, phase, "API").await;
    common::log_hours(&pool, task, user, "2025-03-04", 3.0, true).await;

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool.clone()), &format!("/api/v1/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let entries = body_json(
        get(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/tasks/time-entries?task_id={task}"),
        )
        .await,
    )
    .await;
    assert!(entries.as_array().unwrap().is_empty());

    let tasks = body_json(
        get(common::build_test_app(pool), &format!("/api/v1/tasks?phase_id={phase}")).await,
    )
    .await;
    assert!(tasks.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Staffing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staffing_merge_and_users_and_staffing(pool: PgPool) {
    let id = common::create_project(&pool, "Apollo").await;
    let ana = common::create_user(&pool, "ana@example.com", "Ana").await;
    let uri = format!("/api/v1/projects/{id}/staffing");

    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!([{
            "user_id": ana,
            "role_name": "Lead",
            "hourly_rate": 120,
            "forecast_hours_initial": 40.0,
            "forecast_hours_remaining": 40.0,
        }]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    let staffing_id = rows[0]["id"].as_i64().unwrap();
    assert_eq!(rows[0]["project_id"], id);

    // Update by id; a parent id in the body is ignored.
    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!([{
            "staffing_id": staffing_id,
            "project_id": 999,
            "user_id": ana,
            "role_name": "Principal",
            "hourly_rate": 150,
            "forecast_hours_initial": 60.0,
            "forecast_hours_remaining": 60.0,
        }]),
    )
    .await;
    let rows = body_json(response).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["role_name"], "Principal");
    assert_eq!(rows[0]["project_id"], id);

    let pairs = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/projects/{id}/users-and-staffing"),
        )
        .await,
    )
    .await;
    assert_eq!(pairs[0]["user"]["name"], "Ana");
    assert_eq!(pairs[0]["staffing"]["hourly_rate"], 150);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staffing_rejects_negative_rate(pool: PgPool) {
    let id = common::create_project(&pool, "Apollo").await;
    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{id}/staffing"),
        json!([{
            "user_id": 1,
            "role_name": "Lead",
            "hourly_rate": -5,
            "forecast_hours_initial": 40.0,
            "forecast_hours_remaining": 40.0,
        }]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staffing_of_unknown_project_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/projects/4242/staffing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_phase_merge_returns_201_with_all_phases(pool: PgPool) {
    let id = common::create_project(&pool, "Apollo").await;
    let plan = common::create_phase(&pool, id, "Plan").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{id}/phases"),
        json!([
            {"phase_id": plan, "phase_name": "Discovery", "start_date": "2025-03-03", "end_date": "2025-03-09"},
            {"phase_name": "Build", "start_date": "2025-03-10", "end_date": "2025-03-30"},
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let phases = body_json(response).await;
    let phases = phases.as_array().unwrap();
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0]["id"], plan);
    assert_eq!(phases[0]["phase_name"], "Discovery");

    let listed = body_json(
        get(common::build_test_app(pool), &format!("/api/v1/projects/{id}/phases")).await,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_phase_ending_before_start_rejected(pool: PgPool) {
    let id = common::create_project(&pool, "Apollo").await;
    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{id}/phases"),
        json!([{"phase_name": "Backwards", "start_date": "2025-03-10", "end_date": "2025-03-01"}]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
