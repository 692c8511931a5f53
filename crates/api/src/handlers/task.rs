//! Handlers for the `/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use staffledger_core::error::CoreError;
use staffledger_core::types::DbId;
use staffledger_core::validation::{validate_hours, validate_non_blank, validate_non_negative};
use staffledger_db::models::task::{CreateTask, Task};
use staffledger_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::query::TaskListParams;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ActualSpendResponse {
    pub actual_spend: f64,
}

/// GET /api/v1/tasks?phase_id= | ?user_id=
///
/// `phase_id` wins when both are given.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = match (params.phase_id, params.user_id) {
        (Some(phase_id), _) => TaskRepo::list_by_phase(&state.pool, phase_id).await?,
        (None, Some(user_id)) => TaskRepo::list_by_user(&state.pool, user_id).await?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either phase_id or user_id is required".into(),
            ))
        }
    };
    Ok(Json(tasks))
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    validate_non_blank(&input.title, "title")?;
    validate_non_negative(i64::from(input.budget), "budget")?;
    if let Some(spend) = input.actual_spend {
        validate_hours(spend, "actual_spend")?;
    }
    if input.end_date < input.start_date {
        return Err(CoreError::Validation("end_date must not be before start_date".into()).into());
    }

    let task = TaskRepo::create(&state.pool, &input).await?;
    tracing::info!(task_id = task.id, phase_id = task.phase_id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/v1/tasks/{task_id}/actual-spend
///
/// Recomputes the task's spend from logged hours and assignment rates.
pub async fn recompute_actual_spend(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<ActualSpendResponse>> {
    let actual_spend = TaskRepo::recompute_actual_spend(&state.pool, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;

    tracing::info!(task_id, actual_spend, "Task actual spend recomputed");
    Ok(Json(ActualSpendResponse { actual_spend }))
}
