//! Handlers for task assignments (a.k.a. task contributors).

use axum::extract::{Path, Query, State};
use axum::Json;
use staffledger_core::error::CoreError;
use staffledger_core::types::DbId;
use staffledger_core::validation::validate_non_negative;
use staffledger_db::models::task_assignment::{AssignmentInput, TaskAssignment};
use staffledger_db::repositories::{TaskAssignmentRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::query::AssignmentListParams;
use crate::state::AppState;

fn validate_rates(items: &[AssignmentInput]) -> Result<(), CoreError> {
    items
        .iter()
        .try_for_each(|i| validate_non_negative(i64::from(i.hourly_rate), "hourly_rate"))
}

async fn ensure_task_exists(state: &AppState, task_id: DbId) -> AppResult<()> {
    TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))
}

/// GET /api/v1/tasks/assignments?task_id= | ?user_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AssignmentListParams>,
) -> AppResult<Json<Vec<TaskAssignment>>> {
    let rows = match (params.task_id, params.user_id) {
        (Some(task_id), _) => TaskAssignmentRepo::list_by_task(&state.pool, task_id).await?,
        (None, Some(user_id)) => TaskAssignmentRepo::list_by_user(&state.pool, user_id).await?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either task_id or user_id is required".into(),
            ))
        }
    };
    Ok(Json(rows))
}

/// PUT /api/v1/tasks/{task_id}/assignments
///
/// Matches by assignment id, then by user; new users are inserted.
pub async fn merge_by_user(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Json(items): Json<Vec<AssignmentInput>>,
) -> AppResult<Json<Vec<TaskAssignment>>> {
    validate_rates(&items)?;
    ensure_task_exists(&state, task_id).await?;

    let rows = TaskAssignmentRepo::merge_by_user(&state.pool, task_id, &items).await?;
    tracing::info!(task_id, submitted = items.len(), rows = rows.len(), "Task assignments merged");
    Ok(Json(rows))
}

/// GET /api/v1/tasks/{task_id}/contributors
pub async fn list_contributors(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<Vec<TaskAssignment>>> {
    let rows = TaskAssignmentRepo::list_by_task(&state.pool, task_id).await?;
    Ok(Json(rows))
}

/// PUT /api/v1/tasks/{task_id}/contributors
///
/// Merges by assignment id only; assigning a user twice is a 409.
pub async fn merge_contributors(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Json(items): Json<Vec<AssignmentInput>>,
) -> AppResult<Json<Vec<TaskAssignment>>> {
    validate_rates(&items)?;
    ensure_task_exists(&state, task_id).await?;

    let rows = TaskAssignmentRepo::merge_by_id(&state.pool, task_id, &items).await?;
    tracing::info!(task_id, submitted = items.len(), rows = rows.len(), "Task contributors merged");
    Ok(Json(rows))
}
