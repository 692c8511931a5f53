//! Handlers for project staffing and the forecast-hours bookkeeping.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use staffledger_core::error::CoreError;
use staffledger_core::types::DbId;
use staffledger_core::validation::{validate_hours, validate_non_blank, validate_non_negative};
use staffledger_db::models::staffing::{ProjectStaffing, StaffingInput, UserWithStaffing};
use staffledger_db::repositories::{StaffingRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_project_exists;
use crate::query::AdjustmentParams;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TotalHoursResponse {
    pub total_hours: f64,
}

#[derive(Debug, Serialize)]
pub struct AdjustmentResponse {
    pub message: &'static str,
    /// Staffing rows whose remaining forecast changed.
    pub updated: u64,
}

fn validate_staffing(item: &StaffingInput) -> Result<(), CoreError> {
    validate_non_blank(&item.role_name, "role_name")?;
    validate_non_negative(i64::from(item.hourly_rate), "hourly_rate")?;
    validate_hours(item.forecast_hours_initial, "forecast_hours_initial")?;
    validate_hours(item.forecast_hours_remaining, "forecast_hours_remaining")
}

/// GET /api/v1/projects/{id}/staffing
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectStaffing>>> {
    ensure_project_exists(&state.pool, project_id).await?;
    let rows = StaffingRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(rows))
}

/// PUT /api/v1/projects/{id}/staffing
///
/// Merges the list by `staffing_id` and returns the project's staffing.
pub async fn merge(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(items): Json<Vec<StaffingInput>>,
) -> AppResult<Json<Vec<ProjectStaffing>>> {
    items.iter().try_for_each(validate_staffing)?;
    ensure_project_exists(&state.pool, project_id).await?;

    let rows = StaffingRepo::merge(&state.pool, project_id, &items).await?;
    tracing::info!(project_id, submitted = items.len(), rows = rows.len(), "Staffing merged");
    Ok(Json(rows))
}

/// GET /api/v1/projects/{id}/users-and-staffing
pub async fn users_and_staffing(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<UserWithStaffing>>> {
    ensure_project_exists(&state.pool, project_id).await?;
    let rows = StaffingRepo::list_with_users(&state.pool, project_id).await?;
    Ok(Json(rows))
}

/// PATCH /api/v1/tasks/{task_id}/users/{user_id}/total-hours
///
/// Totals the user's hours on the task's project and resets their remaining
/// forecast to what is left of the initial forecast.
pub async fn sync_total_hours(
    State(state): State<AppState>,
    Path((task_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TotalHoursResponse>> {
    let total_hours = StaffingRepo::sync_remaining_with_logged(&state.pool, task_id, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Missing("Project not found for given task_id".into()))
        })?;

    tracing::info!(task_id, user_id, total_hours, "Remaining forecast synced");
    Ok(Json(TotalHoursResponse { total_hours }))
}

/// PUT /api/v1/dynamic-staffing-adjustment?task_id=&user_id=&hours=
///
/// Subtracts `hours` from the user's remaining forecast on the task's
/// project, never going below zero.
pub async fn dynamic_adjustment(
    State(state): State<AppState>,
    Query(params): Query<AdjustmentParams>,
) -> AppResult<Json<AdjustmentResponse>> {
    validate_hours(params.hours, "hours")?;
    TaskRepo::find_by_id(&state.pool, params.task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: params.task_id,
        }))?;

    let updated =
        StaffingRepo::decrement_remaining(&state.pool, params.task_id, params.user_id, params.hours)
            .await?;

    tracing::info!(
        task_id = params.task_id,
        user_id = params.user_id,
        hours = params.hours,
        updated,
        "Forecast hours decremented"
    );
    Ok(Json(AdjustmentResponse {
        message: "Forecast hours updated successfully",
        updated,
    }))
}
