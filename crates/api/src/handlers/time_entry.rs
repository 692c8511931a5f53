//! Handlers for time entries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use staffledger_core::dates::{parse_period, INVALID_DATE_FORMAT};
use staffledger_core::types::DbId;
use staffledger_core::validation::validate_hours;
use staffledger_db::models::time_entry::{CreateTimeEntry, TimeEntry, TimeEntryFilter};
use staffledger_db::repositories::TimeEntryRepo;

use crate::error::AppResult;
use crate::handlers::ensure_project_exists;
use crate::query::DateRangeParams;
use crate::state::AppState;

/// GET /api/v1/tasks/time-entries?task_id=&user_id=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<TimeEntryFilter>,
) -> AppResult<Json<Vec<TimeEntry>>> {
    let entries = TimeEntryRepo::list(&state.pool, &filter).await?;
    Ok(Json(entries))
}

/// POST /api/v1/tasks/time-entries
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTimeEntry>,
) -> AppResult<(StatusCode, Json<TimeEntry>)> {
    validate_hours(input.hours, "hours")?;
    let entry = TimeEntryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        time_entry_id = entry.id,
        task_id = entry.task_id,
        user_id = entry.user_id,
        hours = entry.hours,
        "Time logged"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/projects/{id}/users/{user_id}/time-entries?start_date=&end_date=
pub async fn list_for_user_in_project(
    State(state): State<AppState>,
    Path((project_id, user_id)): Path<(DbId, DbId)>,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<Vec<TimeEntry>>> {
    let (start, end) = parse_period(&params.start_date, &params.end_date, INVALID_DATE_FORMAT)?;
    ensure_project_exists(&state.pool, project_id).await?;

    let entries =
        TimeEntryRepo::list_for_user_in_project(&state.pool, project_id, user_id, start, end)
            .await?;
    Ok(Json(entries))
}
