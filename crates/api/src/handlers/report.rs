//! Handlers for the utilization grid and the project spend rollups.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use staffledger_core::dates::parse_period;
use staffledger_core::error::CoreError;
use staffledger_core::money::round2;
use staffledger_core::types::DbId;
use staffledger_core::utilization::{
    actuals_range, build_grid, validate_window, ProjectSpan, StaffedUser, UtilizationRow,
    INVALID_WINDOW,
};
use staffledger_db::repositories::{ProjectRepo, ReportRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_project_exists;
use crate::query::UtilizationParams;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TotalSpendResponse {
    pub total_project_spent: f64,
}

#[derive(Debug, Serialize)]
pub struct ForecastCostResponse {
    pub total_project_forecast: f64,
}

/// GET /api/v1/projects/{id}/utilization?start=&end=
///
/// One row per staffed user per week of the window. Planned hours are the
/// user's forecast spread evenly over the project's weeks.
pub async fn utilization(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<UtilizationParams>,
) -> AppResult<Json<Vec<UtilizationRow>>> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    let (start, end) = parse_period(&params.start, &params.end, INVALID_WINDOW)?;
    validate_window(start, end)?;

    let staffed: Vec<StaffedUser> = ReportRepo::staffed_users(&state.pool, project_id)
        .await?
        .into_iter()
        .map(StaffedUser::from)
        .collect();
    if staffed.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let (from, to) = actuals_range(start, end);
    let actuals: HashMap<(DbId, _), f64> = ReportRepo::weekly_actuals(&state.pool, project_id, from, to)
        .await?
        .into_iter()
        .map(|row| ((row.user_id, row.week_start), row.actual_hours))
        .collect();

    let span = ProjectSpan::new(project.start_date, project.end_date);
    let rows = build_grid(project_id, &span, start, end, &staffed, &actuals);

    tracing::debug!(project_id, %start, %end, rows = rows.len(), "Utilization computed");
    Ok(Json(rows))
}

/// GET /api/v1/projects/{id}/total-spend
pub async fn total_spend(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<TotalSpendResponse>> {
    ensure_project_exists(&state.pool, project_id).await?;
    let spent = ReportRepo::project_total_spend(&state.pool, project_id).await?;
    Ok(Json(TotalSpendResponse {
        total_project_spent: round2(spent),
    }))
}

/// GET /api/v1/projects/{id}/forecast-cost
pub async fn forecast_cost(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ForecastCostResponse>> {
    ensure_project_exists(&state.pool, project_id).await?;
    let forecast = ReportRepo::project_forecast_cost(&state.pool, project_id).await?;
    Ok(Json(ForecastCostResponse {
        total_project_forecast: round2(forecast),
    }))
}
