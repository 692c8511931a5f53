//! Handlers for project phases.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use staffledger_core::error::CoreError;
use staffledger_core::types::DbId;
use staffledger_core::validation::validate_non_blank;
use staffledger_db::models::phase::{PhaseInput, ProjectPhase};
use staffledger_db::repositories::PhaseRepo;

use crate::error::AppResult;
use crate::handlers::ensure_project_exists;
use crate::state::AppState;

fn validate_phase(item: &PhaseInput) -> Result<(), CoreError> {
    validate_non_blank(&item.phase_name, "phase_name")?;
    if item.end_date < item.start_date {
        return Err(CoreError::Validation(format!(
            "phase '{}' ends before it starts",
            item.phase_name
        )));
    }
    Ok(())
}

/// GET /api/v1/projects/{id}/phases
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectPhase>>> {
    ensure_project_exists(&state.pool, project_id).await?;
    let phases = PhaseRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(phases))
}

/// POST /api/v1/projects/{id}/phases
///
/// Merges the list by `phase_id` and returns the project's phases.
pub async fn merge(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(items): Json<Vec<PhaseInput>>,
) -> AppResult<(StatusCode, Json<Vec<ProjectPhase>>)> {
    items.iter().try_for_each(validate_phase)?;
    ensure_project_exists(&state.pool, project_id).await?;

    let phases = PhaseRepo::merge(&state.pool, project_id, &items).await?;
    tracing::info!(project_id, submitted = items.len(), phases = phases.len(), "Phases merged");
    Ok((StatusCode::CREATED, Json(phases)))
}
