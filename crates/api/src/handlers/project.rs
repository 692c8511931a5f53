//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use staffledger_core::error::CoreError;
use staffledger_core::types::DbId;
use staffledger_core::validation::validate_non_blank;
use staffledger_db::models::project::{CreateProject, Project, UpdateProject};
use staffledger_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_non_blank(&input.name, "name")?;
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    if let Some(name) = &input.name {
        validate_non_blank(name, "name")?;
    }
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Removes the project together with its phases, tasks, assignments, time
/// entries, staffing and invoices.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    match ProjectRepo::delete_cascade(&state.pool, id).await? {
        Some(summary) => {
            tracing::info!(
                project_id = id,
                time_entries = summary.time_entries,
                task_assignments = summary.task_assignments,
                tasks = summary.tasks,
                phases = summary.phases,
                staffing = summary.staffing,
                invoices = summary.invoices,
                "Project deleted"
            );
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        })),
    }
}
