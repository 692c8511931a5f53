//! Route definitions for the `/tasks` resource.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::{assignment, staffing, task, time_entry};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                                         -> list (?phase_id= | ?user_id=)
/// POST   /                                         -> create
/// GET    /assignments                              -> assignment::list (?task_id= | ?user_id=)
/// GET    /time-entries                             -> time_entry::list (?task_id=&user_id=)
/// POST   /time-entries                             -> time_entry::create
///
/// PUT    /{task_id}/assignments                    -> assignment::merge_by_user
/// GET    /{task_id}/contributors                   -> assignment::list_contributors
/// PUT    /{task_id}/contributors                   -> assignment::merge_contributors
/// PATCH  /{task_id}/actual-spend                   -> task::recompute_actual_spend
/// PATCH  /{task_id}/users/{user_id}/total-hours    -> staffing::sync_total_hours
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route("/assignments", get(assignment::list))
        .route("/time-entries", get(time_entry::list).post(time_entry::create))
        .route("/{task_id}/assignments", put(assignment::merge_by_user))
        .route(
            "/{task_id}/contributors",
            get(assignment::list_contributors).put(assignment::merge_contributors),
        )
        .route("/{task_id}/actual-spend", patch(task::recompute_actual_spend))
        .route(
            "/{task_id}/users/{user_id}/total-hours",
            patch(staffing::sync_total_hours),
        )
}
