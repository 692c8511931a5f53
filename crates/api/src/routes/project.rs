//! Route definitions for the `/projects` resource and everything scoped
//! under a single project.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{invoice, phase, project, report, staffing, time_entry};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                         -> list
/// POST   /                                         -> create
/// GET    /{id}                                     -> get_by_id
/// PUT    /{id}                                     -> update
/// DELETE /{id}                                     -> delete (cascades)
///
/// GET    /{id}/staffing                            -> staffing::list
/// PUT    /{id}/staffing                            -> staffing::merge
/// GET    /{id}/users-and-staffing                  -> staffing::users_and_staffing
/// GET    /{id}/phases                              -> phase::list
/// POST   /{id}/phases                              -> phase::merge
/// GET    /{id}/users/{user_id}/time-entries        -> time_entry::list_for_user_in_project
///
/// GET    /{id}/utilization                         -> report::utilization
/// GET    /{id}/total-spend                         -> report::total_spend
/// GET    /{id}/forecast-cost                       -> report::forecast_cost
///
/// GET    /{id}/invoices                            -> invoice::list_by_project
/// GET    /{id}/invoices/preview                    -> invoice::preview
/// POST   /{id}/invoices/generate                   -> invoice::generate
/// GET    /{id}/invoice-table                       -> invoice::table
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/staffing", get(staffing::list).put(staffing::merge))
        .route("/{id}/users-and-staffing", get(staffing::users_and_staffing))
        .route("/{id}/phases", get(phase::list).post(phase::merge))
        .route(
            "/{id}/users/{user_id}/time-entries",
            get(time_entry::list_for_user_in_project),
        )
        .route("/{id}/utilization", get(report::utilization))
        .route("/{id}/total-spend", get(report::total_spend))
        .route("/{id}/forecast-cost", get(report::forecast_cost))
        .route("/{id}/invoices", get(invoice::list_by_project))
        .route("/{id}/invoices/preview", get(invoice::preview))
        .route("/{id}/invoices/generate", post(invoice::generate))
        .route("/{id}/invoice-table", get(invoice::table))
}
