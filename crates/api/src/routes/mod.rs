pub mod auth;
pub mod health;
pub mod invoice;
pub mod project;
pub mod task;
pub mod user;

use axum::routing::put;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /login                                            login
/// /users                                            list, create
/// /projects                                         project CRUD, staffing, phases, reports
/// /tasks                                            tasks, assignments, time entries, rollups
/// /invoices                                         record an invoice
/// /dynamic-staffing-adjustment                      decrement remaining forecast (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", user::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .nest("/invoices", invoice::router())
        .route(
            "/dynamic-staffing-adjustment",
            put(handlers::staffing::dynamic_adjustment),
        )
}
