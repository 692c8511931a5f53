use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                                  -> list (?role=)
/// POST   /                                  -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(user::list).post(user::create))
}
