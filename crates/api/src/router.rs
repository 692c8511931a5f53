//! The staffledger HTTP application: `/health` at the root, the resource
//! tree from [`routes::api_routes`] under `/api/v1`, and one middleware
//! stack shared by `main.rs` and `tests/common/mod.rs`.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Mount point of the users, projects, tasks, invoices, login and
/// staffing-adjustment routes.
pub const API_PREFIX: &str = "/api/v1";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the staffledger [`Router`].
///
/// Layers wrap outermost-last, so a request passes through CORS, gets an
/// `x-request-id`, is traced, and only then hits the timeout (408) and the
/// panic guard (500) around the handler. The id is copied onto the response
/// so a client can quote it when reporting a failed report or invoice call.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(routes::health::router())
        .nest(API_PREFIX, routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(trace)
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// CORS for the browser front end listed in `CORS_ORIGINS`.
///
/// The API is JSON-only and carries no bearer tokens, so `Content-Type` is
/// the only request header allowed. Panics on an unparseable origin so a
/// bad deployment fails at startup.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
