//! HTTP front end for the wormhole-aware route planner.
//!
//! Handlers stay thin: they validate the request body, resolve names against
//! the shared [`Universe`](wayfinder_lib::Universe) and hand the rest to
//! [`wayfinder_lib::plan_route`]. Errors are reported as RFC 9457 problem
//! documents.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod problem;
mod request;
mod response;
mod route;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use problem::{from_lib_error, ProblemDetails};
pub use request::{RouteRequest, Validate};
pub use response::ServiceResponse;
pub use route::{route_handler, RouteEntry, RouteResponse};
pub use state::{AppState, AppStateError};

/// Router serving the route API and health probes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
