//! `POST /api/v1/route`

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use wayfinder_lib::{
    fetch_live_overlays, plan_route, Error as LibError, FeedOutcome, FeedWarning, RoutePlan,
    RouteType, Universe,
};

use crate::problem::{from_lib_error, ProblemDetails};
use crate::request::{RouteRequest, Validate};
use crate::response::ServiceResponse;
use crate::state::AppState;

/// One system along the returned route.
#[derive(Debug, Serialize)]
pub struct RouteEntry {
    pub name: String,
    pub region: String,
    /// Security status formatted to two decimals.
    pub security: String,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub route_type: RouteType,
    pub route: Vec<RouteEntry>,
    pub hops: usize,
    pub cost: f64,
    /// Feeds that could not be consulted for this route.
    pub warnings: Vec<FeedWarning>,
}

impl RouteResponse {
    fn from_plan(universe: &Universe, plan: &RoutePlan) -> Self {
        let route = plan
            .steps()
            .iter()
            .filter_map(|&id| universe.system(id))
            .map(|system| RouteEntry {
                name: system.name.clone(),
                region: system.region.clone(),
                security: format!("{:.2}", system.security),
            })
            .collect();

        Self {
            route_type: plan.route_type,
            route,
            hops: plan.hop_count().unwrap_or_default(),
            cost: plan.cost().unwrap_or_default(),
            warnings: plan.warnings.clone(),
        }
    }
}

pub async fn route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RouteRequest>,
) -> Response {
    let request_id = request_id(&headers);

    info!(
        request_id = %request_id,
        start = %request.start,
        end = %request.end,
        pathing = ?request.pathing,
        "handling route request"
    );

    if let Err(problem) = request.validate(&request_id) {
        return (*problem).into_response();
    }

    let lib_request = match request
        .to_query()
        .and_then(|query| query.resolve(state.universe()))
    {
        Ok(lib_request) => lib_request,
        Err(err) => {
            warn!(request_id = %request_id, error = %err, "rejected route request");
            return from_lib_error(&err, &request_id).into_response();
        }
    };

    let overlays = live_overlays(&state, request.chain.clone()).await;

    let plan = match plan_route(state.universe(), &overlays, &lib_request) {
        Ok(plan) => plan,
        Err(err) => {
            error!(request_id = %request_id, error = %err, "route planning failed");
            return from_lib_error(&err, &request_id).into_response();
        }
    };

    if !plan.is_found() {
        return ProblemDetails::no_path(request.start.trim(), request.end.trim(), &request_id)
            .into_response();
    }

    let response = RouteResponse::from_plan(state.universe(), &plan);
    info!(
        request_id = %request_id,
        hops = response.hops,
        warnings = response.warnings.len(),
        "route computed"
    );

    ServiceResponse::new(response).into_response()
}

/// Fetch the live feeds on the blocking pool. Empty when live feeds are off.
async fn live_overlays(state: &AppState, chain: Option<String>) -> Vec<FeedOutcome> {
    if !state.live_feeds() {
        return Vec::new();
    }

    let config = state.config().clone();
    tokio::task::spawn_blocking(move || fetch_live_overlays(&config, chain.as_deref()))
        .await
        .unwrap_or_else(|_| {
            vec![FeedOutcome::failed(
                "live",
                LibError::FeedPanicked {
                    feed: "live".to_string(),
                },
            )]
        })
}

/// Caller-supplied `x-request-id`, or one derived from the clock.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generate_request_id)
}

fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();

    format!("req-{:x}", timestamp)
}
