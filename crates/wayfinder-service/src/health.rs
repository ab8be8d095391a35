//! Liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Body of both health endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Number of systems in the loaded universe (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systems_loaded: Option<usize>,

    /// Whether requests consult the live wormhole feeds (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_feeds: Option<bool>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            systems_loaded: None,
            live_feeds: None,
        }
    }

    pub fn ready(service: &str, version: &str, systems: usize, live_feeds: bool) -> Self {
        Self {
            systems_loaded: Some(systems),
            live_feeds: Some(live_feeds),
            ..Self::alive(service, version)
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// `GET /health/live`
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// `GET /health/ready`
///
/// Reports 503 until the universe holds at least one system.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let systems = state.universe().systems().len();
    if systems == 0 {
        let status = HealthStatus::not_ready(service, version, "no systems loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, systems, state.live_feeds());
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alive_omits_readiness_fields() {
        let status = HealthStatus::alive("wayfinder-service", "0.1.0");
        let json = serde_json::to_string(&status).expect("serialises");
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("systems_loaded"));
        assert!(!json.contains("live_feeds"));
    }

    #[test]
    fn ready_reports_universe_size() {
        let status = HealthStatus::ready("wayfinder-service", "0.1.0", 9, false);
        assert_eq!(status.systems_loaded, Some(9));
        assert_eq!(status.live_feeds, Some(false));
    }

    #[test]
    fn not_ready_carries_reason() {
        let status = HealthStatus::not_ready("wayfinder-service", "0.1.0", "no systems loaded");
        assert!(status.status.starts_with("not_ready:"));
        assert!(status.status.contains("no systems"));
    }
}
