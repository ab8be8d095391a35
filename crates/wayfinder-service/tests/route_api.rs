use std::path::PathBuf;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use wayfinder_lib::{load_universe, Universe, WayfinderConfig};
use wayfinder_service::{router, AppState};

fn fixture_universe() -> Universe {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/universe.json");
    load_universe(&path).expect("fixture universe loads")
}

fn app() -> Router {
    router(AppState::without_live_feeds(
        fixture_universe(),
        WayfinderConfig::default(),
    ))
}

async fn post_route(app: Router, body: Value) -> (StatusCode, Option<String>, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/route")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");

    let response = app.oneshot(request).await.expect("router responds");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes).expect("body is json");
    (status, content_type, value)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds");
    let response = app.oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    (status, serde_json::from_slice(&bytes).expect("body is json"))
}

fn names(body: &Value) -> Vec<&str> {
    body["route"]
        .as_array()
        .expect("route array")
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect()
}

#[tokio::test]
async fn liveness_probe_is_ok() {
    let (status, body) = get_json(app(), "/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn readiness_reports_loaded_systems() {
    let (status, body) = get_json(app(), "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["systems_loaded"], 9);
    assert_eq!(body["live_feeds"], false);
}

#[tokio::test]
async fn readiness_fails_without_systems() {
    let empty = router(AppState::without_live_feeds(
        Universe::default(),
        WayfinderConfig::default(),
    ));
    let (status, body) = get_json(empty, "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["status"]
        .as_str()
        .unwrap_or_default()
        .starts_with("not_ready"));
}

#[tokio::test]
async fn shortest_route_from_web_form() {
    let body = json!({
        "start": "Jita",
        "end": "Amarr",
        "pathing": "shortest",
        "eol": false,
        "crit": false,
        "avoid": [""]
    });
    let (status, content_type, body) = post_route(app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(names(&body), ["Jita", "Tama", "Amarr"]);
    assert_eq!(body["hops"], 2);
    assert_eq!(body["route_type"], "shortest");
    assert_eq!(body["route"][0]["security"], "0.95");
    assert_eq!(body["route"][1]["region"], "The Citadel");
    assert_eq!(body["warnings"], json!([]));
}

#[tokio::test]
async fn safest_route_stays_in_high_security() {
    let body = json!({"start": "Jita", "end": "Amarr", "pathing": "safest"});
    let (status, _, body) = post_route(app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&body),
        ["Jita", "Perimeter", "Uedama", "Niarja", "Amarr"]
    );
}

#[tokio::test]
async fn avoided_system_is_routed_around() {
    let body = json!({"start": "Jita", "end": "Amarr", "avoid": ["Tama"]});
    let (status, _, body) = post_route(app(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!names(&body).contains(&"Tama"));
    assert_eq!(body["hops"], 4);
}

#[tokio::test]
async fn unknown_system_is_a_problem_document() {
    let body = json!({"start": "Jitta", "end": "Amarr"});
    let (status, content_type, body) = post_route(app(), body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["type"], "/problems/unknown-system");
    assert!(body["detail"].as_str().unwrap_or_default().contains("Jita"));
}

#[tokio::test]
async fn disconnected_goal_reports_no_path() {
    let body = json!({"start": "Jita", "end": "Thera"});
    let (status, _, body) = post_route(app(), body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["type"], "/problems/no-path");
    assert_eq!(body["detail"], "No path to Thera from Jita");
}

#[tokio::test]
async fn invalid_route_type_is_rejected() {
    let body = json!({"start": "Jita", "end": "Amarr", "pathing": "scenic"});
    let (status, _, body) = post_route(app(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "/problems/invalid-request");
}

#[tokio::test]
async fn unreachable_live_feed_still_routes_over_gates() {
    let config = WayfinderConfig {
        eve_scout_url: "http://127.0.0.1:9/api/wormholes".to_string(),
        feed_timeout_secs: 2,
        ..WayfinderConfig::default()
    };
    let live = router(AppState::new(fixture_universe(), config));

    let body = json!({"start": "Jita", "end": "Amarr"});
    let (status, _, body) = post_route(live, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Jita", "Tama", "Amarr"]);
    assert_eq!(body["warnings"][0]["feed"], "eve-scout");
}
