mod common;

use std::fs;

use common::{fixture_payload, fixture_universe, fixtures_dir};
use tempfile::tempdir;
use wayfinder_lib::feeds::{decode_eve_scout, decode_siggy, EVE_SCOUT_FEED, SIGGY_FEED};
use wayfinder_lib::{
    assemble, load_universe, plan_route, Error, FeedOutcome, RouteQuery, RouteRequest,
    RouteSummary, RouteType, SystemId, Universe,
};

fn names(universe: &Universe, steps: &[SystemId]) -> Vec<String> {
    steps
        .iter()
        .map(|&id| universe.system_name(id).expect("known system").to_string())
        .collect()
}

fn plan_names(universe: &Universe, overlays: &[FeedOutcome], query: &RouteQuery) -> Vec<String> {
    let request = query.resolve(universe).expect("names resolve");
    let plan = plan_route(universe, overlays, &request).expect("plan");
    names(universe, plan.steps())
}

fn eve_scout() -> FeedOutcome {
    FeedOutcome::ok(
        EVE_SCOUT_FEED,
        decode_eve_scout(&fixture_payload("eve_scout.json")).expect("eve-scout fixture"),
    )
}

fn siggy() -> FeedOutcome {
    FeedOutcome::ok(
        SIGGY_FEED,
        decode_siggy(&fixture_payload("siggy_chain.json")).expect("siggy fixture"),
    )
}

#[test]
fn fixture_loads_in_document_order() {
    let universe = fixture_universe();
    assert_eq!(universe.systems().len(), 9);
    assert_eq!(universe.gates().len(), 8);
    assert_eq!(universe.systems()[0].name, "Jita");
    assert_eq!(universe.system_id_by_name("Amarr"), Some(30002187));
    assert_eq!(universe.system_id_by_name("amarr"), None);
}

#[test]
fn route_types_pick_different_corridors() {
    let universe = fixture_universe();

    let shortest = RouteQuery::new("Jita", "Amarr");
    assert_eq!(
        plan_names(&universe, &[], &shortest),
        vec!["Jita", "Tama", "Amarr"]
    );

    let mut safest = RouteQuery::new("Jita", "Amarr");
    safest.route_type = RouteType::Safest;
    assert_eq!(
        plan_names(&universe, &[], &safest),
        vec!["Jita", "Perimeter", "Uedama", "Niarja", "Amarr"]
    );

    let mut avoiding = RouteQuery::new("Jita", "Amarr");
    avoiding.avoid = vec!["Tama".to_string()];
    assert_eq!(
        plan_names(&universe, &[], &avoiding),
        vec!["Jita", "Perimeter", "Uedama", "Niarja", "Amarr"]
    );
}

#[test]
fn thera_shortcut_only_with_eol_tolerance() {
    let universe = fixture_universe();
    let overlays = [eve_scout()];

    let strict = RouteQuery::new("Jita", "Amarr");
    assert_eq!(
        plan_names(&universe, &overlays, &strict),
        vec!["Jita", "Tama", "Amarr"]
    );

    let mut tolerant = RouteQuery::new("Jita", "Amarr");
    tolerant.allow_eol = true;
    assert_eq!(
        plan_names(&universe, &overlays, &tolerant),
        vec!["Jita", "Thera", "Amarr"]
    );
}

#[test]
fn frigate_hole_needs_critical_tolerance() {
    let universe = fixture_universe();
    let overlays = [siggy()];

    let strict = RouteQuery::new("Dodixie", "1DQ1-A");
    assert_eq!(plan_names(&universe, &overlays, &strict).len(), 6);

    let mut tolerant = RouteQuery::new("Dodixie", "1DQ1-A");
    tolerant.allow_critical = true;
    assert_eq!(
        plan_names(&universe, &overlays, &tolerant),
        vec!["Dodixie", "1DQ1-A"]
    );
}

#[test]
fn assembly_skips_unscanned_and_unknown_connections() {
    let universe = fixture_universe();
    let assembly = assemble(&universe, &[eve_scout(), siggy()]);
    // 8 gates, 3 usable EVE-Scout holes, 3 Siggy holes.
    assert_eq!(assembly.graph.edge_count(), 14);
    assert!(assembly.warnings.is_empty());
}

#[test]
fn failed_feed_is_reported_alongside_route() {
    let universe = fixture_universe();
    let failed = FeedOutcome::failed(
        SIGGY_FEED,
        Error::MalformedFeed {
            feed: SIGGY_FEED.to_string(),
            message: "expected value at line 1 column 1".to_string(),
        },
    );
    let request = RouteRequest::new(30000142, 30002187);
    let plan = plan_route(&universe, &[eve_scout(), failed], &request).expect("plan");

    assert!(plan.is_found());
    assert_eq!(plan.warnings.len(), 1);
    assert_eq!(plan.warnings[0].feed, SIGGY_FEED);

    let summary = RouteSummary::from_plan(&universe, &plan).expect("summary");
    assert_eq!(summary.warnings, plan.warnings);
}

#[test]
fn unknown_system_suggests_close_names() {
    let universe = fixture_universe();
    let err = RouteQuery::new("Jitta", "Amarr")
        .resolve(&universe)
        .expect_err("typo");
    let message = err.to_string();
    assert!(message.contains("unknown system name: Jitta"));
    assert!(message.contains("Did you mean 'Jita'?"));
}

#[test]
fn missing_universe_file_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let err = load_universe(&dir.path().join("universe.json")).expect_err("missing file");
    assert!(matches!(err, Error::UniverseNotFound { .. }));
}

#[test]
fn malformed_universe_file_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("universe.json");
    fs::write(
        &path,
        r#"{"solarSystems": [{"id": 1, "name": "Lonely"}], "jumps": []}"#,
    )
    .expect("write fixture");

    let err = load_universe(&path).expect_err("system without region");
    assert!(matches!(err, Error::MalformedUniverse { .. }));
}

#[test]
fn fixture_directory_resolves_universe_file() {
    let path = wayfinder_lib::resolve_universe_path(Some(&fixtures_dir())).expect("resolves");
    assert!(path.ends_with("universe.json"));
    assert!(load_universe(&path).is_ok());
}
