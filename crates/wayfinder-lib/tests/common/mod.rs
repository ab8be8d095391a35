#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use wayfinder_lib::{load_universe, Gate, System, SystemId, Universe};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_universe() -> Universe {
    load_universe(&fixtures_dir().join("universe.json")).expect("fixture universe loads")
}

pub fn fixture_payload(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).expect("fixture payload readable")
}

/// Build a small universe from `(id, security)` pairs and gate pairs.
pub fn universe_of(systems: &[(SystemId, f64)], gates: &[(SystemId, SystemId)]) -> Universe {
    let systems = systems
        .iter()
        .map(|&(id, security)| System {
            id,
            name: format!("S{id}"),
            region: "Test".to_string(),
            security,
        })
        .collect();
    let gates = gates.iter().map(|&(from, to)| Gate { from, to }).collect();
    Universe::new(systems, gates)
}
