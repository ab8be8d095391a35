use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Numeric identifier for a solar system.
pub type SystemId = i64;

/// Default filename for the static universe document.
const UNIVERSE_FILENAME: &str = "universe.json";

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Solar system as described by the static universe document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub id: SystemId,
    pub name: String,
    pub region: String,
    pub security: f64,
}

/// Permanent stargate connection between two systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    pub from: SystemId,
    pub to: SystemId,
}

#[derive(Debug, Deserialize)]
struct UniverseDocument {
    #[serde(rename = "solarSystems")]
    solar_systems: Vec<System>,
    jumps: Vec<Gate>,
}

/// Immutable snapshot of the static topology: systems in document order plus
/// the gate list.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    systems: Vec<System>,
    gates: Vec<Gate>,
    index: HashMap<SystemId, usize>,
}

impl Universe {
    /// Build a universe from already-parsed parts.
    ///
    /// Duplicate system identifiers keep their first occurrence. Gates that
    /// reference unknown systems are dropped with a warning.
    pub fn new(systems: Vec<System>, gates: Vec<Gate>) -> Self {
        let mut index = HashMap::with_capacity(systems.len());
        let mut kept = Vec::with_capacity(systems.len());
        let mut duplicates = 0usize;
        for system in systems {
            if index.contains_key(&system.id) {
                duplicates += 1;
                continue;
            }
            index.insert(system.id, kept.len());
            kept.push(system);
        }

        let total_gates = gates.len();
        let gates: Vec<Gate> = gates
            .into_iter()
            .filter(|gate| index.contains_key(&gate.from) && index.contains_key(&gate.to))
            .collect();
        let skipped_gates = total_gates - gates.len();

        if duplicates > 0 {
            warn!(duplicates, "ignored duplicate system identifiers");
        }
        if skipped_gates > 0 {
            warn!(skipped_gates, "ignored gates referencing unknown systems");
        }

        Self {
            systems: kept,
            gates,
            index,
        }
    }

    /// Systems in document order.
    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    /// Static gate list.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Lookup a system by identifier.
    pub fn system(&self, id: SystemId) -> Option<&System> {
        self.index.get(&id).map(|&idx| &self.systems[idx])
    }

    /// Whether the universe contains a system with this identifier.
    pub fn contains(&self, id: SystemId) -> bool {
        self.index.contains_key(&id)
    }

    /// Lookup a system identifier by its case-sensitive name.
    ///
    /// Systems are scanned in document order and the first exact match wins.
    pub fn system_id_by_name(&self, name: &str) -> Option<SystemId> {
        self.systems
            .iter()
            .find(|system| system.name == name)
            .map(|system| system.id)
    }

    /// Lookup a system name by identifier.
    pub fn system_name(&self, id: SystemId) -> Option<&str> {
        self.system(id).map(|system| system.name.as_str())
    }

    /// Return up to `limit` system names that closely resemble `name`, best
    /// match first.
    pub fn fuzzy_system_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .systems
            .iter()
            .map(|system| {
                let score = strsim::jaro_winkler(&needle, &system.name.to_lowercase());
                (score, system.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Resolve a system name, attaching close-match suggestions on failure.
    pub fn resolve_system(&self, name: &str) -> Result<SystemId> {
        self.system_id_by_name(name)
            .ok_or_else(|| Error::UnknownSystem {
                name: name.to_string(),
                suggestions: self.fuzzy_system_matches(name, 3),
            })
    }
}

/// Load the static universe document from disk.
///
/// Any structural problem (missing `solarSystems`/`jumps`, a system without
/// `id`, `name`, `region` or `security`) is a fatal load error.
pub fn load_universe(path: &Path) -> Result<Universe> {
    if !path.exists() {
        return Err(Error::UniverseNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)?;
    let universe = parse_universe(&contents).map_err(|err| Error::MalformedUniverse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    debug!(
        path = %path.display(),
        systems = universe.systems.len(),
        gates = universe.gates.len(),
        "loaded universe"
    );
    Ok(universe)
}

/// Parse a universe document from its JSON text.
pub fn parse_universe(contents: &str) -> std::result::Result<Universe, serde_json::Error> {
    let document: UniverseDocument = serde_json::from_str(contents)?;
    Ok(Universe::new(document.solar_systems, document.jumps))
}

/// Resolve the default universe location using platform-specific project directories.
pub fn default_universe_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "wayfinder", "wayfinder").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(UNIVERSE_FILENAME))
}

/// Pick the universe file to load: an explicit override (file or directory)
/// wins over the platform default.
pub fn resolve_universe_path(target: Option<&Path>) -> Result<PathBuf> {
    match target {
        Some(path) if path.is_dir() => Ok(path.join(UNIVERSE_FILENAME)),
        Some(path) => Ok(path.to_path_buf()),
        None => default_universe_path(),
    }
}
