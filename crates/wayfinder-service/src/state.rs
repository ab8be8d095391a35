//! Application state shared by the axum handlers.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use wayfinder_lib::{load_universe, Error as LibError, Universe, WayfinderConfig};

/// Error during application state initialization.
#[derive(Debug, Error)]
pub enum AppStateError {
    #[error("universe file not found: {0}")]
    UniverseNotFound(String),

    #[error("failed to load universe: {0}")]
    UniverseLoad(#[from] LibError),
}

/// Shared application state.
///
/// Cheap to clone. Only the immutable universe and configuration are shared;
/// every request assembles and owns its own routing graph.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    universe: Universe,
    config: WayfinderConfig,
    live_feeds: bool,
}

impl AppState {
    /// Load the universe from `path` and enable live feeds.
    pub fn load(path: impl AsRef<Path>, config: WayfinderConfig) -> Result<Self, AppStateError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppStateError::UniverseNotFound(path.display().to_string()));
        }

        tracing::info!(path = %path.display(), "loading universe");
        let universe = load_universe(path)?;
        tracing::info!(
            systems = universe.systems().len(),
            gates = universe.gates().len(),
            "universe loaded"
        );

        Ok(Self::new(universe, config))
    }

    pub fn new(universe: Universe, config: WayfinderConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                universe,
                config,
                live_feeds: true,
            }),
        }
    }

    /// Same universe and configuration, routing over static gates only.
    pub fn without_live_feeds(universe: Universe, config: WayfinderConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                universe,
                config,
                live_feeds: false,
            }),
        }
    }

    pub fn universe(&self) -> &Universe {
        &self.inner.universe
    }

    pub fn config(&self) -> &WayfinderConfig {
        &self.inner.config
    }

    pub fn live_feeds(&self) -> bool {
        self.inner.live_feeds
    }
}
