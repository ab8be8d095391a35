//! Live overlay feeds contributing transient wormhole connections.
//!
//! This module provides:
//! - [`OverlayFeed`] - the fetch contract the graph assembler consumes
//! - [`OverlayConnection`] - a feed record normalized to edge attributes
//! - [`fetch_overlays`] - concurrent fetch of several feeds, merged in order
//! - [`fetch_live_overlays`] - build and fetch the feeds enabled by configuration
//! - [`EveScoutFeed`] and [`SiggyFeed`] - the two supported sources

mod eve_scout;
mod siggy;

pub use eve_scout::{decode_eve_scout, EveScoutFeed, EVE_SCOUT_FEED};
pub use siggy::{decode_siggy, SiggyClient, SiggyFeed, SIGGY_FEED};

use std::thread;

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::WayfinderConfig;
use crate::error::{Error, Result};
use crate::graph::MassClass;
use crate::universe::SystemId;

/// Type tag reported for a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionKind {
    /// A traversable wormhole.
    Wormhole,
    /// Anything else a feed reports (for example a bookmark or a beacon).
    Other(String),
}

/// Scan status reported for a connection's signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    Scanned,
    Other(String),
}

/// One connection reported by an overlay feed, with attributes already
/// mapped from the feed's own representation.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConnection {
    pub kind: ConnectionKind,
    pub status: ScanStatus,
    pub from: SystemId,
    pub to: SystemId,
    pub end_of_life: bool,
    pub mass_class: MassClass,
}

impl OverlayConnection {
    /// A scanned wormhole connection.
    pub fn wormhole(from: SystemId, to: SystemId, end_of_life: bool, mass_class: MassClass) -> Self {
        Self {
            kind: ConnectionKind::Wormhole,
            status: ScanStatus::Scanned,
            from,
            to,
            end_of_life,
            mass_class,
        }
    }

    /// Only scanned wormholes can be traversed.
    pub fn is_traversable(&self) -> bool {
        self.kind == ConnectionKind::Wormhole && self.status == ScanStatus::Scanned
    }
}

/// Source of transient connections.
pub trait OverlayFeed: Send + Sync {
    /// Stable name used to tag edges and warnings.
    fn name(&self) -> &str;

    /// Fetch the current snapshot of connections.
    fn fetch(&self) -> Result<Vec<OverlayConnection>>;
}

/// Result of fetching one feed.
#[derive(Debug)]
pub struct FeedOutcome {
    pub feed: String,
    pub result: Result<Vec<OverlayConnection>>,
}

impl FeedOutcome {
    pub fn ok(feed: impl Into<String>, connections: Vec<OverlayConnection>) -> Self {
        Self {
            feed: feed.into(),
            result: Ok(connections),
        }
    }

    pub fn failed(feed: impl Into<String>, error: Error) -> Self {
        Self {
            feed: feed.into(),
            result: Err(error),
        }
    }
}

/// Non-fatal problem with one feed, reported alongside a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedWarning {
    pub feed: String,
    pub message: String,
}

/// In-memory feed over a fixed snapshot of connections.
#[derive(Debug, Clone)]
pub struct StaticFeed {
    name: String,
    connections: Vec<OverlayConnection>,
}

impl StaticFeed {
    pub fn new(name: impl Into<String>, connections: Vec<OverlayConnection>) -> Self {
        Self {
            name: name.into(),
            connections,
        }
    }
}

impl OverlayFeed for StaticFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<OverlayConnection>> {
        Ok(self.connections.clone())
    }
}

/// Fetch every feed concurrently, one scoped thread per feed.
///
/// Outcomes are returned in the order of `feeds` regardless of completion
/// order, so assembly stays deterministic.
pub fn fetch_overlays(feeds: &[Box<dyn OverlayFeed>]) -> Vec<FeedOutcome> {
    thread::scope(|scope| {
        let handles: Vec<_> = feeds
            .iter()
            .map(|feed| scope.spawn(move || feed.fetch()))
            .collect();

        feeds
            .iter()
            .zip(handles)
            .map(|(feed, handle)| {
                let name = feed.name().to_string();
                let result = handle.join().unwrap_or_else(|_| {
                    Err(Error::FeedPanicked { feed: name.clone() })
                });
                match &result {
                    Ok(connections) => {
                        debug!(feed = %name, connections = connections.len(), "fetched overlay feed")
                    }
                    Err(err) => {
                        warn!(feed = %name, error = %err.report(), "overlay feed fetch failed")
                    }
                }
                FeedOutcome { feed: name, result }
            })
            .collect()
    })
}

/// A live feed as configured: ready to fetch, or failed while being built.
pub struct ConfiguredFeed {
    pub name: String,
    pub feed: Result<Box<dyn OverlayFeed>>,
}

impl ConfiguredFeed {
    fn build<F>(name: &str, feed: Result<F>) -> Self
    where
        F: OverlayFeed + 'static,
    {
        Self {
            name: name.to_string(),
            feed: feed.map(|feed| Box::new(feed) as Box<dyn OverlayFeed>),
        }
    }
}

/// Build the live feeds enabled by `config`.
///
/// EVE-Scout is always enabled; Siggy only when credentials are configured.
/// `chainmap` overrides the configured default chain map.
pub fn configured_feeds(config: &WayfinderConfig, chainmap: Option<&str>) -> Vec<ConfiguredFeed> {
    let mut feeds = vec![ConfiguredFeed::build(
        EVE_SCOUT_FEED,
        EveScoutFeed::new(config),
    )];

    if config.has_siggy() {
        match chainmap.or(config.default_chainmap.as_deref()) {
            Some(chainmap) => feeds.push(ConfiguredFeed::build(
                SIGGY_FEED,
                SiggyFeed::new(config, chainmap),
            )),
            None => warn!("siggy credentials configured without a chain map; skipping siggy feed"),
        }
    }

    feeds
}

/// Fetch the feeds that were built and report the ones that were not as
/// failed outcomes, keeping the configured order.
pub fn fetch_configured(feeds: Vec<ConfiguredFeed>) -> Vec<FeedOutcome> {
    let mut ready = Vec::new();
    let mut slots = Vec::with_capacity(feeds.len());
    for configured in feeds {
        match configured.feed {
            Ok(feed) => {
                ready.push(feed);
                slots.push(None);
            }
            Err(err) => {
                warn!(feed = %configured.name, error = %err.report(), "overlay feed unavailable");
                slots.push(Some(FeedOutcome::failed(configured.name, err)));
            }
        }
    }

    let mut fetched = fetch_overlays(&ready).into_iter();
    slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| fetched.next()))
        .collect()
}

/// Build and fetch every live feed enabled by `config`.
///
/// Never fails: a feed that cannot be built or fetched is reported as a
/// failed [`FeedOutcome`].
pub fn fetch_live_overlays(config: &WayfinderConfig, chainmap: Option<&str>) -> Vec<FeedOutcome> {
    fetch_configured(configured_feeds(config, chainmap))
}

pub(crate) fn build_client(config: &WayfinderConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.feed_timeout())
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}

fn user_agent() -> String {
    format!(
        "wayfinder/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/pcd1193182/wayfinder"
    )
}
