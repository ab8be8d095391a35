//! Wayfinder library entry points.
//!
//! This crate loads the static star map, merges live wormhole overlays from
//! EVE-Scout and Siggy, and plans routes under a selectable safety policy.
//! Front-ends (CLI, HTTP service) should only depend on the functions
//! exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod assemble;
pub mod classify;
pub mod config;
pub mod error;
pub mod feeds;
pub mod filter;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod signing;
pub mod universe;
pub mod weighting;

pub use assemble::{assemble, Assembly};
pub use classify::{classify, classify_security, SecurityClass};
pub use config::{SiggyCredentials, WayfinderConfig};
pub use error::{Error, Result};
pub use feeds::{
    configured_feeds, fetch_configured, fetch_live_overlays, fetch_overlays, ConfiguredFeed,
    FeedOutcome, FeedWarning, OverlayConnection, OverlayFeed, SiggyClient,
};
pub use filter::filter_graph;
pub use graph::{Edge, EdgeSource, Graph, MassClass};
pub use output::{describe_query, no_path_message, RouteStep, RouteSummary};
pub use path::{find_path, FoundPath, PathOutcome};
pub use routing::{plan_route, RoutePlan, RouteQuery, RouteRequest};
pub use signing::sign_request;
pub use universe::{
    default_universe_path, load_universe, parse_universe, resolve_universe_path, Gate, System,
    SystemId, Universe,
};
pub use weighting::{apply_weights, RouteType};
