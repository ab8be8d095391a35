//! Route planning entry points.
//!
//! [`plan_route`] runs the whole pipeline for one request: assemble the graph
//! from the universe and any overlay feed outcomes, weight it for the
//! requested route type, drop whatever the request does not tolerate, and
//! search it. Each call builds and owns its graph; nothing is shared between
//! requests except the read-only [`Universe`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::assemble::assemble;
use crate::error::Result;
use crate::feeds::{FeedOutcome, FeedWarning};
use crate::filter::filter_graph;
use crate::path::{find_path, PathOutcome};
use crate::universe::{SystemId, Universe};
use crate::weighting::{apply_weights, RouteType};

/// Identifier-based route request consumed by [`plan_route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub source: SystemId,
    pub destination: SystemId,
    pub route_type: RouteType,
    /// Keep end-of-life wormholes in the graph.
    pub allow_eol: bool,
    /// Keep critical-mass wormholes in the graph.
    pub allow_critical: bool,
    pub avoid: BTreeSet<SystemId>,
}

impl RouteRequest {
    /// Shortest route with no tolerance for end-of-life or critical holes.
    pub fn new(source: SystemId, destination: SystemId) -> Self {
        Self {
            source,
            destination,
            route_type: RouteType::default(),
            allow_eol: false,
            allow_critical: false,
            avoid: BTreeSet::new(),
        }
    }

    pub fn route_type(mut self, route_type: RouteType) -> Self {
        self.route_type = route_type;
        self
    }

    pub fn allow_eol(mut self, allow: bool) -> Self {
        self.allow_eol = allow;
        self
    }

    pub fn allow_critical(mut self, allow: bool) -> Self {
        self.allow_critical = allow;
        self
    }

    pub fn avoiding(mut self, avoid: BTreeSet<SystemId>) -> Self {
        self.avoid = avoid;
        self
    }
}

/// Name-based route query as entered by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub start: String,
    pub goal: String,
    #[serde(default)]
    pub route_type: RouteType,
    #[serde(default)]
    pub allow_eol: bool,
    #[serde(default)]
    pub allow_critical: bool,
    #[serde(default)]
    pub avoid: Vec<String>,
}

impl RouteQuery {
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            ..Self::default()
        }
    }

    /// Resolve system names against `universe`.
    ///
    /// Fails with [`Error::UnknownSystem`](crate::Error::UnknownSystem) on the
    /// first name that does not match exactly.
    pub fn resolve(&self, universe: &Universe) -> Result<RouteRequest> {
        let source = universe.resolve_system(&self.start)?;
        let destination = universe.resolve_system(&self.goal)?;
        let avoid = self
            .avoid
            .iter()
            .map(|name| universe.resolve_system(name))
            .collect::<Result<BTreeSet<_>>>()?;

        Ok(RouteRequest::new(source, destination)
            .route_type(self.route_type)
            .allow_eol(self.allow_eol)
            .allow_critical(self.allow_critical)
            .avoiding(avoid))
    }
}

/// Result of planning one route.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub route_type: RouteType,
    pub start: SystemId,
    pub goal: SystemId,
    pub outcome: PathOutcome,
    /// Overlay feeds that could not be used for this plan.
    pub warnings: Vec<FeedWarning>,
}

impl RoutePlan {
    /// Systems along the route, empty when there is no path.
    pub fn steps(&self) -> &[SystemId] {
        self.outcome.steps().unwrap_or(&[])
    }

    /// Number of hops in the route, if one was found.
    pub fn hop_count(&self) -> Option<usize> {
        self.outcome.found().map(|path| path.hop_count())
    }

    pub fn cost(&self) -> Option<f64> {
        self.outcome.found().map(|path| path.cost)
    }

    pub fn is_found(&self) -> bool {
        self.outcome.is_found()
    }
}

/// Plan a route through `universe` and the given overlay feed outcomes.
pub fn plan_route(
    universe: &Universe,
    overlays: &[FeedOutcome],
    request: &RouteRequest,
) -> Result<RoutePlan> {
    let mut assembly = assemble(universe, overlays);
    let graph = filter_graph(
        apply_weights(&mut assembly.graph, request.route_type),
        request,
    );
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "routing graph ready"
    );

    let outcome = find_path(graph, request.source, request.destination)?;
    match &outcome {
        PathOutcome::Found(path) => info!(
            route_type = %request.route_type,
            start = request.source,
            goal = request.destination,
            hops = path.hop_count(),
            cost = path.cost,
            "route found"
        ),
        PathOutcome::NoPath => info!(
            route_type = %request.route_type,
            start = request.source,
            goal = request.destination,
            "no path between systems"
        ),
    }

    Ok(RoutePlan {
        route_type: request.route_type,
        start: request.source,
        goal: request.destination,
        outcome,
        warnings: assembly.warnings,
    })
}
