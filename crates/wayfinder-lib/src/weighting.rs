//! Route-type cost policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::SecurityClass;
use crate::error::Error;
use crate::graph::Graph;

/// Cost applied by [`RouteType::Safest`] and [`RouteType::Insecure`] to edges
/// they want to steer away from.
pub const AVOIDANCE_PENALTY: f64 = 5000.0;

/// Cost policy used to weight edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    /// Fewest jumps, preferring safer space only to break ties.
    #[default]
    Shortest,
    /// Stay in high-security space whenever any such path exists.
    Safest,
    /// Stay out of high-security space whenever possible.
    Insecure,
}

type CostFn = fn(SecurityClass, SecurityClass) -> f64;

impl RouteType {
    pub const ALL: [RouteType; 3] = [RouteType::Shortest, RouteType::Safest, RouteType::Insecure];

    fn cost_fn(self) -> CostFn {
        match self {
            RouteType::Shortest => shortest_cost,
            RouteType::Safest => safest_cost,
            RouteType::Insecure => insecure_cost,
        }
    }

    /// Cost of an edge between systems of classes `a` and `b`.
    pub fn edge_weight(self, a: SecurityClass, b: SecurityClass) -> f64 {
        (self.cost_fn())(a, b)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteType::Shortest => "shortest",
            RouteType::Safest => "safest",
            RouteType::Insecure => "insecure",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        RouteType::ALL
            .into_iter()
            .find(|route_type| route_type.as_str() == value)
            .ok_or_else(|| Error::UnknownRouteType {
                name: value.to_string(),
            })
    }
}

fn shortest_cost(a: SecurityClass, b: SecurityClass) -> f64 {
    if a == SecurityClass::High && b == SecurityClass::High {
        1.0
    } else if a.is_high_or_wormhole() && b.is_high_or_wormhole() {
        1.001
    } else if a == SecurityClass::Null || b == SecurityClass::Null {
        1.003
    } else {
        1.002
    }
}

fn safest_cost(a: SecurityClass, b: SecurityClass) -> f64 {
    if a == SecurityClass::High && b == SecurityClass::High {
        1.0
    } else {
        AVOIDANCE_PENALTY
    }
}

fn insecure_cost(a: SecurityClass, b: SecurityClass) -> f64 {
    if a == SecurityClass::High || b == SecurityClass::High {
        AVOIDANCE_PENALTY
    } else {
        1.0
    }
}

/// Assign a weight to every edge according to `route_type`.
///
/// Edges whose endpoints are missing from the graph keep no weight; the
/// pathfinder rejects them.
pub fn apply_weights(graph: &mut Graph, route_type: RouteType) -> &mut Graph {
    let classes: Vec<Option<(SecurityClass, SecurityClass)>> = graph
        .edges()
        .iter()
        .map(|edge| Some((graph.class_of(edge.from)?, graph.class_of(edge.to)?)))
        .collect();

    for (edge, classes) in graph.edges_mut().iter_mut().zip(classes) {
        edge.weight = classes.map(|(a, b)| route_type.edge_weight(a, b));
    }

    debug!(route_type = %route_type, edges = graph.edge_count(), "applied edge weights");
    graph
}
