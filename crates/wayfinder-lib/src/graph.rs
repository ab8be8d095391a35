use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::classify::{classify, SecurityClass};
use crate::universe::{System, SystemId};

/// Remaining-mass band reported for a transient connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MassClass {
    #[default]
    Stable,
    Reduced,
    Critical,
}

impl fmt::Display for MassClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            MassClass::Stable => "stable",
            MassClass::Reduced => "reduced",
            MassClass::Critical => "critical",
        };
        f.write_str(value)
    }
}

/// Origin of an edge in the routing graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "feed")]
pub enum EdgeSource {
    /// Permanent stargate from the static universe.
    Gate,
    /// Transient connection reported by the named overlay feed.
    Overlay(String),
}

impl fmt::Display for EdgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeSource::Gate => f.write_str("gate"),
            EdgeSource::Overlay(feed) => write!(f, "wormhole ({feed})"),
        }
    }
}

/// Undirected edge within the routing graph.
///
/// Parallel edges between the same pair are kept apart: a gate and a
/// wormhole (or wormholes reported by two feeds) carry different attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub from: SystemId,
    pub to: SystemId,
    pub source: EdgeSource,
    pub end_of_life: bool,
    pub mass_class: MassClass,
    /// Traversal cost; `None` until a weighting policy has been applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Edge {
    /// A static gate edge with default attributes.
    pub fn gate(from: SystemId, to: SystemId) -> Self {
        Self {
            from,
            to,
            source: EdgeSource::Gate,
            end_of_life: false,
            mass_class: MassClass::Stable,
            weight: None,
        }
    }

    /// A transient edge contributed by an overlay feed.
    pub fn overlay(
        from: SystemId,
        to: SystemId,
        feed: impl Into<String>,
        end_of_life: bool,
        mass_class: MassClass,
    ) -> Self {
        Self {
            from,
            to,
            source: EdgeSource::Overlay(feed.into()),
            end_of_life,
            mass_class,
            weight: None,
        }
    }

    /// Whether `system` is one of the endpoints.
    pub fn touches(&self, system: SystemId) -> bool {
        self.from == system || self.to == system
    }

    /// The endpoint opposite `system`, if `system` is an endpoint.
    pub fn opposite(&self, system: SystemId) -> Option<SystemId> {
        if self.from == system {
            Some(self.to)
        } else if self.to == system {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Per-request routing graph: systems plus every gate and overlay edge.
///
/// A graph is owned by exactly one request; the pipeline stages take it by
/// `&mut` and return it for chaining.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: HashMap<SystemId, System>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, system: System) {
        self.nodes.insert(system.id, system);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn node(&self, id: SystemId) -> Option<&System> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: SystemId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Security class of a node present in the graph.
    pub fn class_of(&self, id: SystemId) -> Option<SecurityClass> {
        self.nodes.get(&id).map(classify)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in insertion order: gates first, then overlay feeds in feed order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    /// Remove nodes together with every edge touching them.
    pub fn remove_nodes(&mut self, ids: &BTreeSet<SystemId>) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let before = self.nodes.len();
        self.nodes.retain(|id, _| !ids.contains(id));
        self.edges
            .retain(|edge| !ids.contains(&edge.from) && !ids.contains(&edge.to));
        before - self.nodes.len()
    }

    /// Keep only the edges matching `keep`; returns how many were removed.
    pub fn retain_edges<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&Edge) -> bool,
    {
        let before = self.edges.len();
        self.edges.retain(keep);
        before - self.edges.len()
    }

    /// Adjacency view: for each system, the indices of incident edges in
    /// insertion order.
    pub fn adjacency(&self) -> HashMap<SystemId, Vec<usize>> {
        let mut adjacency: HashMap<SystemId, Vec<usize>> = HashMap::new();
        for (idx, edge) in self.edges.iter().enumerate() {
            adjacency.entry(edge.from).or_default().push(idx);
            if edge.to != edge.from {
                adjacency.entry(edge.to).or_default().push(idx);
            }
        }
        adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(id: SystemId, security: f64) -> System {
        System {
            id,
            name: format!("S{id}"),
            region: "Test".to_string(),
            security,
        }
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut graph = Graph::new();
        graph.add_node(system(1, 0.9));
        graph.add_node(system(2, 0.9));
        graph.add_edge(Edge::gate(1, 2));
        graph.add_edge(Edge::overlay(1, 2, "eve-scout", true, MassClass::Stable));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.adjacency()[&1], vec![0, 1]);
    }

    #[test]
    fn removing_node_drops_incident_edges() {
        let mut graph = Graph::new();
        for id in 1..=3 {
            graph.add_node(system(id, 0.5));
        }
        graph.add_edge(Edge::gate(1, 2));
        graph.add_edge(Edge::gate(2, 3));
        graph.add_edge(Edge::gate(1, 3));

        let removed = graph.remove_nodes(&BTreeSet::from([2]));
        assert_eq!(removed, 1);
        assert_eq!(graph.edges(), &[Edge::gate(1, 3)]);
        assert!(!graph.contains_node(2));
    }

    #[test]
    fn opposite_endpoint() {
        let edge = Edge::gate(4, 9);
        assert_eq!(edge.opposite(4), Some(9));
        assert_eq!(edge.opposite(9), Some(4));
        assert_eq!(edge.opposite(1), None);
    }
}
