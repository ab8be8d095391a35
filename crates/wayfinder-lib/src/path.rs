use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph};
use crate::universe::SystemId;

/// A complete route through the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoundPath {
    /// Systems from start to goal inclusive.
    pub steps: Vec<SystemId>,
    /// Edge used for each hop; `edges.len() == steps.len() - 1`.
    pub edges: Vec<Edge>,
    /// Sum of the weights along the route.
    pub cost: f64,
}

impl FoundPath {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Result of a path search. An unreachable goal is an ordinary outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum PathOutcome {
    Found(FoundPath),
    NoPath,
}

impl PathOutcome {
    pub fn found(&self) -> Option<&FoundPath> {
        match self {
            PathOutcome::Found(path) => Some(path),
            PathOutcome::NoPath => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }

    /// Systems along the route, if one was found.
    pub fn steps(&self) -> Option<&[SystemId]> {
        self.found().map(|path| path.steps.as_slice())
    }
}

/// Run Dijkstra's algorithm from `start` to `goal` over a weighted graph.
///
/// Both endpoints must be present in the graph; a missing one is reported as
/// [`Error::UnknownNode`], distinct from [`PathOutcome::NoPath`]. Every edge
/// must carry a non-negative, finite weight.
pub fn find_path(graph: &Graph, start: SystemId, goal: SystemId) -> Result<PathOutcome> {
    for id in [start, goal] {
        if !graph.contains_node(id) {
            return Err(Error::UnknownNode { id });
        }
    }

    if start == goal {
        return Ok(PathOutcome::Found(FoundPath {
            steps: vec![start],
            edges: Vec::new(),
            cost: 0.0,
        }));
    }

    let weights = edge_weights(graph)?;
    let adjacency = graph.adjacency();

    let mut distances: HashMap<SystemId, f64> = HashMap::new();
    let mut parents: HashMap<SystemId, (SystemId, usize)> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(&entry.node) {
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if entry.node == goal {
            return Ok(PathOutcome::Found(reconstruct_path(
                graph,
                &parents,
                start,
                goal,
                current_distance,
            )));
        }

        let Some(incident) = adjacency.get(&entry.node) else {
            continue;
        };
        for &edge_idx in incident {
            let Some(next) = graph.edges()[edge_idx].opposite(entry.node) else {
                continue;
            };

            let next_cost = current_distance + weights[edge_idx];
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, (entry.node, edge_idx));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    Ok(PathOutcome::NoPath)
}

fn edge_weights(graph: &Graph) -> Result<Vec<f64>> {
    graph
        .edges()
        .iter()
        .map(|edge| match edge.weight {
            Some(weight) if weight.is_finite() && weight >= 0.0 => Ok(weight),
            _ => Err(Error::InvalidEdgeWeight {
                from: edge.from,
                to: edge.to,
            }),
        })
        .collect()
}

fn reconstruct_path(
    graph: &Graph,
    parents: &HashMap<SystemId, (SystemId, usize)>,
    start: SystemId,
    goal: SystemId,
    cost: f64,
) -> FoundPath {
    let mut steps = vec![goal];
    let mut edges = Vec::new();
    let mut current = goal;
    while current != start {
        let Some(&(parent, edge_idx)) = parents.get(&current) else {
            break;
        };
        edges.push(graph.edges()[edge_idx].clone());
        steps.push(parent);
        current = parent;
    }
    steps.reverse();
    edges.reverse();
    FoundPath { steps, edges, cost }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: SystemId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: SystemId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
