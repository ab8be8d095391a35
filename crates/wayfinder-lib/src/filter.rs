use tracing::debug;

use crate::graph::{Graph, MassClass};
use crate::routing::RouteRequest;

/// Remove everything `request` does not tolerate: avoided systems (with their
/// edges), end-of-life edges and critical-mass edges.
///
/// The removals are independent set operations, so their order does not
/// matter.
pub fn filter_graph<'g>(graph: &'g mut Graph, request: &RouteRequest) -> &'g mut Graph {
    let avoided = graph.remove_nodes(&request.avoid);

    let end_of_life = if request.allow_eol {
        0
    } else {
        graph.retain_edges(|edge| !edge.end_of_life)
    };

    let critical = if request.allow_critical {
        0
    } else {
        graph.retain_edges(|edge| edge.mass_class != MassClass::Critical)
    };

    debug!(avoided, end_of_life, critical, "filtered routing graph");
    graph
}
