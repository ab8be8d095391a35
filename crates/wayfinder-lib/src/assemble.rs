use tracing::{debug, warn};

use crate::feeds::{FeedOutcome, FeedWarning};
use crate::graph::{Edge, Graph};
use crate::universe::Universe;

/// Graph produced by [`assemble`] together with any feed problems.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub graph: Graph,
    pub warnings: Vec<FeedWarning>,
}

/// Merge the static universe and overlay feed outcomes into one graph.
///
/// Every system and gate is added first. Each successful feed then
/// contributes its scanned wormholes as separate, attribute-tagged edges;
/// failed feeds become [`FeedWarning`]s and assembly carries on without them.
/// Edge weights are left unset.
pub fn assemble(universe: &Universe, overlays: &[FeedOutcome]) -> Assembly {
    let mut graph = Graph::new();
    for system in universe.systems() {
        graph.add_node(system.clone());
    }
    for gate in universe.gates() {
        graph.add_edge(Edge::gate(gate.from, gate.to));
    }

    let mut warnings = Vec::new();
    for outcome in overlays {
        let connections = match &outcome.result {
            Ok(connections) => connections,
            Err(err) => {
                let message = err.report();
                warn!(feed = %outcome.feed, error = %message, "continuing without overlay feed");
                warnings.push(FeedWarning {
                    feed: outcome.feed.clone(),
                    message,
                });
                continue;
            }
        };

        let mut added = 0usize;
        let mut not_traversable = 0usize;
        let mut unknown_endpoints = 0usize;
        for connection in connections {
            if !connection.is_traversable() {
                not_traversable += 1;
                continue;
            }
            if !universe.contains(connection.from) || !universe.contains(connection.to) {
                unknown_endpoints += 1;
                continue;
            }
            graph.add_edge(Edge::overlay(
                connection.from,
                connection.to,
                outcome.feed.as_str(),
                connection.end_of_life,
                connection.mass_class,
            ));
            added += 1;
        }

        if unknown_endpoints > 0 {
            warn!(
                feed = %outcome.feed,
                unknown_endpoints,
                "ignored overlay connections referencing unknown systems"
            );
        }
        debug!(
            feed = %outcome.feed,
            added,
            not_traversable,
            "merged overlay feed"
        );
    }

    Assembly { graph, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::feeds::{ConnectionKind, OverlayConnection, ScanStatus};
    use crate::graph::{EdgeSource, MassClass};
    use crate::universe::{Gate, System};

    fn universe() -> Universe {
        let systems = (1..=3)
            .map(|id| System {
                id,
                name: format!("S{id}"),
                region: "Test".to_string(),
                security: 0.5,
            })
            .collect();
        Universe::new(systems, vec![Gate { from: 1, to: 2 }])
    }

    #[test]
    fn skips_unscanned_and_foreign_records() {
        let mut unscanned = OverlayConnection::wormhole(1, 3, false, MassClass::Stable);
        unscanned.status = ScanStatus::Other("pending".to_string());
        let mut beacon = OverlayConnection::wormhole(2, 3, false, MassClass::Stable);
        beacon.kind = ConnectionKind::Other("beacon".to_string());
        let outside = OverlayConnection::wormhole(3, 99, false, MassClass::Stable);
        let kept = OverlayConnection::wormhole(2, 3, true, MassClass::Reduced);

        let outcome = FeedOutcome::ok("eve-scout", vec![unscanned, beacon, outside, kept]);
        let assembly = assemble(&universe(), &[outcome]);

        assert!(assembly.warnings.is_empty());
        assert_eq!(assembly.graph.edge_count(), 2);
        let overlay = &assembly.graph.edges()[1];
        assert_eq!(overlay.source, EdgeSource::Overlay("eve-scout".to_string()));
        assert!(overlay.end_of_life);
        assert_eq!(overlay.mass_class, MassClass::Reduced);
        assert!(overlay.weight.is_none());
    }

    #[test]
    fn failed_feed_becomes_warning() {
        let outcome = FeedOutcome::failed(
            "siggy",
            Error::MalformedFeed {
                feed: "siggy".to_string(),
                message: "expected value".to_string(),
            },
        );
        let assembly = assemble(&universe(), &[outcome]);

        assert_eq!(assembly.graph.edge_count(), 1);
        assert_eq!(assembly.warnings.len(), 1);
        assert_eq!(assembly.warnings[0].feed, "siggy");
    }

    #[test]
    fn same_pair_from_two_feeds_stays_distinct() {
        let first = FeedOutcome::ok(
            "eve-scout",
            vec![OverlayConnection::wormhole(1, 2, false, MassClass::Stable)],
        );
        let second = FeedOutcome::ok(
            "siggy",
            vec![OverlayConnection::wormhole(2, 1, false, MassClass::Critical)],
        );
        let assembly = assemble(&universe(), &[first, second]);
        assert_eq!(assembly.graph.edge_count(), 3);
    }
}
