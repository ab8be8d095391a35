use std::fmt::Write;

use serde::Serialize;

use crate::classify::{classify, SecurityClass};
use crate::error::{Error, Result};
use crate::feeds::FeedWarning;
use crate::graph::EdgeSource;
use crate::routing::{RoutePlan, RouteQuery};
use crate::universe::{SystemId, Universe};
use crate::weighting::RouteType;

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: SystemId,
    pub name: String,
    pub region: String,
    pub security: f64,
    pub class: SecurityClass,
    /// Connection used to arrive at this step; absent for the first one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<EdgeSource>,
}

/// Structured representation of a found route that front-ends can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub route_type: RouteType,
    pub hops: usize,
    pub cost: f64,
    pub steps: Vec<RouteStep>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<FeedWarning>,
}

impl RouteSummary {
    /// Resolve every step of `plan` against `universe`.
    ///
    /// Fails with [`Error::EmptyRoutePlan`] when the plan holds no path.
    pub fn from_plan(universe: &Universe, plan: &RoutePlan) -> Result<Self> {
        let path = plan.outcome.found().ok_or(Error::EmptyRoutePlan)?;

        let steps = path
            .steps
            .iter()
            .enumerate()
            .map(|(index, &id)| {
                let system = universe.system(id).ok_or(Error::UnknownNode { id })?;
                let via = index
                    .checked_sub(1)
                    .and_then(|hop| path.edges.get(hop))
                    .map(|edge| edge.source.clone());
                Ok(RouteStep {
                    index,
                    id,
                    name: system.name.clone(),
                    region: system.region.clone(),
                    security: system.security,
                    class: classify(system),
                    via,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            route_type: plan.route_type,
            hops: path.hop_count(),
            cost: path.cost,
            steps,
            warnings: plan.warnings.clone(),
        })
    }

    /// One line per step: `<index> : <name> <region> <security>`.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{} : {} {} {:.2}",
                step.index, step.name, step.region, step.security
            );
        }
        buffer
    }
}

/// Human-readable description of what a query is about to compute.
pub fn describe_query(query: &RouteQuery) -> String {
    let mut desc = format!(
        "Generating {} route from {} to {}, {} eol connections and {} crit holes",
        query.route_type,
        query.start,
        query.goal,
        tolerance(query.allow_eol),
        tolerance(query.allow_critical),
    );
    if !query.avoid.is_empty() {
        let _ = write!(desc, ", avoiding {}", query.avoid.join(", "));
    }
    desc
}

/// Message shown when no route exists between the query's endpoints.
pub fn no_path_message(query: &RouteQuery) -> String {
    format!("No path to {} from {}", query.goal, query.start)
}

fn tolerance(allowed: bool) -> &'static str {
    if allowed {
        "allowing"
    } else {
        "ignoring"
    }
}
