//! Output formatting for route rendering.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use wayfinder_lib::{
    describe_query, no_path_message, FeedWarning, RoutePlan, RouteQuery, RouteSummary,
};

/// Presentation style for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Description line followed by one line per system.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// JSON document emitted when no route exists.
#[derive(Debug, Serialize)]
struct NoPathDocument<'a> {
    message: String,
    #[serde(flatten)]
    plan: &'a RoutePlan,
}

impl OutputFormat {
    /// Render a found route.
    pub fn render_route(self, query: &RouteQuery, summary: &RouteSummary) -> Result<String> {
        match self {
            OutputFormat::Text => {
                let mut buffer = describe_query(query);
                buffer.push('\n');
                buffer.push_str(&summary.render_text());
                Ok(buffer)
            }
            OutputFormat::Json => {
                serde_json::to_string_pretty(summary).context("failed to serialise route summary")
            }
        }
    }

    /// Render the outcome of a query that has no route.
    pub fn render_no_path(self, query: &RouteQuery, plan: &RoutePlan) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(format!(
                "{}\n{}\n",
                describe_query(query),
                no_path_message(query)
            )),
            OutputFormat::Json => serde_json::to_string_pretty(&NoPathDocument {
                message: no_path_message(query),
                plan,
            })
            .context("failed to serialise route plan"),
        }
    }
}

/// One stderr line per overlay feed that could not be used.
pub fn render_warnings(warnings: &[FeedWarning]) -> Vec<String> {
    warnings
        .iter()
        .map(|warning| {
            format!(
                "Warning: {} feed unavailable ({}); routing without it.",
                warning.feed, warning.message
            )
        })
        .collect()
}
