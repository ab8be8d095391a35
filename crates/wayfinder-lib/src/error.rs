use std::path::PathBuf;

use thiserror::Error;

use crate::universe::SystemId;

/// Convenient result alias for the wayfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The static universe document could not be located at the resolved path.
    #[error("universe file not found at {path}")]
    UniverseNotFound { path: PathBuf },

    /// The static universe document was readable but structurally invalid.
    #[error("malformed universe file {path}: {message}")]
    MalformedUniverse { path: PathBuf, message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the universe file")]
    ProjectDirsUnavailable,

    /// Raised when a system name could not be found in the universe.
    #[error("unknown system name: {name}{}", format_suggestions(.suggestions))]
    UnknownSystem {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a route endpoint is not present in the (filtered) graph.
    #[error("unknown node {id}: not present in the routing graph")]
    UnknownNode { id: SystemId },

    /// Raised when the pathfinder meets an edge that is unweighted, negative,
    /// or not finite.
    #[error("edge {from} <-> {to} has no valid weight")]
    InvalidEdgeWeight { from: SystemId, to: SystemId },

    /// Raised when a route type name is not one of the supported policies.
    #[error("unknown route type '{name}'; expected shortest, safest, or insecure")]
    UnknownRouteType { name: String },

    /// Raised when an overlay feed returned a payload that could not be decoded.
    #[error("feed {feed} returned malformed data: {message}")]
    MalformedFeed { feed: String, message: String },

    /// Raised when the thread fetching a feed panicked.
    #[error("feed {feed} fetch panicked")]
    FeedPanicked { feed: String },

    /// Raised when an authenticated feed is used without credentials.
    #[error("feed {feed} requires credentials but none were configured")]
    MissingCredentials { feed: String },

    /// Raised when a computed route plan lacks any systems.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Display text followed by each underlying cause, separated by ": ".
    ///
    /// Causes whose text already appears in the report are skipped.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !report.contains(&text) {
                report.push_str(": ");
                report.push_str(&text);
            }
            source = cause.source();
        }
        report
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
