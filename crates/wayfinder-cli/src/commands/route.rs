//! Route command handler for computing paths between star systems.

use std::path::Path;

use anyhow::{Context, Result};

use wayfinder_cli::output::{render_warnings, OutputFormat};
use wayfinder_lib::{
    fetch_live_overlays, load_universe, plan_route, resolve_universe_path, Error as RouteError,
    FeedOutcome, RouteQuery, RouteSummary, RouteType, WayfinderConfig,
};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting system name.
    pub from: String,
    /// Destination system name.
    pub to: String,
    /// Systems to avoid.
    pub avoid: Vec<String>,
    pub route_type: RouteType,
    /// Route through end-of-life wormholes.
    pub allow_eol: bool,
    /// Route through critical-mass wormholes.
    pub allow_crit: bool,
    /// Siggy chain map overriding the configured default.
    pub chain: Option<String>,
    /// Skip live feeds and route over the static gate network only.
    pub no_feeds: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library query.
    pub fn to_query(&self) -> RouteQuery {
        RouteQuery {
            start: self.from.clone(),
            goal: self.to.clone(),
            route_type: self.route_type,
            allow_eol: self.allow_eol,
            allow_critical: self.allow_crit,
            avoid: self.avoid.clone(),
        }
    }
}

/// Whether the command produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Found,
    NoPath,
}

/// Handle the route subcommand.
pub fn handle_route_command(
    universe_override: Option<&Path>,
    config: &WayfinderConfig,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<RouteStatus> {
    let override_path = universe_override.or(config.universe_path.as_deref());
    let universe_path = resolve_universe_path(override_path)
        .context("failed to resolve the universe file location")?;
    let universe = load_universe(&universe_path)
        .with_context(|| format!("failed to load universe from {}", universe_path.display()))?;

    let query = args.to_query();
    let request = query.resolve(&universe).map_err(handle_route_failure)?;

    let overlays = live_overlays(config, args);
    let plan = plan_route(&universe, &overlays, &request).map_err(handle_route_failure)?;

    for line in render_warnings(&plan.warnings) {
        eprintln!("{line}");
    }

    if !plan.is_found() {
        print!("{}", format.render_no_path(&query, &plan)?);
        return Ok(RouteStatus::NoPath);
    }

    let summary = RouteSummary::from_plan(&universe, &plan)
        .context("failed to build route summary for display")?;
    let rendered = format.render_route(&query, &summary)?;
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
    Ok(RouteStatus::Found)
}

fn live_overlays(config: &WayfinderConfig, args: &RouteCommandArgs) -> Vec<FeedOutcome> {
    if args.no_feeds {
        return Vec::new();
    }
    fetch_live_overlays(config, args.chain.as_deref())
}

fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownSystem { name, suggestions } => {
            anyhow::anyhow!(format_unknown_system_message(&name, &suggestions))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_system_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown system '{}'.", name);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}
