mod commands;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::maps::handle_maps_command;
use commands::route::{handle_route_command, RouteCommandArgs, RouteStatus};
use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::{RouteType, WayfinderConfig};

/// Exit status used when the route query is valid but no path exists.
const NO_PATH_EXIT_CODE: i32 = 5;

#[derive(Parser, Debug)]
#[command(author, version, about = "Wormhole-aware route planner")]
struct Cli {
    /// Override the universe file (or a directory containing universe.json).
    #[arg(long, global = true)]
    universe: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two system names, optionally avoiding systems.
    Route(RouteArgs),
    /// List the Siggy chain maps available to the configured credentials.
    Maps,
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Starting system name.
    from: String,
    /// Destination system name.
    to: String,
    /// Systems the route must not pass through.
    avoid: Vec<String>,

    #[command(flatten)]
    route_type: RouteTypeArgs,

    /// Allow end-of-life wormhole connections.
    #[arg(short = 'e', long)]
    allow_eol: bool,
    /// Allow critical-mass wormhole connections.
    #[arg(short = 'c', long)]
    allow_crit: bool,
    /// Siggy chain map to pull wormholes from.
    #[arg(long)]
    chain: Option<String>,
    /// Route over static gates only, without querying live feeds.
    #[arg(long)]
    no_feeds: bool,
}

#[derive(Args, Debug, Default)]
#[group(multiple = false)]
struct RouteTypeArgs {
    /// Fewest jumps (default).
    #[arg(long)]
    shortest: bool,
    /// Stay in high-security space where possible.
    #[arg(long)]
    safest: bool,
    /// Stay out of high-security space where possible.
    #[arg(long)]
    insecure: bool,
}

impl RouteTypeArgs {
    fn route_type(&self) -> RouteType {
        if self.safest {
            RouteType::Safest
        } else if self.insecure {
            RouteType::Insecure
        } else {
            RouteType::Shortest
        }
    }
}

impl From<RouteArgs> for RouteCommandArgs {
    fn from(args: RouteArgs) -> Self {
        Self {
            route_type: args.route_type.route_type(),
            from: args.from,
            to: args.to,
            avoid: args.avoid,
            allow_eol: args.allow_eol,
            allow_crit: args.allow_crit,
            chain: args.chain,
            no_feeds: args.no_feeds,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = WayfinderConfig::from_env();

    match cli.command {
        Command::Route(args) => {
            let args = RouteCommandArgs::from(args);
            let status =
                handle_route_command(cli.universe.as_deref(), &config, cli.format, &args)?;
            if status == RouteStatus::NoPath {
                process::exit(NO_PATH_EXIT_CODE);
            }
            Ok(())
        }
        Command::Maps => handle_maps_command(&config, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
