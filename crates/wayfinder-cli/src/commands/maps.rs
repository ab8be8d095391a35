//! Maps command handler listing the Siggy chain maps visible to the configured key.

use anyhow::{Context, Result};

use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::{SiggyClient, WayfinderConfig};

/// Handle the maps subcommand.
pub fn handle_maps_command(config: &WayfinderConfig, format: OutputFormat) -> Result<()> {
    let client = SiggyClient::new(config).context(
        "siggy credentials are required; set WAYFINDER_SIGGY_KEY_ID and WAYFINDER_SIGGY_SECRET",
    )?;
    let maps = client
        .chainmaps()
        .context("failed to list siggy chain maps")?;

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&maps),
        OutputFormat::Text => serde_json::to_string(&maps),
    }
    .context("failed to serialise chain maps")?;
    println!("{rendered}");
    Ok(())
}
