//! Route planning HTTP service.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - Compute a route between two systems
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Configuration
//!
//! - `WAYFINDER_*` - Universe location and feed settings, see `WayfinderConfig`
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;

use tracing::{error, info};

use wayfinder_lib::{resolve_universe_path, WayfinderConfig};
use wayfinder_service::{init_logging, router, AppState, LoggingConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("wayfinder");
    init_logging(&logging_config);

    let config = WayfinderConfig::from_env();
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(8080);

    let universe_path = resolve_universe_path(config.universe_path.as_deref())?;
    info!(universe = %universe_path.display(), port, "starting route service");

    let state = AppState::load(&universe_path, config).map_err(|err| {
        error!(error = %err, path = %universe_path.display(), "failed to load application state");
        err
    })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
