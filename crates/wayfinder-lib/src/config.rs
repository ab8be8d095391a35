//! Explicit configuration for the wayfinder collaborators.
//!
//! Library code never reads process state; binaries build a
//! [`WayfinderConfig`] (usually through [`WayfinderConfig::from_env`]) and
//! hand it to the feed clients at construction time.
//!
//! # Environment Variables
//!
//! - `WAYFINDER_UNIVERSE_PATH`: static universe JSON file or directory
//! - `WAYFINDER_EVE_SCOUT_URL`: EVE-Scout wormhole list endpoint
//! - `WAYFINDER_SIGGY_URL`: Siggy API base URL
//! - `WAYFINDER_SIGGY_KEY_ID` / `WAYFINDER_SIGGY_SECRET`: Siggy API credentials
//! - `WAYFINDER_SIGGY_CHAINMAP`: default Siggy chain map identifier
//! - `WAYFINDER_FEED_TIMEOUT_SECS`: per-request timeout for live feeds

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

pub const UNIVERSE_PATH_ENV: &str = "WAYFINDER_UNIVERSE_PATH";
pub const EVE_SCOUT_URL_ENV: &str = "WAYFINDER_EVE_SCOUT_URL";
pub const SIGGY_URL_ENV: &str = "WAYFINDER_SIGGY_URL";
pub const SIGGY_KEY_ID_ENV: &str = "WAYFINDER_SIGGY_KEY_ID";
pub const SIGGY_SECRET_ENV: &str = "WAYFINDER_SIGGY_SECRET";
pub const SIGGY_CHAINMAP_ENV: &str = "WAYFINDER_SIGGY_CHAINMAP";
pub const FEED_TIMEOUT_ENV: &str = "WAYFINDER_FEED_TIMEOUT_SECS";

pub const DEFAULT_EVE_SCOUT_URL: &str = "https://www.eve-scout.com/api/wormholes";
pub const DEFAULT_SIGGY_URL: &str = "https://siggy.borkedlabs.com/api";
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

/// API key pair for the Siggy chain-mapping service.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SiggyCredentials {
    pub key_id: String,
    pub secret: String,
}

impl fmt::Debug for SiggyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiggyCredentials")
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Runtime configuration shared by the CLI and the HTTP service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WayfinderConfig {
    /// Static universe file (or directory containing `universe.json`).
    pub universe_path: Option<PathBuf>,
    pub eve_scout_url: String,
    pub siggy_url: String,
    /// Siggy credentials; the Siggy feed is disabled when absent.
    pub siggy: Option<SiggyCredentials>,
    /// Chain map fetched from Siggy when the caller does not pick one.
    pub default_chainmap: Option<String>,
    pub feed_timeout_secs: u64,
}

impl Default for WayfinderConfig {
    fn default() -> Self {
        Self {
            universe_path: None,
            eve_scout_url: DEFAULT_EVE_SCOUT_URL.to_string(),
            siggy_url: DEFAULT_SIGGY_URL.to_string(),
            siggy: None,
            default_chainmap: None,
            feed_timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
        }
    }
}

impl WayfinderConfig {
    /// Create configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let siggy = match (non_empty_env(SIGGY_KEY_ID_ENV), non_empty_env(SIGGY_SECRET_ENV)) {
            (Some(key_id), Some(secret)) => Some(SiggyCredentials { key_id, secret }),
            _ => None,
        };

        Self {
            universe_path: non_empty_env(UNIVERSE_PATH_ENV).map(PathBuf::from),
            eve_scout_url: non_empty_env(EVE_SCOUT_URL_ENV).unwrap_or(defaults.eve_scout_url),
            siggy_url: non_empty_env(SIGGY_URL_ENV).unwrap_or(defaults.siggy_url),
            siggy,
            default_chainmap: non_empty_env(SIGGY_CHAINMAP_ENV),
            feed_timeout_secs: non_empty_env(FEED_TIMEOUT_ENV)
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.feed_timeout_secs),
        }
    }

    /// Timeout applied to every live-feed request.
    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    /// Whether Siggy credentials are available.
    pub fn has_siggy(&self) -> bool {
        self.siggy.is_some()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
