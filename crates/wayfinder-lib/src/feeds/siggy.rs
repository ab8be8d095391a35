use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, DATE};
use serde::Deserialize;
use tracing::debug;

use crate::config::{SiggyCredentials, WayfinderConfig};
use crate::error::{Error, Result};
use crate::graph::MassClass;
use crate::signing::{authorization_header, sign_request, SignedRequest};
use crate::universe::SystemId;

use super::{build_client, OverlayConnection, OverlayFeed};

/// Feed name used to tag Siggy edges.
pub const SIGGY_FEED: &str = "siggy";

/// Signed-request client for the Siggy chain-mapping API.
#[derive(Debug, Clone)]
pub struct SiggyClient {
    client: Client,
    base_url: String,
    credentials: SiggyCredentials,
}

impl SiggyClient {
    pub fn new(config: &WayfinderConfig) -> Result<Self> {
        let credentials = config.siggy.clone().ok_or_else(|| Error::MissingCredentials {
            feed: SIGGY_FEED.to_string(),
        })?;

        Ok(Self {
            client: build_client(config)?,
            base_url: config.siggy_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Raw chain map document for `chainmap`.
    pub fn chain(&self, chainmap: &str) -> Result<String> {
        self.get(&format!("/v1/chainmaps/{chainmap}"))
    }

    /// Chain maps visible to the configured key.
    pub fn chainmaps(&self) -> Result<serde_json::Value> {
        let payload = self.get("/v1/chainmaps")?;
        serde_json::from_str(&payload).map_err(|err| Error::MalformedFeed {
            feed: SIGGY_FEED.to_string(),
            message: err.to_string(),
        })
    }

    fn get(&self, path: &str) -> Result<String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        let signature = sign_request(
            self.credentials.secret.as_bytes(),
            &SignedRequest::bodyless("GET", path, &timestamp),
        );
        debug!(path, "sending signed siggy request");

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/json")
            .header(DATE, &timestamp)
            .header(
                AUTHORIZATION,
                authorization_header(&self.credentials.key_id, &signature),
            )
            .send()?
            .error_for_status()?;
        Ok(response.text()?)
    }
}

/// Wormholes mapped in one Siggy chain map.
#[derive(Debug, Clone)]
pub struct SiggyFeed {
    client: SiggyClient,
    chainmap: String,
}

impl SiggyFeed {
    pub fn new(config: &WayfinderConfig, chainmap: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: SiggyClient::new(config)?,
            chainmap: chainmap.into(),
        })
    }
}

impl OverlayFeed for SiggyFeed {
    fn name(&self) -> &str {
        SIGGY_FEED
    }

    fn fetch(&self) -> Result<Vec<OverlayConnection>> {
        let payload = self.client.chain(&self.chainmap)?;
        decode_siggy(&payload)
    }
}

#[derive(Debug, Deserialize)]
struct ChainDocument {
    wormholes: Vec<SiggyWormhole>,
}

#[derive(Debug, Deserialize)]
struct SiggyWormhole {
    from_system_id: SystemId,
    to_system_id: SystemId,
    #[serde(default)]
    eol: Option<Flag>,
    #[serde(default)]
    frigate_sized: Option<Flag>,
}

/// Siggy reports booleans as either JSON booleans or 0/1 integers.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

fn is_set(flag: Option<Flag>) -> bool {
    match flag {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Int(value)) => value == 1,
        None => false,
    }
}

/// Decode a Siggy chain map.
///
/// Siggy does not report remaining mass, so frigate-sized holes are treated
/// as [`MassClass::Critical`]; everything else is stable. Chain map entries
/// carry no type or scan status and are all scanned wormholes.
pub fn decode_siggy(payload: &str) -> Result<Vec<OverlayConnection>> {
    let document: ChainDocument =
        serde_json::from_str(payload).map_err(|err| Error::MalformedFeed {
            feed: SIGGY_FEED.to_string(),
            message: err.to_string(),
        })?;

    Ok(document
        .wormholes
        .into_iter()
        .map(|hole| {
            let mass_class = if is_set(hole.frigate_sized) {
                MassClass::Critical
            } else {
                MassClass::Stable
            };
            OverlayConnection::wormhole(
                hole.from_system_id,
                hole.to_system_id,
                is_set(hole.eol),
                mass_class,
            )
        })
        .collect())
}
