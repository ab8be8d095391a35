use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::config::WayfinderConfig;
use crate::error::{Error, Result};
use crate::graph::MassClass;
use crate::universe::SystemId;

use super::{build_client, ConnectionKind, OverlayConnection, OverlayFeed, ScanStatus};

/// Feed name used to tag EVE-Scout edges.
pub const EVE_SCOUT_FEED: &str = "eve-scout";

/// Public EVE-Scout wormhole list (Thera connections). No credentials needed.
#[derive(Debug, Clone)]
pub struct EveScoutFeed {
    client: Client,
    url: String,
}

impl EveScoutFeed {
    pub fn new(config: &WayfinderConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            url: config.eve_scout_url.clone(),
        })
    }
}

impl OverlayFeed for EveScoutFeed {
    fn name(&self) -> &str {
        EVE_SCOUT_FEED
    }

    fn fetch(&self) -> Result<Vec<OverlayConnection>> {
        let payload = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()?
            .error_for_status()?
            .text()?;
        decode_eve_scout(&payload)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EveScoutRecord {
    #[serde(rename = "type")]
    kind: String,
    status: String,
    #[serde(default)]
    wormhole_eol: Option<String>,
    #[serde(default)]
    wormhole_mass: Option<String>,
    source_solar_system: SolarSystemRef,
    destination_solar_system: SolarSystemRef,
}

#[derive(Debug, Deserialize)]
struct SolarSystemRef {
    id: SystemId,
}

/// Decode an EVE-Scout wormhole list.
///
/// `wormholeEol == "critical"` marks the hole end-of-life; `wormholeMass`
/// maps onto [`MassClass`] directly.
pub fn decode_eve_scout(payload: &str) -> Result<Vec<OverlayConnection>> {
    let records: Vec<EveScoutRecord> =
        serde_json::from_str(payload).map_err(|err| Error::MalformedFeed {
            feed: EVE_SCOUT_FEED.to_string(),
            message: err.to_string(),
        })?;

    Ok(records.into_iter().map(into_connection).collect())
}

fn into_connection(record: EveScoutRecord) -> OverlayConnection {
    let kind = if record.kind == "wormhole" {
        ConnectionKind::Wormhole
    } else {
        ConnectionKind::Other(record.kind)
    };
    let status = if record.status == "scanned" {
        ScanStatus::Scanned
    } else {
        ScanStatus::Other(record.status)
    };

    OverlayConnection {
        kind,
        status,
        from: record.source_solar_system.id,
        to: record.destination_solar_system.id,
        end_of_life: record.wormhole_eol.as_deref() == Some("critical"),
        mass_class: mass_class(record.wormhole_mass.as_deref()),
    }
}

fn mass_class(raw: Option<&str>) -> MassClass {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("critical") => MassClass::Critical,
        Some("destab") | Some("reduced") => MassClass::Reduced,
        _ => MassClass::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "id": 1,
            "type": "wormhole",
            "status": "scanned",
            "wormholeEol": "stable",
            "wormholeMass": "stable",
            "sourceSolarSystem": {"id": 31000005, "name": "Thera"},
            "destinationSolarSystem": {"id": 30000142, "name": "Jita"}
        },
        {
            "id": 2,
            "type": "wormhole",
            "status": "scanned",
            "wormholeEol": "critical",
            "wormholeMass": "critical",
            "sourceSolarSystem": {"id": 31000005},
            "destinationSolarSystem": {"id": 30002187}
        },
        {
            "id": 3,
            "type": "wormhole",
            "status": "pending",
            "sourceSolarSystem": {"id": 31000005},
            "destinationSolarSystem": {"id": 30002659}
        }
    ]"#;

    #[test]
    fn decodes_attributes() {
        let connections = decode_eve_scout(SAMPLE).expect("sample decodes");
        assert_eq!(connections.len(), 3);

        assert_eq!(
            connections[0],
            OverlayConnection::wormhole(31000005, 30000142, false, MassClass::Stable)
        );
        assert!(connections[1].end_of_life);
        assert_eq!(connections[1].mass_class, MassClass::Critical);
        assert_eq!(connections[2].status, ScanStatus::Other("pending".to_string()));
        assert_eq!(connections[2].mass_class, MassClass::Stable);
    }

    #[test]
    fn destabilized_mass_is_reduced() {
        assert_eq!(mass_class(Some("destab")), MassClass::Reduced);
        assert_eq!(mass_class(Some("Critical")), MassClass::Critical);
        assert_eq!(mass_class(None), MassClass::Stable);
    }

    #[test]
    fn malformed_payload_names_feed() {
        let err = decode_eve_scout("{\"oops\": true}").expect_err("not a list");
        assert!(err.to_string().contains(EVE_SCOUT_FEED));
    }
}
