//! Security classification of solar systems.

use std::fmt;

use serde::Serialize;

use crate::universe::{System, SystemId};

/// Identifiers above this value belong to wormhole space (J-space).
pub const WORMHOLE_ID_THRESHOLD: SystemId = 31_000_000;

/// Lowest security status that still counts as high-security space.
pub const HIGH_SEC_THRESHOLD: f64 = 0.45;

/// Security band of a solar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityClass {
    High,
    Low,
    Null,
    Wormhole,
}

impl SecurityClass {
    /// High-security or wormhole space.
    pub fn is_high_or_wormhole(self) -> bool {
        matches!(self, SecurityClass::High | SecurityClass::Wormhole)
    }
}

impl fmt::Display for SecurityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SecurityClass::High => "high",
            SecurityClass::Low => "low",
            SecurityClass::Null => "null",
            SecurityClass::Wormhole => "wormhole",
        };
        f.write_str(value)
    }
}

/// Classify a system from its identifier and security status.
///
/// The identifier range is checked before the security value: wormhole
/// systems report a meaningless security status.
pub fn classify_security(id: SystemId, security: f64) -> SecurityClass {
    if id > WORMHOLE_ID_THRESHOLD {
        SecurityClass::Wormhole
    } else if security >= HIGH_SEC_THRESHOLD {
        SecurityClass::High
    } else if security >= 0.0 {
        SecurityClass::Low
    } else {
        SecurityClass::Null
    }
}

/// Classify a loaded system.
pub fn classify(system: &System) -> SecurityClass {
    classify_security(system.id, system.security)
}
