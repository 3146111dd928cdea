//! # Execution Routes
//!
//! The closed set of placements an action can run on. The router's
//! tie-break order is configuration (see `dpe-router`), not the declaration
//! order of this enum; the derived `Ord` only exists so routes can key a
//! `BTreeMap` with deterministic iteration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Where an action executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Route {
    /// On-device execution.
    Local,
    /// Split between device and remote.
    Hybrid,
    /// Fully remote execution. Requires network.
    Cloud,
    /// Reduced-function fallback.
    Degraded,
}

impl Route {
    /// Every route, in the default tie-break order.
    pub const ALL: [Route; 4] = [Route::Local, Route::Hybrid, Route::Cloud, Route::Degraded];

    /// The upper-case string code used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Hybrid => "HYBRID",
            Self::Cloud => "CLOUD",
            Self::Degraded => "DEGRADED",
        }
    }

    /// Whether this route needs the network to execute.
    pub fn requires_network(&self) -> bool {
        matches!(self, Self::Cloud)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Route {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownRoute(s.to_string()))
    }
}
