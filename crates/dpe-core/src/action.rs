//! # Proposed Actions
//!
//! An action a caller wants to run, as seen by the policy gate. The risk
//! level is a closed set; a string outside it is rejected at construction
//! and at deserialization, so an invalid action never reaches evaluation.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Action type the policy gate treats as requiring the network.
pub const NETWORK_CALL: &str = "NETWORK_CALL";

/// Declared risk of a proposed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum RiskLevel {
    /// Routine action.
    Low,
    /// Elevated risk.
    Medium,
    /// Requires supervision unless the context is already supervised.
    High,
}

impl RiskLevel {
    /// All risk levels.
    pub const ALL: [RiskLevel; 3] = [Self::Low, Self::Medium, Self::High];

    /// The upper-case string code used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidRiskLevel(s.to_string()))
    }
}

impl TryFrom<String> for RiskLevel {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An action proposal evaluated by the policy gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedAction {
    #[serde(rename = "type")]
    action_type: String,
    risk_level: RiskLevel,
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
}

impl ProposedAction {
    /// Create an action with no metadata.
    pub fn new(action_type: impl Into<String>, risk_level: RiskLevel) -> Self {
        Self {
            action_type: action_type.into(),
            risk_level,
            metadata: BTreeMap::new(),
        }
    }

    /// Create an action from an untyped risk level code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRiskLevel`] unless `risk_level` is
    /// exactly `LOW`, `MEDIUM` or `HIGH`.
    pub fn parse(action_type: impl Into<String>, risk_level: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(action_type, risk_level.parse()?))
    }

    /// Attach caller metadata, replacing any existing entries.
    pub fn with_metadata(mut self, metadata: BTreeMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// The action type, e.g. `NETWORK_CALL`.
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// The declared risk level.
    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    /// Caller-supplied metadata.
    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Whether this action needs the network.
    pub fn is_network_call(&self) -> bool {
        self.action_type == NETWORK_CALL
    }
}
