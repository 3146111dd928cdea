//! # Policy Decisions
//!
//! Outcome of the policy gate for a proposed action.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Whether an action proceeds, is blocked, or needs a supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyDecision {
    /// The action may run.
    Allow,
    /// The action is blocked.
    Deny,
    /// The action may only run under supervision.
    Supervised,
}

impl PolicyDecision {
    /// All decisions.
    pub const ALL: [PolicyDecision; 3] = [Self::Allow, Self::Deny, Self::Supervised];

    /// The upper-case string code used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Deny => "DENY",
            Self::Supervised => "SUPERVISED",
        }
    }
}

impl std::fmt::Display for PolicyDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyDecision {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownPolicyDecision(s.to_string()))
    }
}
