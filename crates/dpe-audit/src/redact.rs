//! # Input Redaction
//!
//! Projects a decision's inputs onto a fixed field list before they enter
//! the audit trail. Action metadata is dropped unless its key is on the
//! policy's allow-list; with the default policy the metadata is always
//! recorded as an empty object.

use std::collections::{BTreeMap, BTreeSet};

use dpe_core::{Context, ProposedAction, RiskLevel};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which action metadata keys may be copied into audit records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RedactionPolicy {
    /// Metadata keys copied verbatim. Everything else is dropped.
    pub metadata_allow_list: BTreeSet<String>,
}

impl RedactionPolicy {
    /// A policy that keeps the given metadata keys.
    pub fn allowing<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metadata_allow_list: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Produce the redacted projection of `context` and `action`.
    pub fn redact(&self, context: &Context, action: &ProposedAction) -> RedactedInputs {
        let metadata = action
            .metadata()
            .iter()
            .filter(|(k, _)| self.metadata_allow_list.contains(k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        RedactedInputs {
            action: RedactedAction {
                action_type: action.action_type().to_string(),
                risk_level: action.risk_level(),
                metadata,
            },
            context: RedactedContext {
                network_available: context.network_available(),
                rtt_ms: context.rtt_ms(),
                battery_level: context.battery_level(),
                user_present: context.user_present(),
                supervised_mode: context.supervised_mode(),
                locale: context.locale().to_string(),
            },
        }
    }
}

/// Redact with the default policy (no metadata retained).
pub fn redact(context: &Context, action: &ProposedAction) -> RedactedInputs {
    RedactionPolicy::default().redact(context, action)
}

/// The `inputs_redacted` block of an audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactedInputs {
    /// Action projection.
    pub action: RedactedAction,
    /// Context projection.
    pub context: RedactedContext,
}

/// Recorded view of a [`ProposedAction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactedAction {
    /// Serialized as `type`.
    #[serde(rename = "type")]
    pub action_type: String,
    /// Declared risk.
    pub risk_level: RiskLevel,
    /// Allow-listed metadata only.
    pub metadata: BTreeMap<String, Value>,
}

/// Recorded view of a [`Context`]. All six fields, nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactedContext {
    /// Network reachability at decision time.
    pub network_available: bool,
    /// Observed round-trip time.
    pub rtt_ms: u64,
    /// Battery fraction in `[0, 1]`.
    pub battery_level: f64,
    /// Whether a user was present.
    pub user_present: bool,
    /// Whether supervised mode was on.
    pub supervised_mode: bool,
    /// BCP 47 locale tag.
    pub locale: String,
}
