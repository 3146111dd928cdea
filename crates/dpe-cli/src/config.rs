//! # Engine Configuration
//!
//! Optional YAML file passed with `--config`. Every section may be omitted:
//!
//! ```yaml
//! router:
//!   weights: { latency_ms: 0.6, privacy_risk: 0.2, reliability_risk: 0.1, dollar_cost: 0.1 }
//!   tie_break: [LOCAL, DEGRADED, HYBRID, CLOUD]
//! redaction:
//!   metadata_allow_list: [channel]
//! audit_log: var/decisions.jsonl
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dpe_audit::RedactionPolicy;
use dpe_router::RouterConfig;

/// Audit log destination when neither the config file nor `--audit-log`
/// names one.
pub const DEFAULT_AUDIT_LOG: &str = "out/audit_log.jsonl";

/// Configuration of a [`crate::DecisionEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Router weights, ranges and tie-break order.
    pub router: RouterConfig,
    /// Which action metadata reaches the audit trail.
    pub redaction: RedactionPolicy,
    /// Audit log destination.
    pub audit_log: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            router: RouterConfig::default(),
            redaction: RedactionPolicy::default(),
            audit_log: PathBuf::from(DEFAULT_AUDIT_LOG),
        }
    }
}

impl EngineConfig {
    /// Load and validate a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config
            .router
            .validate()
            .with_context(|| format!("invalid router section in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded engine configuration");
        Ok(config)
    }

    /// Configuration from an optional file, with an optional audit log
    /// override taking precedence over the file.
    pub fn resolve(config: Option<&Path>, audit_log: Option<&Path>) -> Result<Self> {
        let mut resolved = match config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(path) = audit_log {
            resolved.audit_log = path.to_path_buf();
        }
        Ok(resolved)
    }
}
