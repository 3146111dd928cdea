//! # dpe-cli — Decision Policy Engine CLI
//!
//! Provides the `dpe` command-line interface over the policy gate, the
//! cost-based router and the hash-chained audit log.
//!
//! ## Subcommands
//!
//! - `dpe decide --scenario <name>` — Evaluate a built-in scenario, select a
//!   route, and append the decision to the audit log.
//! - `dpe scenarios` — List the built-in scenarios.
//! - `dpe verify` — Re-walk an audit log and report the first broken record.
//!
//! ```bash
//! dpe decide --scenario network_off
//! dpe --config engine.yaml decide --scenario high_latency --json
//! dpe verify --audit-log out/audit_log.jsonl
//! ```

pub mod config;
pub mod decide;
pub mod engine;
pub mod scenario;
pub mod verify;

pub use config::{EngineConfig, DEFAULT_AUDIT_LOG};
pub use engine::{DecisionEngine, DecisionReport};
pub use scenario::Scenario;
