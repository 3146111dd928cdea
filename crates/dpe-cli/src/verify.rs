//! # Verify Subcommand
//!
//! `dpe verify [--audit-log <path>]` re-walks a log and reports whether the
//! chain is intact. Exit code 0 when intact, 1 when a record is broken.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use dpe_audit::{verify_chain, ChainVerification};

use crate::config::EngineConfig;

/// Arguments for the `dpe verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Audit log to verify. Overrides the config file.
    #[arg(long)]
    pub audit_log: Option<PathBuf>,

    /// Print the verification result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs, config: Option<&Path>) -> Result<u8> {
    let config = EngineConfig::resolve(config, args.audit_log.as_deref())?;
    let path = &config.audit_log;
    let result = verify_chain(path)
        .with_context(|| format!("failed to verify audit log {}", path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", summary(path, &result));
    }
    Ok(if result.is_valid() { 0 } else { 1 })
}

fn summary(path: &Path, result: &ChainVerification) -> String {
    match (result.first_invalid, &result.issue) {
        (Some(index), Some(issue)) => format!(
            "{}: BROKEN at record {index} after {} verified of {} ({issue:?})",
            path.display(),
            result.verified,
            result.total,
        ),
        _ => format!("{}: OK ({} records)", path.display(), result.total),
    }
}
