//! # Decide and Scenarios Subcommands
//!
//! - `dpe decide --scenario <name>` — Run a built-in scenario and append
//!   the decision to the audit log.
//! - `dpe scenarios` — List the built-in scenarios.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::config::EngineConfig;
use crate::engine::{DecisionEngine, DecisionReport};
use crate::scenario::{candidate_costs, Scenario};

/// Arguments for the `dpe decide` subcommand.
#[derive(Args, Debug)]
pub struct DecideArgs {
    /// Scenario to evaluate.
    #[arg(long, value_enum)]
    pub scenario: Scenario,

    /// Audit log destination. Overrides the config file.
    #[arg(long)]
    pub audit_log: Option<PathBuf>,

    /// Print the full decision report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the decide subcommand.
pub fn run_decide(args: &DecideArgs, config: Option<&Path>) -> Result<u8> {
    let config = EngineConfig::resolve(config, args.audit_log.as_deref())?;
    let engine = DecisionEngine::new(&config)?;

    let context = args.scenario.context()?;
    let action = args.scenario.action();
    let candidates = candidate_costs(&context)?;
    let report = engine.decide(&context, &action, &candidates)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(args.scenario, &report, &config.audit_log));
    }
    Ok(0)
}

/// Execute the scenarios subcommand.
pub fn run_scenarios() -> Result<u8> {
    for s in Scenario::ALL {
        println!("{:<22} {}", s.as_str(), s.description());
    }
    Ok(0)
}

fn render(scenario: Scenario, report: &DecisionReport, log: &Path) -> String {
    let scores = report
        .selection
        .explanation
        .scores
        .iter()
        .map(|(route, score)| format!("{route}={score:.4}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "Scenario: {scenario}\nDecision: {} ({})\nRoute: {}\nScores: {scores}\nHash: {}\nLog: {}\n",
        report.outcome.decision,
        report.outcome.reason,
        report.selection.route,
        report.event.hash(),
        log.display(),
    )
}
