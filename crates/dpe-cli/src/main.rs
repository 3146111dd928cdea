//! # dpe CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use dpe_cli::decide::{run_decide, run_scenarios, DecideArgs};
use dpe_cli::verify::{run_verify, VerifyArgs};

/// Decision Policy Engine CLI.
///
/// Gates proposed actions against a fixed policy table, routes them to the
/// cheapest execution path, and records every decision in a hash-chained
/// audit log.
#[derive(Parser, Debug)]
#[command(name = "dpe", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Path to a YAML engine configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a built-in scenario and record the decision.
    Decide(DecideArgs),

    /// List the built-in scenarios.
    Scenarios,

    /// Verify the hash chain of an audit log.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr; stdout carries command output.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match cli.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "dpe starting");

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Decide(args) => run_decide(args, config),
        Commands::Scenarios => run_scenarios(),
        Commands::Verify(args) => run_verify(args, config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpe_cli::Scenario;

    #[test]
    fn cli_parse_decide() {
        let cli = Cli::try_parse_from(["dpe", "decide", "--scenario", "low_battery"]).unwrap();
        match cli.command {
            Commands::Decide(args) => {
                assert_eq!(args.scenario, Scenario::LowBattery);
                assert!(args.audit_log.is_none());
                assert!(!args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dpe",
            "verify",
            "--audit-log",
            "out/x.jsonl",
            "-vv",
            "--log-format",
            "json",
            "--config",
            "engine.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("engine.yaml")));
        if let Commands::Verify(args) = cli.command {
            assert_eq!(args.audit_log, Some(PathBuf::from("out/x.jsonl")));
        } else {
            panic!("expected verify");
        }
    }

    #[test]
    fn cli_rejects_unknown_scenario() {
        assert!(Cli::try_parse_from(["dpe", "decide", "--scenario", "sunny_day"]).is_err());
    }

    #[test]
    fn cli_parse_scenarios() {
        let cli = Cli::try_parse_from(["dpe", "scenarios"]).unwrap();
        assert!(matches!(cli.command, Commands::Scenarios));
    }
}
