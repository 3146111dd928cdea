//! # Built-in Decision Scenarios
//!
//! Fixed contexts and actions that exercise each branch of the policy gate
//! and the router's offline handling, together with the candidate cost
//! builder used to price the four routes.

use std::collections::BTreeMap;

use clap::ValueEnum;

use dpe_core::{Context, CostVector, DpeError, ProposedAction, RiskLevel, Route, NETWORK_CALL};

/// Built-in scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Scenario {
    /// Network call while offline.
    NetworkOff,
    /// Data processing over a slow link.
    HighLatency,
    /// Network call on a nearly empty battery.
    LowBattery,
    /// High-risk export with a supervisor present.
    SupervisedHighRisk,
}

impl Scenario {
    /// Every scenario, in listing order.
    pub const ALL: [Scenario; 4] = [
        Scenario::NetworkOff,
        Scenario::HighLatency,
        Scenario::LowBattery,
        Scenario::SupervisedHighRisk,
    ];

    /// The name accepted by `--scenario`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkOff => "network_off",
            Self::HighLatency => "high_latency",
            Self::LowBattery => "low_battery",
            Self::SupervisedHighRisk => "supervised_high_risk",
        }
    }

    /// One-line description for `dpe scenarios`.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NetworkOff => "NETWORK_CALL (LOW) with the network down",
            Self::HighLatency => "DATA_PROCESS (MEDIUM) over a 1200 ms link",
            Self::LowBattery => "NETWORK_CALL (LOW) at 5% battery",
            Self::SupervisedHighRisk => "DATA_EXPORT (HIGH) in supervised mode",
        }
    }

    /// Environment at decision time.
    pub fn context(&self) -> Result<Context, DpeError> {
        let context = match self {
            Self::NetworkOff => Context::new(false, 0, 0.75, true, false)?,
            Self::HighLatency => Context::new(true, 1200, 0.55, true, false)?,
            Self::LowBattery => Context::new(true, 120, 0.05, true, false)?,
            Self::SupervisedHighRisk => Context::new(true, 80, 0.80, true, true)?,
        };
        Ok(context)
    }

    /// The action under evaluation.
    pub fn action(&self) -> ProposedAction {
        match self {
            Self::NetworkOff | Self::LowBattery => ProposedAction::new(NETWORK_CALL, RiskLevel::Low),
            Self::HighLatency => ProposedAction::new("DATA_PROCESS", RiskLevel::Medium),
            Self::SupervisedHighRisk => ProposedAction::new("DATA_EXPORT", RiskLevel::High),
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price the four routes for a context.
///
/// LOCAL and DEGRADED are fixed; HYBRID and CLOUD latencies track the
/// observed round-trip time, with CLOUD paying an extra 80 ms hop.
pub fn candidate_costs(context: &Context) -> Result<BTreeMap<Route, CostVector>, DpeError> {
    let rtt = context.rtt_ms();
    Ok(BTreeMap::from([
        (Route::Local, CostVector::new(120, 0.05, 0.10, 0.02)?),
        (Route::Hybrid, CostVector::new(rtt.max(200), 0.15, 0.20, 0.20)?),
        (
            Route::Cloud,
            CostVector::new(rtt.saturating_add(80).max(300), 0.35, 0.30, 0.45)?,
        ),
        (Route::Degraded, CostVector::new(600, 0.02, 0.40, 0.00)?),
    ]))
}
