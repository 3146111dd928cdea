//! # Router Configuration
//!
//! Scoring weights, normalization ranges and the tie-break order. Passed
//! into [`Router::new`](crate::Router::new) rather than held as module
//! state, so tests and deployments can override any part of it. Loadable
//! from YAML or JSON; every field has a default.

use dpe_core::Route;
use serde::{Deserialize, Serialize};

use crate::error::RouterError;
use crate::normalize::{NormRange, COST_RANGE, LATENCY_RANGE_MS};
use crate::router::NormalizedCost;

/// Per-dimension scoring weights. Keys match the cost vector dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    /// Weight of normalized latency.
    pub latency_ms: f64,
    /// Weight of privacy risk.
    pub privacy_risk: f64,
    /// Weight of reliability risk.
    pub reliability_risk: f64,
    /// Weight of normalized dollar cost.
    pub dollar_cost: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            latency_ms: 0.45,
            privacy_risk: 0.25,
            reliability_risk: 0.20,
            dollar_cost: 0.10,
        }
    }
}

impl Weights {
    /// Weighted sum of normalized dimensions, summed in dimension order.
    pub fn score(&self, n: &NormalizedCost) -> f64 {
        self.latency_ms * n.latency_ms
            + self.privacy_risk * n.privacy_risk
            + self.reliability_risk * n.reliability_risk
            + self.dollar_cost * n.dollar_cost
    }

    fn iter(&self) -> [(&'static str, f64); 4] {
        [
            ("latency_ms", self.latency_ms),
            ("privacy_risk", self.privacy_risk),
            ("reliability_risk", self.reliability_risk),
            ("dollar_cost", self.dollar_cost),
        ]
    }
}

/// Full router configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Scoring weights.
    pub weights: Weights,
    /// Latency range in milliseconds mapped onto `[0, 1]`.
    pub latency_range: NormRange,
    /// Dollar cost range mapped onto `[0, 1]`.
    pub cost_range: NormRange,
    /// Tie-break order, most preferred first. Must list each route once.
    pub tie_break: Vec<Route>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            latency_range: LATENCY_RANGE_MS,
            cost_range: COST_RANGE,
            tie_break: Route::ALL.to_vec(),
        }
    }
}

impl RouterConfig {
    /// Check the configuration is usable.
    ///
    /// Weights must be finite and non-negative; they need not sum to 1.
    /// Ranges must be finite with `min <= max`. The tie-break list must be a
    /// permutation of all four routes.
    pub fn validate(&self) -> Result<(), RouterError> {
        for (name, w) in self.weights.iter() {
            if !w.is_finite() || w < 0.0 {
                return Err(RouterError::InvalidConfig(format!(
                    "weight {name} must be finite and non-negative, got {w}"
                )));
            }
        }
        for (name, r) in [("latency_range", self.latency_range), ("cost_range", self.cost_range)] {
            if !r.min.is_finite() || !r.max.is_finite() || r.min > r.max {
                return Err(RouterError::InvalidConfig(format!(
                    "{name} must satisfy min <= max with finite bounds, got [{}, {}]",
                    r.min, r.max
                )));
            }
        }
        let complete = self.tie_break.len() == Route::ALL.len()
            && Route::ALL.iter().all(|r| self.tie_break.contains(r));
        if !complete {
            return Err(RouterError::InvalidConfig(format!(
                "tie_break must list each of LOCAL, HYBRID, CLOUD, DEGRADED exactly once, got {:?}",
                self.tie_break
            )));
        }
        Ok(())
    }

    /// Position of `route` in the tie-break order (lower wins).
    pub fn tie_break_rank(&self, route: Route) -> usize {
        self.tie_break
            .iter()
            .position(|r| *r == route)
            .unwrap_or(self.tie_break.len())
    }
}
