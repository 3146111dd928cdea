//! # Router
//!
//! Filtering, scoring and selection. See the crate docs for the algorithm.

use std::collections::BTreeMap;

use dpe_core::{Context, CostVector, Route};
use serde::Serialize;

use crate::config::{RouterConfig, Weights};
use crate::error::RouterError;

/// A cost vector with every dimension mapped into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedCost {
    /// Normalized latency.
    pub latency_ms: f64,
    /// Privacy risk, passed through.
    pub privacy_risk: f64,
    /// Reliability risk, passed through.
    pub reliability_risk: f64,
    /// Normalized dollar cost.
    pub dollar_cost: f64,
}

/// Which selection rule produced the chosen route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionBasis {
    /// Offline and LOCAL was a candidate.
    OfflineLocal,
    /// Offline, no LOCAL, DEGRADED was a candidate.
    OfflineDegraded,
    /// Lowest weighted score, ties broken by the configured order.
    MinimumScore,
}

/// Everything needed to reconstruct a routing decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteExplanation {
    /// The weights used for scoring.
    pub weights: Weights,
    /// Normalized dimensions of every scored candidate.
    pub normalized: BTreeMap<Route, NormalizedCost>,
    /// Weighted score of every scored candidate (lower is better).
    pub scores: BTreeMap<Route, f64>,
    /// Candidates dropped before scoring because the network is down.
    pub excluded: Vec<Route>,
    /// The rule that picked the route.
    pub basis: SelectionBasis,
}

/// Output of [`Router::select_route`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSelection {
    /// The chosen route.
    pub route: Route,
    /// The caller-supplied cost of the chosen route.
    pub cost: CostVector,
    /// Scoring breakdown.
    pub explanation: RouteExplanation,
}

/// Weighted-cost router.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    /// Build a router from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfig`] if the configuration fails
    /// [`RouterConfig::validate`].
    pub fn new(config: RouterConfig) -> Result<Self, RouterError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this router scores with.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Normalize every dimension of a cost vector.
    pub fn normalize(&self, cost: &CostVector) -> NormalizedCost {
        NormalizedCost {
            latency_ms: self.config.latency_range.normalize(cost.latency_ms() as f64),
            privacy_risk: cost.privacy_risk(),
            reliability_risk: cost.reliability_risk(),
            dollar_cost: self.config.cost_range.normalize(cost.dollar_cost()),
        }
    }

    /// Weighted score of a cost vector (lower is better).
    pub fn score(&self, cost: &CostVector) -> f64 {
        self.config.weights.score(&self.normalize(cost))
    }

    /// Select a route for the given context among the candidates.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoRouteAvailable`] if no candidate remains
    /// after CLOUD is removed for an offline context.
    pub fn select_route(
        &self,
        context: &Context,
        candidates: &BTreeMap<Route, CostVector>,
    ) -> Result<RouteSelection, RouterError> {
        let online = context.network_available();

        let mut excluded = Vec::new();
        let mut eligible: BTreeMap<Route, CostVector> = BTreeMap::new();
        for (route, cost) in candidates {
            if !online && route.requires_network() {
                excluded.push(*route);
            } else {
                eligible.insert(*route, *cost);
            }
        }

        if eligible.is_empty() {
            tracing::debug!(online, supplied = candidates.len(), "no route available");
            return Err(RouterError::NoRouteAvailable);
        }

        let mut normalized = BTreeMap::new();
        let mut scores = BTreeMap::new();
        for (route, cost) in &eligible {
            let n = self.normalize(cost);
            scores.insert(*route, self.config.weights.score(&n));
            normalized.insert(*route, n);
        }

        let (route, basis) = if !online && eligible.contains_key(&Route::Local) {
            (Route::Local, SelectionBasis::OfflineLocal)
        } else if !online && eligible.contains_key(&Route::Degraded) {
            (Route::Degraded, SelectionBasis::OfflineDegraded)
        } else {
            (self.minimum_score(&scores)?, SelectionBasis::MinimumScore)
        };

        let cost = eligible[&route];
        tracing::debug!(
            route = %route,
            ?basis,
            score = scores[&route],
            candidates = eligible.len(),
            "route selected"
        );

        Ok(RouteSelection {
            route,
            cost,
            explanation: RouteExplanation {
                weights: self.config.weights,
                normalized,
                scores,
                excluded,
                basis,
            },
        })
    }

    fn minimum_score(&self, scores: &BTreeMap<Route, f64>) -> Result<Route, RouterError> {
        scores
            .iter()
            .min_by(|(ra, sa), (rb, sb)| {
                sa.total_cmp(sb).then_with(|| {
                    self.config
                        .tie_break_rank(**ra)
                        .cmp(&self.config.tie_break_rank(**rb))
                })
            })
            .map(|(route, _)| *route)
            .ok_or(RouterError::NoRouteAvailable)
    }
}
