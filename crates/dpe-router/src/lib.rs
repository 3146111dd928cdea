//! # dpe-router — Cost-Based Route Selection
//!
//! Chooses where an action runs among LOCAL, HYBRID, CLOUD and DEGRADED from
//! caller-supplied cost vectors.
//!
//! ## Algorithm
//!
//! 1. **Filter.** Without network, CLOUD is dropped no matter what the
//!    caller supplied. An empty remainder is [`RouterError::NoRouteAvailable`].
//! 2. **Score** every remaining candidate (lower is better):
//!    `0.45·lat + 0.25·privacy + 0.20·reliability + 0.10·cost`, where latency
//!    and cost are clamped into `[0, 1]` over `[0, 2000]` ms and `[0, 10]`
//!    currency units.
//! 3. **Select.** Offline with LOCAL present picks LOCAL; offline with only
//!    DEGRADED as a fallback picks DEGRADED; otherwise the minimum score
//!    wins, ties broken by the configured order LOCAL < HYBRID < CLOUD <
//!    DEGRADED.
//!
//! Weights, ranges and tie-break order live in [`RouterConfig`], passed to
//! [`Router::new`]. The router holds no mutable state; the same inputs
//! always produce the same [`RouteSelection`].

pub mod config;
pub mod error;
pub mod normalize;
pub mod router;

pub use config::{RouterConfig, Weights};
pub use error::RouterError;
pub use normalize::{norm_cost, norm_latency, NormRange, COST_RANGE, LATENCY_RANGE_MS};
pub use router::{NormalizedCost, RouteExplanation, RouteSelection, Router, SelectionBasis};
