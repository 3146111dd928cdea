//! # Cost Normalizer
//!
//! Linear range scaling with clamping. Latency and dollar cost are mapped
//! into `[0, 1]`; privacy and reliability risk arrive already normalized.

use serde::{Deserialize, Serialize};

/// A closed input range mapped linearly onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormRange {
    /// Input mapped to 0.
    pub min: f64,
    /// Input mapped to 1.
    pub max: f64,
}

/// Default latency range: 0–2000 ms.
pub const LATENCY_RANGE_MS: NormRange = NormRange {
    min: 0.0,
    max: 2000.0,
};

/// Default dollar cost range: 0–10 currency units.
pub const COST_RANGE: NormRange = NormRange {
    min: 0.0,
    max: 10.0,
};

impl NormRange {
    /// Scale `value` into `[0, 1]`, clamping outside the range.
    ///
    /// A degenerate range (`max <= min`) maps everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Normalize latency over the default 0–2000 ms range.
pub fn norm_latency(latency_ms: u64) -> f64 {
    LATENCY_RANGE_MS.normalize(latency_ms as f64)
}

/// Normalize dollar cost over the default 0–10 range.
pub fn norm_cost(dollar_cost: f64) -> f64 {
    COST_RANGE.normalize(dollar_cost)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn latency_always_in_unit_interval(ms in any::<u64>()) {
            let n = norm_latency(ms);
            prop_assert!((0.0..=1.0).contains(&n));
        }

        #[test]
        fn cost_always_in_unit_interval(c in -1.0e6f64..1.0e6) {
            let n = norm_cost(c);
            prop_assert!((0.0..=1.0).contains(&n));
        }

        #[test]
        fn latency_is_monotonic(a in 0u64..10_000, b in 0u64..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(norm_latency(lo) <= norm_latency(hi));
        }
    }
}
