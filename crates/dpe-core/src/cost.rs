//! # Cost Vectors
//!
//! Per-route estimated cost across the four weighted dimensions. Supplied by
//! the caller, one per candidate route per request. `privacy_risk` and
//! `reliability_risk` arrive pre-normalized to `[0, 1]`; latency and dollar
//! cost are raw and normalized by the router.

use serde::{Deserialize, Serialize};

use crate::error::{check_unit_range, ValidationError};

/// Estimated cost of running an action on one route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CostVectorRepr")]
pub struct CostVector {
    latency_ms: u64,
    privacy_risk: f64,
    reliability_risk: f64,
    dollar_cost: f64,
}

impl CostVector {
    /// Create a cost vector.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if either risk lies outside `[0, 1]`, if
    /// `dollar_cost` is negative, or if any float is non-finite.
    pub fn new(
        latency_ms: u64,
        privacy_risk: f64,
        reliability_risk: f64,
        dollar_cost: f64,
    ) -> Result<Self, ValidationError> {
        check_unit_range("privacy_risk", privacy_risk, 0.0, 1.0, "[0, 1]")?;
        check_unit_range("reliability_risk", reliability_risk, 0.0, 1.0, "[0, 1]")?;
        check_unit_range("dollar_cost", dollar_cost, 0.0, f64::MAX, ">= 0")?;
        Ok(Self {
            latency_ms,
            privacy_risk,
            reliability_risk,
            dollar_cost,
        })
    }

    /// Expected latency in milliseconds.
    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }

    /// Privacy risk in `[0, 1]`.
    pub fn privacy_risk(&self) -> f64 {
        self.privacy_risk
    }

    /// Reliability risk in `[0, 1]`.
    pub fn reliability_risk(&self) -> f64 {
        self.reliability_risk
    }

    /// Monetary cost in currency units.
    pub fn dollar_cost(&self) -> f64 {
        self.dollar_cost
    }
}

#[derive(Deserialize)]
struct CostVectorRepr {
    latency_ms: u64,
    privacy_risk: f64,
    reliability_risk: f64,
    dollar_cost: f64,
}

impl TryFrom<CostVectorRepr> for CostVector {
    type Error = ValidationError;

    fn try_from(r: CostVectorRepr) -> Result<Self, Self::Error> {
        CostVector::new(r.latency_ms, r.privacy_risk, r.reliability_risk, r.dollar_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert!(CostVector::new(0, 0.0, 1.0, 0.0).is_ok());
        assert!(CostVector::new(u64::MAX, 1.0, 0.0, 1_000.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_risks_and_negative_cost() {
        assert!(CostVector::new(10, 1.2, 0.0, 0.0).is_err());
        assert!(CostVector::new(10, 0.0, -0.2, 0.0).is_err());
        assert!(CostVector::new(10, 0.0, 0.0, -1.0).is_err());
        assert!(CostVector::new(10, 0.0, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: CostVector = serde_json::from_str(
            r#"{"latency_ms":100,"privacy_risk":0.1,"reliability_risk":0.2,"dollar_cost":0.3}"#,
        )
        .unwrap();
        assert_eq!(ok.latency_ms(), 100);
        assert!(serde_json::from_str::<CostVector>(
            r#"{"latency_ms":100,"privacy_risk":3.0,"reliability_risk":0.2,"dollar_cost":0.3}"#,
        )
        .is_err());
    }
}
