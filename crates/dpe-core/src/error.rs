//! # Error Hierarchy
//!
//! Structured error types shared by the decision policy engine crates,
//! built with `thiserror`. Validation errors carry the offending field and
//! value so a caller can report the rejected input without guesswork.

use thiserror::Error;

/// Top-level error type for the decision policy engine.
#[derive(Error, Debug)]
pub enum DpeError {
    /// Canonicalization failure during digest computation.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Value type validation failure at construction.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Validation errors raised when constructing value types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `risk_level` is not one of LOW, MEDIUM, HIGH.
    #[error("risk_level must be one of [\"HIGH\", \"LOW\", \"MEDIUM\"], got \"{0}\"")]
    InvalidRiskLevel(String),

    /// A route code is not one of LOCAL, HYBRID, CLOUD, DEGRADED.
    #[error("unknown route \"{0}\" (expected LOCAL, HYBRID, CLOUD or DEGRADED)")]
    UnknownRoute(String),

    /// A policy decision code is not one of ALLOW, DENY, SUPERVISED.
    #[error("unknown policy decision \"{0}\" (expected ALLOW, DENY or SUPERVISED)")]
    UnknownPolicyDecision(String),

    /// A numeric field lies outside its permitted range.
    #[error("{field} must be within {expected}, got {value}")]
    OutOfRange {
        /// The field that failed validation.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable permitted range.
        expected: &'static str,
    },

    /// A numeric field is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// The field that failed validation.
        field: &'static str,
    },

    /// Timestamp string is not valid RFC 3339.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Check that `value` is finite and within `[min, max]`.
pub(crate) fn check_unit_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            expected,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_risk_level_mentions_field() {
        let err = ValidationError::InvalidRiskLevel("UNKNOWN".to_string());
        let msg = err.to_string();
        assert!(msg.contains("risk_level"));
        assert!(msg.contains("UNKNOWN"));
    }

    #[test]
    fn out_of_range_display() {
        let err = ValidationError::OutOfRange {
            field: "battery_level",
            value: 1.5,
            expected: "[0, 1]",
        };
        let msg = err.to_string();
        assert!(msg.contains("battery_level"));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn dpe_error_wraps_validation() {
        let err = DpeError::from(ValidationError::NonFinite {
            field: "privacy_risk",
        });
        assert!(err.to_string().starts_with("validation error"));
    }

    #[test]
    fn check_unit_range_accepts_bounds() {
        assert!(check_unit_range("x", 0.0, 0.0, 1.0, "[0, 1]").is_ok());
        assert!(check_unit_range("x", 1.0, 0.0, 1.0, "[0, 1]").is_ok());
    }

    #[test]
    fn check_unit_range_rejects_nan_and_outside() {
        assert_eq!(
            check_unit_range("x", f64::NAN, 0.0, 1.0, "[0, 1]"),
            Err(ValidationError::NonFinite { field: "x" })
        );
        assert!(check_unit_range("x", -0.01, 0.0, 1.0, "[0, 1]").is_err());
        assert!(check_unit_range("x", f64::INFINITY, 0.0, f64::MAX, ">= 0").is_err());
    }
}
