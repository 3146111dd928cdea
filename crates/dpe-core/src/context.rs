//! # Decision Context
//!
//! Snapshot of device and environment state consumed by both the policy
//! gate and the router. Built fresh per request and never mutated.

use serde::{Deserialize, Serialize};

use crate::error::{check_unit_range, ValidationError};

/// Locale assumed when the caller does not supply one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Environment state at decision time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ContextRepr")]
pub struct Context {
    network_available: bool,
    rtt_ms: u64,
    battery_level: f64,
    user_present: bool,
    supervised_mode: bool,
    locale: String,
}

impl Context {
    /// Create a context with the default locale.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `battery_level` is not a finite value
    /// within `[0, 1]`.
    pub fn new(
        network_available: bool,
        rtt_ms: u64,
        battery_level: f64,
        user_present: bool,
        supervised_mode: bool,
    ) -> Result<Self, ValidationError> {
        check_unit_range("battery_level", battery_level, 0.0, 1.0, "[0, 1]")?;
        Ok(Self {
            network_available,
            rtt_ms,
            battery_level,
            user_present,
            supervised_mode,
            locale: DEFAULT_LOCALE.to_string(),
        })
    }

    /// Replace the locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Whether the network is reachable.
    pub fn network_available(&self) -> bool {
        self.network_available
    }

    /// Measured round-trip time in milliseconds.
    pub fn rtt_ms(&self) -> u64 {
        self.rtt_ms
    }

    /// Remaining battery in `[0, 1]`.
    pub fn battery_level(&self) -> f64 {
        self.battery_level
    }

    /// Whether a user is physically present.
    pub fn user_present(&self) -> bool {
        self.user_present
    }

    /// Whether a supervisor is already overseeing execution.
    pub fn supervised_mode(&self) -> bool {
        self.supervised_mode
    }

    /// BCP 47 locale tag.
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

#[derive(Deserialize)]
struct ContextRepr {
    network_available: bool,
    rtt_ms: u64,
    battery_level: f64,
    user_present: bool,
    supervised_mode: bool,
    #[serde(default = "default_locale")]
    locale: String,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl TryFrom<ContextRepr> for Context {
    type Error = ValidationError;

    fn try_from(r: ContextRepr) -> Result<Self, Self::Error> {
        Ok(Context::new(
            r.network_available,
            r.rtt_ms,
            r.battery_level,
            r.user_present,
            r.supervised_mode,
        )?
        .with_locale(r.locale))
    }
}
