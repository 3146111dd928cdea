//! Router errors.

use thiserror::Error;

/// Errors from route selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouterError {
    /// No candidate remains after network filtering.
    #[error("no route available: every candidate was filtered out or none were supplied")]
    NoRouteAvailable,

    /// The router configuration is unusable.
    #[error("invalid router configuration: {0}")]
    InvalidConfig(String),
}
