//! # Audit Error Types
//!
//! Filesystem failures are propagated to the caller with the destination
//! path attached; nothing is retried.

use std::path::PathBuf;

use dpe_core::CanonicalizationError;
use thiserror::Error;

/// Errors from sealing, appending or reading audit records.
#[derive(Error, Debug)]
pub enum AuditError {
    /// An event could not be canonicalized for hashing or writing.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Reading or writing the log failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The log destination.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An existing line in the log is not a valid audit record.
    #[error("malformed audit record at {path}:{line}: {source}")]
    MalformedLine {
        /// The log destination.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },
}

impl AuditError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
