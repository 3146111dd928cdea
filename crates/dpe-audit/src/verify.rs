//! # Chain Verification
//!
//! Walks records in order, recomputing each hash and checking each link.
//! The first record must have a null `prev_hash`; every later record must
//! name its predecessor's hash. Verification only reports; a broken log is
//! left exactly as found.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::error::AuditError;
use crate::event::AuditEvent;

/// The first problem found in a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainIssue {
    /// The stored hash does not match the record content.
    HashMismatch {
        /// Hash stored in the record.
        stored: String,
        /// Hash recomputed from the content.
        computed: String,
    },
    /// The record's `prev_hash` does not name its predecessor.
    BrokenLink {
        /// Predecessor hash, `None` for the first record.
        expected: Option<String>,
        /// `prev_hash` stored in the record.
        found: Option<String>,
    },
    /// The line is not a valid audit record.
    Unparseable {
        /// Parser message.
        reason: String,
    },
}

/// Outcome of verifying a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainVerification {
    /// Records examined, including any after the first failure.
    pub total: usize,
    /// Records verified before the first failure.
    pub verified: usize,
    /// 0-based index of the first failing record.
    pub first_invalid: Option<usize>,
    /// What went wrong at `first_invalid`.
    pub issue: Option<ChainIssue>,
}

impl ChainVerification {
    /// Whether every record verified.
    pub fn is_valid(&self) -> bool {
        self.first_invalid.is_none()
    }
}

/// Incremental checker shared by the in-memory and file walkers.
struct Walker {
    expected_prev: Option<String>,
    result: ChainVerification,
}

impl Walker {
    fn new() -> Self {
        Self {
            expected_prev: None,
            result: ChainVerification {
                total: 0,
                verified: 0,
                first_invalid: None,
                issue: None,
            },
        }
    }

    fn fail(&mut self, index: usize, issue: ChainIssue) {
        if self.result.first_invalid.is_none() {
            self.result.first_invalid = Some(index);
            self.result.issue = Some(issue);
        }
    }

    fn check(&mut self, index: usize, event: &AuditEvent) -> Result<(), AuditError> {
        self.result.total += 1;
        if self.result.first_invalid.is_some() {
            return Ok(());
        }

        if event.prev_hash() != self.expected_prev.as_deref() {
            self.fail(
                index,
                ChainIssue::BrokenLink {
                    expected: self.expected_prev.clone(),
                    found: event.prev_hash().map(String::from),
                },
            );
            return Ok(());
        }

        let computed = event.compute_hash()?;
        if computed != event.hash() {
            self.fail(
                index,
                ChainIssue::HashMismatch {
                    stored: event.hash().to_string(),
                    computed,
                },
            );
            return Ok(());
        }

        self.expected_prev = Some(computed);
        self.result.verified += 1;
        Ok(())
    }

    fn unparseable(&mut self, index: usize, reason: String) {
        self.result.total += 1;
        self.fail(index, ChainIssue::Unparseable { reason });
    }

    fn finish(self) -> ChainVerification {
        self.result
    }
}

/// Verify an in-memory sequence of events.
pub fn verify_events(events: &[AuditEvent]) -> Result<ChainVerification, AuditError> {
    let mut walker = Walker::new();
    for (index, event) in events.iter().enumerate() {
        walker.check(index, event)?;
    }
    Ok(walker.finish())
}

/// Verify the log at `path`. An absent file verifies as an empty chain.
///
/// Lines that fail to parse are reported as [`ChainIssue::Unparseable`]
/// rather than aborting the walk.
pub fn verify_chain(path: impl AsRef<Path>) -> Result<ChainVerification, AuditError> {
    let path = path.as_ref();
    let mut walker = Walker::new();

    let file = match File::open(path) {
        Ok(f) => Some(f),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(AuditError::io(path, e)),
    };

    if let Some(file) = file {
        let mut index = 0;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| AuditError::io(path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEvent>(&line) {
                Ok(event) => walker.check(index, &event)?,
                Err(e) => walker.unparseable(index, e.to_string()),
            }
            index += 1;
        }
    }

    let result = walker.finish();
    if result.is_valid() {
        tracing::debug!(path = %path.display(), total = result.total, "audit chain verified");
    } else {
        tracing::warn!(
            path = %path.display(),
            first_invalid = ?result.first_invalid,
            issue = ?result.issue,
            "audit chain verification failed"
        );
    }
    Ok(result)
}

/// Parse every record in the log at `path`, in order.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<AuditEvent>, AuditError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| AuditError::io(path, e))?;
    let mut events = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| AuditError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|source| AuditError::MalformedLine {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}
