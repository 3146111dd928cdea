//! # Canonical Form and Chain Hashing
//!
//! Records are serialized with [`CanonicalBytes`] (RFC 8785): keys sorted at
//! every depth, no insignificant whitespace, deterministic number
//! formatting. Two logically equal records therefore produce byte-identical
//! output regardless of how they were constructed.
//!
//! The chain hash of a record is
//! `SHA-256(prev_hash_or_empty || canonical(record without prev_hash and hash))`
//! as lowercase hex.

use dpe_core::{sha256_chained, CanonicalBytes};

use crate::error::AuditError;
use crate::event::{AuditEvent, AuditEventDraft};

/// Canonical bytes of `event`, with or without `prev_hash` and `hash`.
///
/// With `include_hash_fields` the output is the exact log line (minus the
/// trailing newline). Without, it is the preimage suffix used for hashing.
pub fn canonicalize(
    event: &AuditEvent,
    include_hash_fields: bool,
) -> Result<CanonicalBytes, AuditError> {
    let bytes = if include_hash_fields {
        CanonicalBytes::new(event)?
    } else {
        CanonicalBytes::new(event.content())?
    };
    Ok(bytes)
}

/// Chain hash of `content` linked to `prev_hash`.
pub fn hash_event(content: &AuditEventDraft, prev_hash: Option<&str>) -> Result<String, AuditError> {
    let canonical = CanonicalBytes::new(content)?;
    Ok(sha256_chained(prev_hash, &canonical).to_hex())
}
