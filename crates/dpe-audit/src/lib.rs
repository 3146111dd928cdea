//! # dpe-audit — Tamper-Evident Decision Audit Trail
//!
//! Records every policy/routing decision as one line of canonical JSON in an
//! append-only, hash-chained log.
//!
//! ## Record Lifecycle
//!
//! 1. The caller fills an [`AuditEventDraft`] (every field except the hash
//!    fields), typically using [`redact`] for `inputs_redacted`.
//! 2. [`AuditEventDraft::seal`] computes
//!    `SHA-256(prev_hash_or_empty || canonical(draft))` and returns an
//!    immutable [`AuditEvent`].
//! 3. [`AuditLog::append`] writes the sealed record as one line. Lines are
//!    never rewritten, reordered or removed.
//!
//! [`AuditLog::append_chained`] folds steps 2 and 3 under the destination's
//! lock: it reads the current head hash, seals, and writes as one
//! mutually-exclusive step, so concurrent writers in the process always
//! extend a single linear chain.
//!
//! ## Verification
//!
//! [`verify_chain`] re-walks a log, recomputing each digest and checking each
//! `prev_hash` link. It reports the first divergence; it never repairs.

pub mod error;
pub mod event;
pub mod log;
pub mod redact;
pub mod trace;
pub mod verify;

pub use error::AuditError;
pub use event::{AuditEvent, AuditEventDraft};
pub use log::{append, read_last_hash, AuditLog};
pub use redact::{redact, RedactedAction, RedactedContext, RedactedInputs, RedactionPolicy};
pub use trace::{canonicalize, hash_event};
pub use verify::{read_events, verify_chain, verify_events, ChainIssue, ChainVerification};
