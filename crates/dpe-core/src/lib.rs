#![deny(missing_docs)]

//! # dpe-core — Foundational Types for the Decision Policy Engine
//!
//! Every other crate in the workspace depends on `dpe-core`; it depends on
//! nothing internal. It defines the value types a decision request is built
//! from, the closed sets a decision resolves to, and the canonical
//! serialization and digest primitives the audit chain is built on.
//!
//! ## Design Principles
//!
//! 1. **Validated construction.** [`Context`], [`ProposedAction`] and
//!    [`CostVector`] have private fields and fallible constructors. Serde
//!    deserialization runs the same checks, so an out-of-range value never
//!    reaches the policy gate or the router.
//!
//! 2. **Closed sets are enums.** [`Route`], [`PolicyDecision`] and
//!    [`RiskLevel`] serialize to their upper-case string codes.
//!
//! 3. **[`CanonicalBytes`] is the sole path to digest computation.** Every
//!    audit digest flows through `CanonicalBytes::new()` (RFC 8785 / JCS).
//!
//! 4. **[`DpeError`] hierarchy.** Structured errors with `thiserror`, no
//!    `.unwrap()` outside tests.

pub mod action;
pub mod canonical;
pub mod context;
pub mod cost;
pub mod decision;
pub mod digest;
pub mod error;
pub mod route;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use action::{ProposedAction, RiskLevel, NETWORK_CALL};
pub use canonical::CanonicalBytes;
pub use context::{Context, DEFAULT_LOCALE};
pub use cost::CostVector;
pub use decision::PolicyDecision;
pub use digest::{sha256_chained, sha256_digest, sha256_hex, ContentDigest};
pub use error::{CanonicalizationError, DpeError, ValidationError};
pub use route::Route;
pub use temporal::Timestamp;
