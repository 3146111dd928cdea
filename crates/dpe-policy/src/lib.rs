//! # dpe-policy — Policy Gate
//!
//! Decides whether a proposed action may run in a given context.
//!
//! ## Rule Precedence
//!
//! Rules are an ordered table evaluated top to bottom; the first match wins
//! and later rules are never consulted:
//!
//! | # | Rule | Condition | Decision |
//! |---|------|-----------|----------|
//! | 1 | `high_risk_unsupervised` | risk HIGH and not supervised | SUPERVISED |
//! | 2 | `network_unavailable` | NETWORK_CALL and network down | DENY |
//! | 3 | `battery_low` | battery < 0.10 and NETWORK_CALL | DENY |
//! | - | (fallthrough) | otherwise | ALLOW |
//!
//! A high-risk unsupervised action is SUPERVISED even when rules 2 or 3
//! would also deny it.
//!
//! Evaluation is pure and total: no I/O, no shared state, no error path.

pub mod gate;

pub use gate::{PolicyGate, PolicyOutcome, PolicyRule, LOW_BATTERY_THRESHOLD, RULES};
