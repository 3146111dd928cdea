//! # Decision Engine
//!
//! Runs one decision end to end: policy gate, route selection, redaction,
//! then a chained append to the configured audit log.

use std::collections::BTreeMap;

use anyhow::{Context as _, Result};
use serde::Serialize;
use uuid::Uuid;

use dpe_audit::{AuditEvent, AuditEventDraft, AuditLog, RedactionPolicy};
use dpe_core::{Context, CostVector, ProposedAction, Route, Timestamp};
use dpe_policy::{PolicyGate, PolicyOutcome};
use dpe_router::{RouteSelection, Router};

use crate::config::EngineConfig;

/// Everything produced by one decision.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionReport {
    /// Gate outcome.
    pub outcome: PolicyOutcome,
    /// Router outcome with its scoring breakdown.
    pub selection: RouteSelection,
    /// The record appended to the audit log.
    pub event: AuditEvent,
}

/// Gate, router and audit log bound to one configuration.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    router: Router,
    redaction: RedactionPolicy,
    log: AuditLog,
}

impl DecisionEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let router = Router::new(config.router.clone()).context("invalid router configuration")?;
        Ok(Self {
            router,
            redaction: config.redaction.clone(),
            log: AuditLog::open(&config.audit_log),
        })
    }

    /// The audit log this engine appends to.
    pub fn audit_log(&self) -> &AuditLog {
        &self.log
    }

    /// Decide on `action` and record the decision.
    ///
    /// The route is selected even when the gate denies the action so the
    /// audit record always names the route that would have been used.
    pub fn decide(
        &self,
        context: &Context,
        action: &ProposedAction,
        candidates: &BTreeMap<Route, CostVector>,
    ) -> Result<DecisionReport> {
        let outcome = PolicyGate::evaluate(context, action);
        let selection = self
            .router
            .select_route(context, candidates)
            .context("route selection failed")?;

        let draft = AuditEventDraft {
            timestamp_iso: Timestamp::now().to_rfc3339(),
            trace_id: Uuid::new_v4().to_string(),
            decision_id: Uuid::new_v4().to_string(),
            action_type: action.action_type().to_string(),
            policy_decision: outcome.decision,
            route_selected: selection.route,
            cost_vector: selection.cost,
            reason: outcome.reason.clone(),
            inputs_redacted: self.redaction.redact(context, action),
        };
        let event = self.log.append_chained(draft).with_context(|| {
            format!("failed to append to audit log {}", self.log.path().display())
        })?;

        tracing::info!(
            decision = %outcome.decision,
            route = %selection.route,
            decision_id = event.decision_id(),
            "decision recorded"
        );

        Ok(DecisionReport {
            outcome,
            selection,
            event,
        })
    }
}
