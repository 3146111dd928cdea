//! # Policy Gate
//!
//! The rule table and its first-match evaluator.

use dpe_core::{Context, PolicyDecision, ProposedAction, RiskLevel};
use serde::Serialize;

/// Battery level below which network calls are denied.
pub const LOW_BATTERY_THRESHOLD: f64 = 0.10;

/// Reason attached when no rule matches.
const ALLOW_REASON: &str = "Action permitted.";

/// One entry of the ordered policy table.
#[derive(Debug, Clone, Copy)]
pub struct PolicyRule {
    /// Stable rule identifier, used in logs.
    pub name: &'static str,
    /// Decision returned when the rule matches.
    pub decision: PolicyDecision,
    /// Human-readable reason returned when the rule matches.
    pub reason: &'static str,
    predicate: fn(&Context, &ProposedAction) -> bool,
}

impl PolicyRule {
    /// Whether this rule applies to the request.
    pub fn matches(&self, context: &Context, action: &ProposedAction) -> bool {
        (self.predicate)(context, action)
    }
}

fn high_risk_unsupervised(context: &Context, action: &ProposedAction) -> bool {
    action.risk_level() == RiskLevel::High && !context.supervised_mode()
}

fn network_unavailable(context: &Context, action: &ProposedAction) -> bool {
    action.is_network_call() && !context.network_available()
}

fn battery_low(context: &Context, action: &ProposedAction) -> bool {
    context.battery_level() < LOW_BATTERY_THRESHOLD && action.is_network_call()
}

/// The policy table in priority order. Order is part of the policy.
pub const RULES: [PolicyRule; 3] = [
    PolicyRule {
        name: "high_risk_unsupervised",
        decision: PolicyDecision::Supervised,
        reason: "High risk action requires supervision.",
        predicate: high_risk_unsupervised,
    },
    PolicyRule {
        name: "network_unavailable",
        decision: PolicyDecision::Deny,
        reason: "Network unavailable for network call.",
        predicate: network_unavailable,
    },
    PolicyRule {
        name: "battery_low",
        decision: PolicyDecision::Deny,
        reason: "Battery too low for network call.",
        predicate: battery_low,
    },
];

/// Result of evaluating a proposed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyOutcome {
    /// The gate decision.
    pub decision: PolicyDecision,
    /// Human-readable justification, recorded in the audit trail.
    pub reason: String,
    /// Name of the matching rule, `None` for the ALLOW fallthrough.
    pub rule: Option<&'static str>,
}

/// Stateless policy gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyGate;

impl PolicyGate {
    /// The ordered rule table this gate evaluates.
    pub fn rules() -> &'static [PolicyRule] {
        &RULES
    }

    /// Evaluate a proposed action against the rule table.
    ///
    /// Deterministic and total: identical inputs always yield the identical
    /// outcome.
    pub fn evaluate(context: &Context, action: &ProposedAction) -> PolicyOutcome {
        for rule in Self::rules() {
            if rule.matches(context, action) {
                tracing::debug!(
                    rule = rule.name,
                    decision = %rule.decision,
                    action_type = action.action_type(),
                    "policy rule matched"
                );
                return PolicyOutcome {
                    decision: rule.decision,
                    reason: rule.reason.to_string(),
                    rule: Some(rule.name),
                };
            }
        }
        tracing::debug!(action_type = action.action_type(), "no policy rule matched");
        PolicyOutcome {
            decision: PolicyDecision::Allow,
            reason: ALLOW_REASON.to_string(),
            rule: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpe_core::NETWORK_CALL;

    fn ctx(network: bool, battery: f64, supervised: bool) -> Context {
        Context::new(network, 50, battery, true, supervised).unwrap()
    }

    #[test]
    fn high_risk_requires_supervision() {
        let action = ProposedAction::new("DATA_EXPORT", RiskLevel::High);
        let out = PolicyGate::evaluate(&ctx(true, 0.8, false), &action);
        assert_eq!(out.decision, PolicyDecision::Supervised);
        assert!(out.reason.to_lowercase().contains("supervision"));
        assert_eq!(out.rule, Some("high_risk_unsupervised"));
    }

    #[test]
    fn high_risk_in_supervised_mode_is_allowed() {
        let action = ProposedAction::new("DATA_EXPORT", RiskLevel::High);
        let out = PolicyGate::evaluate(&ctx(true, 0.8, true), &action);
        assert_eq!(out.decision, PolicyDecision::Allow);
    }

    #[test]
    fn network_call_denied_without_network() {
        let action = ProposedAction::new(NETWORK_CALL, RiskLevel::Low);
        let out = PolicyGate::evaluate(&ctx(false, 0.9, true), &action);
        assert_eq!(out.decision, PolicyDecision::Deny);
        assert!(out.reason.to_lowercase().contains("network"));
    }

    #[test]
    fn network_call_denied_on_low_battery() {
        let action = ProposedAction::new(NETWORK_CALL, RiskLevel::Low);
        let out = PolicyGate::evaluate(&ctx(true, 0.05, true), &action);
        assert_eq!(out.decision, PolicyDecision::Deny);
        assert!(out.reason.to_lowercase().contains("battery"));
    }

    #[test]
    fn battery_threshold_is_strict() {
        let action = ProposedAction::new(NETWORK_CALL, RiskLevel::Low);
        let out = PolicyGate::evaluate(&ctx(true, LOW_BATTERY_THRESHOLD, true), &action);
        assert_eq!(out.decision, PolicyDecision::Allow);
    }

    #[test]
    fn network_rule_precedes_battery_rule() {
        let action = ProposedAction::new(NETWORK_CALL, RiskLevel::Medium);
        let out = PolicyGate::evaluate(&ctx(false, 0.01, true), &action);
        assert_eq!(out.rule, Some("network_unavailable"));
    }

    #[test]
    fn supervision_precedes_every_deny_rule() {
        let action = ProposedAction::new(NETWORK_CALL, RiskLevel::High);
        let out = PolicyGate::evaluate(&ctx(false, 0.01, false), &action);
        assert_eq!(out.decision, PolicyDecision::Supervised);
    }

    #[test]
    fn low_battery_does_not_affect_local_actions() {
        let action = ProposedAction::new("DATA_PROCESS", RiskLevel::Low);
        let out = PolicyGate::evaluate(&ctx(false, 0.01, true), &action);
        assert_eq!(out.decision, PolicyDecision::Allow);
        assert!(out.reason.to_lowercase().contains("permitted"));
        assert_eq!(out.rule, None);
    }

    #[test]
    fn rule_table_order_is_fixed() {
        let names: Vec<&str> = PolicyGate::rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["high_risk_unsupervised", "network_unavailable", "battery_low"]
        );
    }

    #[test]
    fn outcome_serializes_decision_code() {
        let action = ProposedAction::new(NETWORK_CALL, RiskLevel::Low);
        let out = PolicyGate::evaluate(&ctx(false, 0.5, true), &action);
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["decision"], "DENY");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn risk() -> impl Strategy<Value = RiskLevel> {
        prop_oneof![
            Just(RiskLevel::Low),
            Just(RiskLevel::Medium),
            Just(RiskLevel::High)
        ]
    }

    fn action_type() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(dpe_core::NETWORK_CALL.to_string()),
            "[A-Z_]{1,12}".prop_map(String::from),
        ]
    }

    proptest! {
        #[test]
        fn evaluation_is_deterministic(
            network in any::<bool>(),
            battery in 0.0f64..=1.0,
            supervised in any::<bool>(),
            level in risk(),
            kind in action_type(),
        ) {
            let context = Context::new(network, 10, battery, true, supervised).unwrap();
            let action = ProposedAction::new(kind, level);
            prop_assert_eq!(
                PolicyGate::evaluate(&context, &action),
                PolicyGate::evaluate(&context, &action)
            );
        }

        #[test]
        fn unsupervised_high_risk_always_supervised(
            network in any::<bool>(),
            battery in 0.0f64..=1.0,
            kind in action_type(),
        ) {
            let context = Context::new(network, 10, battery, true, false).unwrap();
            let action = ProposedAction::new(kind, RiskLevel::High);
            prop_assert_eq!(
                PolicyGate::evaluate(&context, &action).decision,
                PolicyDecision::Supervised
            );
        }

        #[test]
        fn non_network_actions_never_denied(
            network in any::<bool>(),
            battery in 0.0f64..=1.0,
            supervised in any::<bool>(),
            level in risk(),
        ) {
            let context = Context::new(network, 10, battery, true, supervised).unwrap();
            let action = ProposedAction::new("DATA_PROCESS", level);
            prop_assert_ne!(
                PolicyGate::evaluate(&context, &action).decision,
                PolicyDecision::Deny
            );
        }
    }
}
