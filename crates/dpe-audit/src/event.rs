//! # Audit Events
//!
//! An [`AuditEventDraft`] carries every recorded field except the chain
//! fields. Sealing it against the predecessor's hash yields an
//! [`AuditEvent`], whose fields cannot be changed afterwards: any edit must
//! go back through a draft and produce a new hash.

use dpe_core::{CostVector, PolicyDecision, Route};
use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::redact::RedactedInputs;
use crate::trace::hash_event;

/// An audit record before it is linked into a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEventDraft {
    /// RFC 3339 UTC timestamp of the decision.
    pub timestamp_iso: String,
    /// Correlates records of one request.
    pub trace_id: String,
    /// Unique identifier of this decision.
    pub decision_id: String,
    /// Copied from the proposed action.
    pub action_type: String,
    /// Gate outcome.
    pub policy_decision: PolicyDecision,
    /// Router outcome.
    pub route_selected: Route,
    /// Cost of the selected route.
    pub cost_vector: CostVector,
    /// Gate justification.
    pub reason: String,
    /// Redacted decision inputs.
    pub inputs_redacted: RedactedInputs,
}

impl AuditEventDraft {
    /// Link this draft to its predecessor and compute its hash.
    ///
    /// `prev_hash` is the predecessor's hash, or `None` for the first
    /// record in a log.
    pub fn seal(self, prev_hash: Option<String>) -> Result<AuditEvent, AuditError> {
        let hash = hash_event(&self, prev_hash.as_deref())?;
        Ok(AuditEvent {
            content: self,
            prev_hash,
            hash,
        })
    }
}

/// A sealed, immutable audit record as written to the log.
///
/// Serialized flat: the draft's fields followed by `prev_hash` (string or
/// null) and `hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    #[serde(flatten)]
    content: AuditEventDraft,
    prev_hash: Option<String>,
    hash: String,
}

impl AuditEvent {
    /// Every field except the chain fields.
    pub fn content(&self) -> &AuditEventDraft {
        &self.content
    }

    /// Hash of the predecessor, `None` for the first record.
    pub fn prev_hash(&self) -> Option<&str> {
        self.prev_hash.as_deref()
    }

    /// Lowercase hex SHA-256 of this record.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Unique identifier of the recorded decision.
    pub fn decision_id(&self) -> &str {
        &self.content.decision_id
    }

    /// Recorded gate outcome.
    pub fn policy_decision(&self) -> PolicyDecision {
        self.content.policy_decision
    }

    /// Recorded router outcome.
    pub fn route_selected(&self) -> Route {
        self.content.route_selected
    }

    /// Recompute the hash from the content and stored `prev_hash`.
    pub fn compute_hash(&self) -> Result<String, AuditError> {
        hash_event(&self.content, self.prev_hash.as_deref())
    }

    /// Whether the stored hash matches the content.
    pub fn verify_hash(&self) -> Result<bool, AuditError> {
        Ok(self.compute_hash()? == self.hash)
    }

    /// Discard the chain fields, for deriving a corrected record.
    pub fn into_draft(self) -> AuditEventDraft {
        self.content
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::draft;
    use super::*;
    use serde_json::json;

    #[test]
    fn seal_records_prev_hash() {
        let first = draft(1).seal(None).unwrap();
        assert_eq!(first.prev_hash(), None);
        assert_eq!(first.hash().len(), 64);

        let second = draft(2).seal(Some(first.hash().to_string())).unwrap();
        assert_eq!(second.prev_hash(), Some(first.hash()));
        assert!(second.verify_hash().unwrap());
    }

    #[test]
    fn identical_drafts_hash_identically() {
        let a = draft(1).seal(None).unwrap();
        let b = draft(1).seal(None).unwrap();
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn prev_hash_changes_hash() {
        let a = draft(1).seal(None).unwrap();
        let b = draft(1).seal(Some("a".repeat(64))).unwrap();
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn every_field_contributes_to_hash() {
        let base = draft(1).seal(None).unwrap();
        let mutations: [fn(&mut AuditEventDraft); 10] = [
            |d| d.timestamp_iso = "2026-01-15T12:00:01Z".into(),
            |d| d.trace_id = "other".into(),
            |d| d.decision_id = "other".into(),
            |d| d.action_type = "NETWORK_CALL".into(),
            |d| d.policy_decision = PolicyDecision::Deny,
            |d| d.route_selected = Route::Degraded,
            |d| d.cost_vector = CostVector::new(121, 0.05, 0.1, 0.02).unwrap(),
            |d| d.reason = "Other.".into(),
            |d| d.inputs_redacted.context.battery_level = 0.56,
            |d| {
                d.inputs_redacted.action.metadata.insert("k".into(), json!(1));
            },
        ];
        for (i, mutate) in mutations.iter().enumerate() {
            let mut d = draft(1);
            mutate(&mut d);
            let sealed = d.seal(None).unwrap();
            assert_ne!(sealed.hash(), base.hash(), "mutation {i} did not change the hash");
        }
    }

    #[test]
    fn serialized_form_is_flat_with_chain_fields() {
        let event = draft(1).seal(None).unwrap();
        let v = serde_json::to_value(&event).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 11);
        assert_eq!(obj["prev_hash"], json!(null));
        assert_eq!(obj["hash"], json!(event.hash()));
        assert_eq!(obj["policy_decision"], "ALLOW");
        assert_eq!(obj["route_selected"], "LOCAL");
        assert_eq!(obj["cost_vector"]["latency_ms"], 120);
    }

    #[test]
    fn deserialized_event_verifies() {
        let event = draft(3).seal(Some("b".repeat(64))).unwrap();
        let line = serde_json::to_string(&event).unwrap();
        let back: AuditEvent = serde_json::from_str(&line).unwrap();
        assert_eq!(back, event);
        assert!(back.verify_hash().unwrap());
    }

    #[test]
    fn edited_content_fails_verification() {
        let event = draft(1).seal(None).unwrap();
        let mut v = serde_json::to_value(&event).unwrap();
        v["reason"] = json!("Edited.");
        let forged: AuditEvent = serde_json::from_value(v).unwrap();
        assert!(!forged.verify_hash().unwrap());
    }
}
