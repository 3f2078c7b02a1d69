// crates/jsonmart-admission-core/src/core/trace.rs
// ============================================================================
// Module: Decision Trace
// Description: Immutable, hash-anchored record of one admission decision.
// Purpose: Make every admission decision explainable and replayable.
// Dependencies: crate::core::{hashing, identifiers, policy, reason, time}, serde
// ============================================================================

//! ## Overview
//! A [`DecisionTrace`] captures the inputs and reason codes behind one
//! admission decision. It is constructed once, hashed over canonical JSON,
//! persisted alongside the order, and never mutated. The human-readable
//! logic trace is re-derived from the stored reason codes on demand; the
//! rendered text is a view, not separately stored truth.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::HashAlgorithm;
use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::identifiers::PolicyId;
use crate::core::identifiers::Sku;
use crate::core::reason;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Decision Trace
// ============================================================================

/// Append-only record of one admission decision.
///
/// # Invariants
/// - Immutable once recorded; one trace per order.
/// - `trace_hash` covers all other fields over canonical JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTrace {
    /// Policy the decision was evaluated against.
    pub policy_id: PolicyId,
    /// Number of candidate offers examined during the run.
    pub candidates_evaluated: usize,
    /// SKU the decision settled on.
    pub selected_sku: Sku,
    /// Ordered reason codes recorded during evaluation.
    pub reason_codes: Vec<String>,
    /// Time the trace was recorded.
    pub recorded_at: Timestamp,
    /// Canonical content hash of the trace body.
    pub trace_hash: HashDigest,
}

/// Hashable trace body, split out so the hash never covers itself.
#[derive(Serialize)]
struct TraceBody<'a> {
    /// Policy the decision was evaluated against.
    policy_id: &'a PolicyId,
    /// Number of candidate offers examined during the run.
    candidates_evaluated: usize,
    /// SKU the decision settled on.
    selected_sku: &'a Sku,
    /// Ordered reason codes recorded during evaluation.
    reason_codes: &'a [String],
    /// Time the trace was recorded.
    recorded_at: Timestamp,
}

impl DecisionTrace {
    /// Records an immutable trace for one admission decision.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when canonical hashing of the trace body fails.
    pub fn record(
        policy_id: PolicyId,
        candidates_evaluated: usize,
        selected_sku: Sku,
        reason_codes: Vec<String>,
        recorded_at: Timestamp,
        algorithm: HashAlgorithm,
    ) -> Result<Self, HashError> {
        let body = TraceBody {
            policy_id: &policy_id,
            candidates_evaluated,
            selected_sku: &selected_sku,
            reason_codes: &reason_codes,
            recorded_at,
        };
        let trace_hash = hash_canonical_json(algorithm, &body)?;
        Ok(Self {
            policy_id,
            candidates_evaluated,
            selected_sku,
            reason_codes,
            recorded_at,
            trace_hash,
        })
    }

    /// Recomputes the canonical hash and checks it against `trace_hash`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when canonical hashing of the trace body fails.
    pub fn verify_hash(&self) -> Result<bool, HashError> {
        let body = TraceBody {
            policy_id: &self.policy_id,
            candidates_evaluated: self.candidates_evaluated,
            selected_sku: &self.selected_sku,
            reason_codes: &self.reason_codes,
            recorded_at: self.recorded_at,
        };
        let recomputed = hash_canonical_json(self.trace_hash.algorithm, &body)?;
        Ok(recomputed == self.trace_hash)
    }

    /// Re-derives the human-readable logic trace from the reason codes.
    ///
    /// The first line names the policy, candidate count, and selection; the
    /// remaining lines render one pass/fail entry per recorded code.
    #[must_use]
    pub fn logic_trace(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.reason_codes.len() + 1);
        let recorded = self
            .recorded_at
            .to_rfc3339()
            .unwrap_or_else(|| self.recorded_at.as_unix_millis().to_string());
        lines.push(format!(
            "policy {} evaluated {} candidate(s), selected {} at {}",
            self.policy_id, self.candidates_evaluated, self.selected_sku, recorded
        ));
        for code in &self.reason_codes {
            lines.push(format!("{} [{code}]", reason::describe(code)));
        }
        lines
    }
}
