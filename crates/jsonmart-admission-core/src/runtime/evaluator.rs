// crates/jsonmart-admission-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Policy Evaluator
// Description: Pure policy checks for one candidate offer.
// Purpose: Decide policy admissibility with a complete audit trail.
// Dependencies: crate::core::{catalog, policy, reason}
// ============================================================================

//! ## Overview
//! The policy evaluator runs the four hard-constraint checks in a fixed
//! order: category membership, budget, delivery SLA, seller trust. Checks
//! never short-circuit; every dimension contributes exactly one reason code
//! so the recorded trace is always complete. The check order determines
//! which codes appear first in the trace, not admissibility.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::AgentPolicy;
use crate::core::ProductOffer;
use crate::core::reason;

// ============================================================================
// SECTION: Evaluation Result
// ============================================================================

/// Outcome of policy evaluation for one candidate offer.
///
/// # Invariants
/// - `reason_codes` holds exactly one code per checked dimension, in check
///   order.
/// - `admissible` is true iff `violations` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyEvaluation {
    /// Whether every policy check passed.
    pub admissible: bool,
    /// One reason code per check, in check order (pass or fail form).
    pub reason_codes: Vec<String>,
    /// Violation codes for the checks that failed.
    pub violations: BTreeSet<String>,
}

impl PolicyEvaluation {
    /// Returns true when the budget check specifically passed.
    ///
    /// The price risk dimension is binary and inherits this check.
    #[must_use]
    pub fn price_within_budget(&self) -> bool {
        !self.violations.contains(reason::POLICY_BUDGET_EXCEEDED)
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates a candidate offer against an agent policy.
///
/// Pure function over its inputs: no I/O, no shared state. All four checks
/// always run.
#[must_use]
pub fn evaluate_policy(policy: &AgentPolicy, candidate: &ProductOffer) -> PolicyEvaluation {
    let checks = [
        (
            policy.allows_category(&candidate.category),
            reason::ELIG_CATEGORY_ALLOWED,
            reason::POLICY_CATEGORY_BLOCKED,
        ),
        (
            candidate.price <= policy.max_budget,
            reason::ELIG_WITHIN_BUDGET,
            reason::POLICY_BUDGET_EXCEEDED,
        ),
        (
            candidate.eta_days <= policy.max_delivery_days,
            reason::ELIG_DELIVERY_WITHIN_SLA,
            reason::POLICY_DELIVERY_TOO_SLOW,
        ),
        (
            candidate.seller_trust >= policy.min_seller_trust,
            reason::ELIG_SELLER_TRUST_MET,
            reason::POLICY_SELLER_TRUST_LOW,
        ),
    ];

    let mut reason_codes = Vec::with_capacity(checks.len());
    let mut violations = BTreeSet::new();
    for (passed, pass_code, violation_code) in checks {
        if passed {
            reason_codes.push(pass_code.to_string());
        } else {
            reason_codes.push(violation_code.to_string());
            violations.insert(violation_code.to_string());
        }
    }

    PolicyEvaluation {
        admissible: violations.is_empty(),
        reason_codes,
        violations,
    }
}
