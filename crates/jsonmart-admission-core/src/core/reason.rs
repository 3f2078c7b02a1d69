// crates/jsonmart-admission-core/src/core/reason.rs
// ============================================================================
// Module: Reason Codes
// Description: Machine-readable codes explaining admission decisions.
// Purpose: Provide the stable audit vocabulary for traces and receipts.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Reason codes are short machine-readable strings recorded with every
//! decision. Positive `elig.*` codes mark passed checks, `policy.*` codes
//! mark violations, and `trust.*`/`stock.*` codes mark aggregate signals.
//! Receipt surfaces re-derive human-readable lines from these codes via
//! [`describe`]; the rendered text is a view, never stored truth.

// ============================================================================
// SECTION: Eligibility Codes
// ============================================================================

/// Candidate category is on the policy allow-list.
pub const ELIG_CATEGORY_ALLOWED: &str = "elig.category_allowed";
/// Candidate price is within the policy budget.
pub const ELIG_WITHIN_BUDGET: &str = "elig.within_budget";
/// Candidate delivery estimate meets the policy SLA.
pub const ELIG_DELIVERY_WITHIN_SLA: &str = "elig.delivery_within_sla";
/// Candidate seller trust meets the policy minimum.
pub const ELIG_SELLER_TRUST_MET: &str = "elig.seller_trust_met";

// ============================================================================
// SECTION: Violation Codes
// ============================================================================

/// Candidate category is not on the policy allow-list.
pub const POLICY_CATEGORY_BLOCKED: &str = "policy.category_blocked";
/// Candidate price exceeds the policy budget.
pub const POLICY_BUDGET_EXCEEDED: &str = "policy.budget_exceeded";
/// Candidate delivery estimate exceeds the policy SLA.
pub const POLICY_DELIVERY_TOO_SLOW: &str = "policy.delivery_too_slow";
/// Candidate seller trust is below the policy minimum.
pub const POLICY_SELLER_TRUST_LOW: &str = "policy.seller_trust_low";

// ============================================================================
// SECTION: Trust and Stock Codes
// ============================================================================

/// No peer agent has blocklisted the candidate.
pub const TRUST_PEER_VERIFIED: &str = "trust.peer_verified";
/// At least one peer agent has blocklisted the candidate.
pub const TRUST_PEER_BLOCKLISTED: &str = "trust.peer_blocklisted";
/// Candidate stock is available.
pub const STOCK_AVAILABLE: &str = "stock.available";
/// Candidate stock is unavailable.
pub const STOCK_UNAVAILABLE: &str = "stock.unavailable";
/// Candidate stock availability is unknown.
pub const STOCK_UNKNOWN: &str = "stock.unknown";

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the human-readable line for a reason code.
///
/// Unrecognized codes are echoed verbatim so forward-compatible traces stay
/// renderable.
#[must_use]
pub fn describe(code: &str) -> String {
    let text = match code {
        ELIG_CATEGORY_ALLOWED => "PASS category on policy allow-list",
        ELIG_WITHIN_BUDGET => "PASS price within budget",
        ELIG_DELIVERY_WITHIN_SLA => "PASS delivery within SLA",
        ELIG_SELLER_TRUST_MET => "PASS seller trust at or above minimum",
        POLICY_CATEGORY_BLOCKED => "FAIL category not on policy allow-list",
        POLICY_BUDGET_EXCEEDED => "FAIL price exceeds budget",
        POLICY_DELIVERY_TOO_SLOW => "FAIL delivery exceeds SLA",
        POLICY_SELLER_TRUST_LOW => "FAIL seller trust below minimum",
        TRUST_PEER_VERIFIED => "PASS no peer blocklist verdicts",
        TRUST_PEER_BLOCKLISTED => "FAIL peer blocklist verdict present",
        STOCK_AVAILABLE => "PASS stock available",
        STOCK_UNAVAILABLE => "FAIL stock unavailable",
        STOCK_UNKNOWN => "WARN stock availability unknown",
        other => return other.to_string(),
    };
    text.to_string()
}
