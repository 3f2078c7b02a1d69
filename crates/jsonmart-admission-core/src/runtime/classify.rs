// crates/jsonmart-admission-core/src/runtime/classify.rs
// ============================================================================
// Module: Risk Classifier
// Description: Per-dimension risk classification and the admission gate.
// Purpose: Combine policy, trust, stock, consent, and time signals into the
//          five-dimension risk vector.
// Dependencies: crate::core::{catalog, order, risk, time}, crate::runtime,
//               risk-logic
// ============================================================================

//! ## Overview
//! The classifier maps upstream evaluation results onto the five risk
//! dimensions. `stock` is the only dimension with a genuine yellow tier;
//! `price`, `policy`, and `consent` are binary pass/fail gates, and
//! `time_left` is a two-state green/red signal derived live from the
//! capture deadline. The automatic admission gate requires
//! `stock != red AND policy == green AND trust_verified`; consent and
//! time-left are display dimensions until the human-approval stage, where
//! consent hard-blocks approval.

// ============================================================================
// SECTION: Imports
// ============================================================================

use risk_logic::RiskLevel;

use crate::core::Consent;
use crate::core::ProductOffer;
use crate::core::RiskVector;
use crate::core::StockStatus;
use crate::core::TimeLeftReport;
use crate::core::Timestamp;
use crate::runtime::evaluator::PolicyEvaluation;
use crate::runtime::trust::TrustSignal;

// ============================================================================
// SECTION: Dimension Rules
// ============================================================================

/// Classifies the stock dimension from catalog availability.
#[must_use]
pub const fn stock_level(status: StockStatus) -> RiskLevel {
    match status {
        StockStatus::InStock => RiskLevel::Green,
        StockStatus::Unknown => RiskLevel::Yellow,
        StockStatus::OutOfStock => RiskLevel::Red,
    }
}

/// Classifies the time-left dimension from the capture deadline.
///
/// Orders that do not exist yet have no deadline and report green.
#[must_use]
pub const fn time_left_level(deadline: Option<Timestamp>, now: Timestamp) -> RiskLevel {
    match deadline {
        Some(deadline) => TimeLeftReport::derive(deadline, now).level(),
        None => RiskLevel::Green,
    }
}

// ============================================================================
// SECTION: Risk Vector Assembly
// ============================================================================

/// Combines upstream signals into the five-dimension risk vector.
///
/// Pure function over its inputs; recomputed fresh on every evaluation and
/// every status read.
#[must_use]
pub fn classify_risk(
    policy_result: &PolicyEvaluation,
    trust: &TrustSignal,
    offer: &ProductOffer,
    consent: &Consent,
    deadline: Option<Timestamp>,
    now: Timestamp,
) -> RiskVector {
    // Trust is surfaced through the admission gate rather than a dedicated
    // dimension; a veto blocks creation before any vector is stored.
    let _ = trust;
    RiskVector {
        stock: stock_level(offer.stock_status),
        price: RiskLevel::from(policy_result.price_within_budget()),
        policy: RiskLevel::from(policy_result.admissible),
        consent: RiskLevel::from(consent.third_party_sharing),
        time_left: time_left_level(deadline, now),
    }
}

/// Refreshes the dynamic dimensions of a stored risk vector.
///
/// `stock`, `price`, and `policy` keep their admission-time values;
/// `consent` and `time_left` are re-derived for the read.
#[must_use]
pub const fn refresh_risk(
    stored: &RiskVector,
    consent: &Consent,
    deadline: Option<Timestamp>,
    now: Timestamp,
) -> RiskVector {
    RiskVector {
        stock: stored.stock,
        price: stored.price,
        policy: stored.policy,
        consent: if consent.third_party_sharing { RiskLevel::Green } else { RiskLevel::Red },
        time_left: time_left_level(deadline, now),
    }
}

// ============================================================================
// SECTION: Admission Gate
// ============================================================================

/// The conjunctive condition for automatic order creation.
///
/// Consent and time-left are deliberately absent: they matter at the
/// human-approval stage, not at automatic admission.
#[must_use]
pub fn admission_gate(risks: &RiskVector, trust: &TrustSignal) -> bool {
    !risks.stock.is_red() && risks.policy.is_green() && trust.trust_verified
}
