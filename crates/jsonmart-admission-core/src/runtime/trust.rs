// crates/jsonmart-admission-core/src/runtime/trust.rs
// ============================================================================
// Module: Trust Aggregator
// Description: Peer-review consensus scoring for one SKU.
// Purpose: Aggregate endorsements and vetoes into a trust signal.
// Dependencies: crate::core::{identifiers, review}
// ============================================================================

//! ## Overview
//! The trust aggregator folds peer attestations for a SKU into a single
//! signal. The policy is fail-closed on peer veto: a single blocklist
//! verdict from any reviewer withholds trust regardless of endorsement
//! volume, because one credible defect report outweighs many positive ones.
//! Every reviewer counts equally; no recency or reputation weighting is
//! applied (a documented simplification).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::AgentReview;
use crate::core::ReviewVerdict;
use crate::core::Sku;

// ============================================================================
// SECTION: Trust Signal
// ============================================================================

/// Aggregated peer-review signal for one SKU.
///
/// # Invariants
/// - Counts cover only reviews whose `target_sku` matches the queried SKU.
/// - `trust_verified` is true iff `block_count == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustSignal {
    /// Number of endorse verdicts.
    pub endorse_count: usize,
    /// Number of warn verdicts.
    pub warn_count: usize,
    /// Number of blocklist verdicts.
    pub block_count: usize,
    /// Whether no peer has vetoed the SKU.
    pub trust_verified: bool,
}

// ============================================================================
// SECTION: Aggregation
// ============================================================================

/// Aggregates peer reviews into a trust signal for the given SKU.
///
/// Pure function over its inputs; reviews targeting other SKUs are ignored.
#[must_use]
pub fn aggregate_trust(reviews: &[AgentReview], sku: &Sku) -> TrustSignal {
    let mut endorse_count = 0;
    let mut warn_count = 0;
    let mut block_count = 0;
    for review in reviews.iter().filter(|review| review.target_sku == *sku) {
        match review.verdict {
            ReviewVerdict::Endorse => endorse_count += 1,
            ReviewVerdict::Warn => warn_count += 1,
            ReviewVerdict::Blocklist => block_count += 1,
        }
    }
    TrustSignal {
        endorse_count,
        warn_count,
        block_count,
        trust_verified: block_count == 0,
    }
}
