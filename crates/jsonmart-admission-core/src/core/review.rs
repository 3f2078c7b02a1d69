// crates/jsonmart-admission-core/src/core/review.rs
// ============================================================================
// Module: Peer Review Attestations
// Description: Structured peer reviews consumed by trust aggregation.
// Purpose: Provide immutable fulfillment attestations from peer agents.
// Dependencies: crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! An [`AgentReview`] is a structured attestation created once by a reviewing
//! agent after fulfillment and never mutated afterward. Reviews are consumed
//! read-only and many-to-one against a SKU by the trust aggregator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::AgentId;
use crate::core::identifiers::ReviewId;
use crate::core::identifiers::Sku;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Final verdict attached to a peer review.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    /// The reviewer endorses the offer.
    Endorse,
    /// The reviewer flags concerns without blocking.
    Warn,
    /// The reviewer vetoes the offer.
    Blocklist,
}

// ============================================================================
// SECTION: Metrics
// ============================================================================

/// Quantitative fulfillment metrics recorded by the reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewMetrics {
    /// Delta between promised and actual fulfillment, in hours.
    ///
    /// Negative values mean early fulfillment.
    pub fulfillment_delta_hours: i64,
    /// Fraction of the declared spec the delivery complied with (0.0–1.0).
    pub spec_compliance: f64,
    /// Observed API latency during the transaction, in milliseconds.
    pub api_latency_ms: u32,
}

// ============================================================================
// SECTION: Structured Log
// ============================================================================

/// Severity level for a structured review log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewLogLevel {
    /// Informational event.
    Info,
    /// Anomalous but non-fatal event.
    Warn,
    /// Fulfillment-impacting failure.
    Error,
}

/// One entry in a review's ordered structured log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLogEntry {
    /// Machine-readable event name.
    pub event: String,
    /// Entry severity.
    pub level: ReviewLogLevel,
    /// Free-form details for the event.
    pub details: String,
}

// ============================================================================
// SECTION: Agent Review
// ============================================================================

/// Structured peer attestation for one fulfilled transaction.
///
/// # Invariants
/// - Created once after fulfillment; immutable thereafter.
/// - `metrics.spec_compliance` is within 0.0–1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReview {
    /// Review identifier.
    pub review_id: ReviewId,
    /// SKU the review attests to.
    pub target_sku: Sku,
    /// Agent that authored the review.
    pub reviewer_agent_id: AgentId,
    /// Submission timestamp.
    pub submitted_at: Timestamp,
    /// Quantitative fulfillment metrics.
    pub metrics: ReviewMetrics,
    /// Ordered structured log of the reviewed transaction.
    pub structured_log: Vec<ReviewLogEntry>,
    /// Final verdict.
    pub verdict: ReviewVerdict,
}
