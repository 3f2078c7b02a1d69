// crates/jsonmart-admission-core/src/core/mod.rs
// ============================================================================
// Module: Admission Core Types
// Description: Canonical domain records for the admission engine.
// Purpose: Provide stable, serializable types for policies, offers, reviews,
//          orders, and traces.
// Dependencies: bigdecimal, risk-logic, serde
// ============================================================================

//! ## Overview
//! Core types define the admission domain: agent policies, catalog offer
//! snapshots, peer reviews, risk vectors, the authoritative order record,
//! and the decision trace. These types are the canonical source of truth for
//! any derived API surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod hashing;
pub mod identifiers;
pub mod order;
pub mod policy;
pub mod reason;
pub mod review;
pub mod risk;
pub mod time;
pub mod trace;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::ProductOffer;
pub use catalog::StockStatus;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::AgentId;
pub use identifiers::CategoryId;
pub use identifiers::CorrelationId;
pub use identifiers::OrderId;
pub use identifiers::PolicyId;
pub use identifiers::ReviewId;
pub use identifiers::Sku;
pub use order::Consent;
pub use order::Order;
pub use order::OrderItem;
pub use order::PaymentRecord;
pub use order::PaymentStatus;
pub use order::ProcurementStatus;
pub use policy::AgentPolicy;
pub use policy::PolicyParseError;
pub use review::AgentReview;
pub use review::ReviewLogEntry;
pub use review::ReviewLogLevel;
pub use review::ReviewMetrics;
pub use review::ReviewVerdict;
pub use risk::RiskVector;
pub use risk::TimeLeftReport;
pub use time::HOLD_WINDOW_HOURS;
pub use time::Timestamp;
pub use time::capture_deadline;
pub use time::is_expired;
pub use trace::DecisionTrace;
