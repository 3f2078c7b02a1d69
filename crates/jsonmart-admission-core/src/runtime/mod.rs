// crates/jsonmart-admission-core/src/runtime/mod.rs
// ============================================================================
// Module: Admission Runtime
// Description: Evaluation pipeline and transition engine.
// Purpose: Compose policy evaluation, trust aggregation, risk classification,
//          and guarded order transitions into the admission engine.
// Dependencies: crate::{core, interfaces}, risk-logic
// ============================================================================

//! ## Overview
//! The runtime hosts the admission pipeline and the order transition engine.
//! The pipeline stages (`evaluator`, `trust`, `classify`) are pure functions;
//! `engine` wires them to the collaborator interfaces, and `store` supplies
//! an in-memory order store for tests and demos.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod classify;
pub mod engine;
pub mod evaluator;
pub mod store;
pub mod trust;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use classify::admission_gate;
pub use classify::classify_risk;
pub use classify::refresh_risk;
pub use classify::stock_level;
pub use classify::time_left_level;
pub use engine::AdmissionConfig;
pub use engine::AdmissionEngine;
pub use engine::AdmissionOutcome;
pub use engine::AdmissionRequest;
pub use engine::ApprovalReceipt;
pub use engine::EngineError;
pub use engine::OrderStatusView;
pub use engine::RejectReceipt;
pub use engine::RejectionKind;
pub use engine::SweepReport;
pub use evaluator::PolicyEvaluation;
pub use evaluator::evaluate_policy;
pub use store::InMemoryOrderStore;
pub use store::SharedOrderStore;
pub use trust::TrustSignal;
pub use trust::aggregate_trust;
