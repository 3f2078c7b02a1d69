// crates/jsonmart-admission-core/src/lib.rs
// ============================================================================
// Module: JSONMart Admission Core Library
// Description: Public API surface for the order admission and risk engine.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! JSONMart admission core decides which agent purchase requests become
//! orders, under what risk posture, and how those orders move through the
//! procurement lifecycle. It is backend-agnostic and integrates through
//! explicit interfaces rather than embedding into storefront frameworks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CancelRequest;
pub use interfaces::CaptureReceipt;
pub use interfaces::CaptureRequest;
pub use interfaces::CatalogError;
pub use interfaces::CatalogStore;
pub use interfaces::NotificationSink;
pub use interfaces::NotifyError;
pub use interfaces::OrderStore;
pub use interfaces::PaymentError;
pub use interfaces::PaymentGateway;
pub use interfaces::StoreError;
pub use runtime::AdmissionConfig;
pub use runtime::AdmissionEngine;
pub use runtime::AdmissionOutcome;
pub use runtime::AdmissionRequest;
pub use runtime::ApprovalReceipt;
pub use runtime::EngineError;
pub use runtime::InMemoryOrderStore;
pub use runtime::OrderStatusView;
pub use runtime::PolicyEvaluation;
pub use runtime::RejectReceipt;
pub use runtime::RejectionKind;
pub use runtime::SharedOrderStore;
pub use runtime::SweepReport;
pub use runtime::TrustSignal;
pub use runtime::admission_gate;
pub use runtime::aggregate_trust;
pub use runtime::classify_risk;
pub use runtime::evaluate_policy;
