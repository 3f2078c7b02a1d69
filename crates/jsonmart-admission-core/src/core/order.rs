// crates/jsonmart-admission-core/src/core/order.rs
// ============================================================================
// Module: Order Record
// Description: The authoritative admission record and its lifecycle states.
// Purpose: Capture order, payment, and risk state for audit and transitions.
// Dependencies: crate::core::{identifiers, risk, time}, bigdecimal, serde
// ============================================================================

//! ## Overview
//! An [`Order`] is created exclusively by the admission engine and thereafter
//! mutated only through the engine's transition entry points (administrator
//! approval/rejection, fulfillment progression, or expiry). Terminal states
//! are immutable and orders are never deleted; voided and delivered orders
//! are retained for audit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CorrelationId;
use crate::core::identifiers::OrderId;
use crate::core::identifiers::Sku;
use crate::core::risk::RiskVector;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Procurement Status
// ============================================================================

/// Order procurement lifecycle status.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
/// - `Voided` and `Delivered` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcurementStatus {
    /// Order record created; payment not yet authorized.
    OrderCreated,
    /// Payment hold authorized; procurement not yet queued.
    PaymentAuthorized,
    /// Awaiting administrator approval within the hold window.
    ProcurementPending,
    /// Approved; procurement request sent to the supplier.
    ProcurementSent,
    /// Supplier shipped the order.
    Shipped,
    /// Order delivered (terminal).
    Delivered,
    /// Order voided (terminal).
    Voided,
}

impl ProcurementStatus {
    /// Returns true for terminal states that reject every transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Voided | Self::Delivered)
    }

    /// Returns true for states an administrator may still reject from.
    #[must_use]
    pub const fn is_pre_shipment(self) -> bool {
        matches!(
            self,
            Self::OrderCreated
                | Self::PaymentAuthorized
                | Self::ProcurementPending
                | Self::ProcurementSent
        )
    }
}

// ============================================================================
// SECTION: Payment
// ============================================================================

/// Payment lifecycle status for the authorization hold.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Funds reserved but not settled.
    Authorized,
    /// Authorization captured into a settled payment.
    Captured,
    /// Authorization released without capture.
    Voided,
}

/// Payment state attached to an order.
///
/// # Invariants
/// - `capture_deadline` is fixed at creation and never extended.
/// - `capture_reference` is set only after a successful gateway capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment lifecycle status.
    pub status: PaymentStatus,
    /// Amount reserved by the authorization hold.
    pub authorized_amount: BigDecimal,
    /// Deadline after which the uncaptured hold expires.
    pub capture_deadline: Timestamp,
    /// Time of the most recent capture attempt, successful or not.
    pub capture_attempted_at: Option<Timestamp>,
    /// Gateway reference for a successful capture.
    pub capture_reference: Option<String>,
}

// ============================================================================
// SECTION: Consent
// ============================================================================

/// Buyer consent flags recorded at admission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
    /// Whether the buyer consented to third-party data sharing.
    pub third_party_sharing: bool,
}

// ============================================================================
// SECTION: Order Items
// ============================================================================

/// One line item on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item SKU.
    pub sku: Sku,
    /// Ordered quantity.
    pub qty: u32,
    /// Reason codes explaining why the item was admitted.
    pub reason_codes: BTreeSet<String>,
}

// ============================================================================
// SECTION: Order
// ============================================================================

/// The authoritative admission record.
///
/// # Invariants
/// - Created only by the admission engine when the admission gate passes.
/// - `revision` increases by exactly one on every persisted transition and
///   guards optimistic-concurrency updates.
/// - Terminal statuses are immutable; the record is never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub order_id: OrderId,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Procurement lifecycle status.
    pub procurement_status: ProcurementStatus,
    /// Ordered line items.
    pub items: Vec<OrderItem>,
    /// Payment hold state.
    pub payment: PaymentRecord,
    /// Risk vector computed at admission time.
    ///
    /// The `consent` and `time_left` dimensions are recomputed on every
    /// read; the stored values are the admission-time snapshot.
    pub risks: RiskVector,
    /// Buyer consent flags.
    pub consent: Consent,
    /// Optimistic-concurrency revision counter.
    pub revision: u64,
    /// Optional correlation identifier from the admission request.
    pub correlation_id: Option<CorrelationId>,
}

impl Order {
    /// Returns the order ready for a guarded update, with the revision
    /// already advanced past `self.revision`.
    #[must_use]
    pub fn with_next_revision(mut self) -> Self {
        self.revision += 1;
        self
    }
}
