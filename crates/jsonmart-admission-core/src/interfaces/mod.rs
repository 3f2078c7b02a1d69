// crates/jsonmart-admission-core/src/interfaces/mod.rs
// ============================================================================
// Module: Admission Interfaces
// Description: Backend-agnostic interfaces for catalog, orders, payment, and
//              notification collaborators.
// Purpose: Define the contract surfaces used by the admission engine.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the admission engine integrates with external
//! systems without embedding backend-specific details. Stores must support
//! guarded updates so concurrent transitions resolve by conditional
//! compare-and-set rather than blind overwrite; the payment gateway is
//! treated as fallible and slow; notifications are fire-and-forget.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::AgentReview;
use crate::core::CategoryId;
use crate::core::DecisionTrace;
use crate::core::Order;
use crate::core::OrderId;
use crate::core::ProductOffer;
use crate::core::Sku;

// ============================================================================
// SECTION: Catalog Store
// ============================================================================

/// Catalog and review store errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog backend reported an error.
    #[error("catalog store error: {0}")]
    Backend(String),
    /// Catalog backend is unreachable.
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only catalog and peer-review store.
///
/// The engine never writes product or review data through this interface.
pub trait CatalogStore {
    /// Fetches offer snapshots, optionally filtered to one category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when offers cannot be fetched.
    fn fetch_offers(&self, category: Option<&CategoryId>) -> Result<Vec<ProductOffer>, CatalogError>;

    /// Fetches all peer reviews targeting the given SKU.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when reviews cannot be fetched.
    fn fetch_reviews(&self, sku: &Sku) -> Result<Vec<AgentReview>, CatalogError>;
}

// ============================================================================
// SECTION: Order Store
// ============================================================================

/// Order store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("order store io error: {0}")]
    Io(String),
    /// An order with the same identifier already exists.
    #[error("order already exists: {0}")]
    AlreadyExists(String),
    /// A guarded update observed a different revision than expected.
    #[error("order revision conflict: {0}")]
    Conflict(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("order store corruption: {0}")]
    Corrupt(String),
    /// Store reported an error.
    #[error("order store error: {0}")]
    Store(String),
}

/// Authoritative order persistence with guarded transitions.
pub trait OrderStore {
    /// Persists a newly created order together with its decision trace.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] when the identifier is taken,
    /// or another [`StoreError`] when persistence fails. Nothing is
    /// persisted on error.
    fn create(&self, order: &Order, trace: &DecisionTrace) -> Result<(), StoreError>;

    /// Loads an order by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn load(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// Loads the decision trace persisted with an order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn load_trace(&self, order_id: &OrderId) -> Result<Option<DecisionTrace>, StoreError>;

    /// Applies a guarded update: persists `order` only when the stored
    /// revision still equals `expected_revision`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when another writer transitioned the
    /// order first, or another [`StoreError`] when persistence fails.
    fn update_guarded(&self, order: &Order, expected_revision: u64) -> Result<(), StoreError>;

    /// Lists orders currently awaiting administrator action.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when listing fails.
    fn list_pending(&self) -> Result<Vec<Order>, StoreError>;
}

// ============================================================================
// SECTION: Payment Gateway
// ============================================================================

/// Payment gateway errors.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The gateway request could not be delivered.
    #[error("payment gateway unreachable: {0}")]
    Unreachable(String),
    /// The gateway rejected the request outright.
    #[error("payment gateway rejected request: {0}")]
    Rejected(String),
}

/// Capture request for an authorization hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRequest {
    /// Order the capture settles.
    pub order_id: OrderId,
    /// Amount to capture.
    pub amount: BigDecimal,
    /// Human-readable statement description.
    pub description: String,
}

/// Gateway response for a capture request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureReceipt {
    /// Whether the capture settled.
    pub success: bool,
    /// Gateway reference for a settled capture.
    pub reference_id: Option<String>,
    /// Gateway error message for a declined capture.
    pub error_message: Option<String>,
}

/// Cancellation request for releasing an authorization hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    /// Gateway reference of the hold to release, when one exists.
    pub reference_id: Option<String>,
    /// Order the hold belongs to.
    pub order_id: OrderId,
    /// Reason recorded with the cancellation.
    pub reason: String,
}

/// External payment collaborator.
///
/// Treated as fallible and slow; the engine never assumes synchronous
/// success and never retries a capture automatically.
pub trait PaymentGateway {
    /// Requests capture of an authorization hold.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] when the request cannot be delivered; a
    /// declined capture is reported in-band via [`CaptureReceipt::success`].
    fn request_capture(&self, request: &CaptureRequest) -> Result<CaptureReceipt, PaymentError>;

    /// Requests release of an authorization hold.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] when the request cannot be delivered.
    fn cancel(&self, request: &CancelRequest) -> Result<(), PaymentError>;
}

// ============================================================================
// SECTION: Notification Sink
// ============================================================================

/// Notification sink errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notification could not be delivered.
    #[error("notification delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Fire-and-forget webhook or event sink.
///
/// Delivery failures are surfaced in engine receipts but never roll back an
/// order transition.
pub trait NotificationSink {
    /// Emits a best-effort event.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when delivery fails; callers treat this as
    /// advisory.
    fn emit(&self, event_type: &str, payload: &Value) -> Result<(), NotifyError>;
}
