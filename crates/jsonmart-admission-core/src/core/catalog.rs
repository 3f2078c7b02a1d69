// crates/jsonmart-admission-core/src/core/catalog.rs
// ============================================================================
// Module: Catalog Offer Snapshot
// Description: Read-only product offer data consumed during admission.
// Purpose: Provide the offer fields the admission pipeline evaluates.
// Dependencies: crate::core::identifiers, bigdecimal, serde
// ============================================================================

//! ## Overview
//! A [`ProductOffer`] is a read-only snapshot fetched from the catalog at
//! evaluation time. The admission engine never mutates offer data; stale
//! snapshots are acceptable because every admitted order re-derives risk
//! from the snapshot it was admitted against.

// ============================================================================
// SECTION: Imports
// ============================================================================

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CategoryId;
use crate::core::identifiers::Sku;

// ============================================================================
// SECTION: Stock Status
// ============================================================================

/// Stock availability reported by the catalog.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// The offer is in stock.
    InStock,
    /// The offer is out of stock.
    OutOfStock,
    /// The catalog could not determine availability.
    Unknown,
}

// ============================================================================
// SECTION: Product Offer
// ============================================================================

/// Read-only offer snapshot evaluated during admission.
///
/// # Invariants
/// - Snapshots are never mutated by the admission engine.
/// - `seller_trust` and `ai_readiness_score` are within 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOffer {
    /// Stock-keeping unit identifier.
    pub sku: Sku,
    /// Offer category.
    pub category: CategoryId,
    /// Offer price in the marketplace currency.
    pub price: BigDecimal,
    /// Stock availability at snapshot time.
    pub stock_status: StockStatus,
    /// Remaining stock quantity, when the catalog reports one.
    pub stock_qty: Option<u32>,
    /// Estimated delivery time in days.
    pub eta_days: u32,
    /// Seller trust score (0–100).
    pub seller_trust: u8,
    /// Machine-readability score for agent buyers (0–100).
    pub ai_readiness_score: u8,
}

impl ProductOffer {
    /// Returns true when the offer can be considered for admission at all.
    ///
    /// Out-of-stock offers are filtered before policy evaluation; unknown
    /// availability passes the filter and surfaces as yellow stock risk.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self.stock_status, StockStatus::OutOfStock)
    }
}
