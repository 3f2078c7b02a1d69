// crates/risk-logic/src/lib.rs
// ============================================================================
// Module: Risk Logic Root
// Description: Public API surface for the risk severity subsystem.
// Purpose: Expose risk levels, the severity lattice, and tally helpers.
// Dependencies: crate::{counts, level}
// ============================================================================

//! ## Overview
//! Risk Logic provides a closed three-state risk severity (`green`, `yellow`,
//! `red`) with deterministic worst-of composition. Severity combines by max,
//! which preserves fail-closed semantics: a single red signal dominates any
//! number of green ones.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod counts;
pub mod level;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use counts::RiskCounts;
pub use level::RiskLevel;
pub use level::worst_of;
