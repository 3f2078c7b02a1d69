// crates/jsonmart-admission-core/src/core/risk.rs
// ============================================================================
// Module: Risk Vector
// Description: Five-dimension risk classification attached to orders.
// Purpose: Provide the per-dimension severity record for human review.
// Dependencies: crate::core::time, risk-logic, serde
// ============================================================================

//! ## Overview
//! The risk vector classifies an admission candidate (and later the held
//! order) across five dimensions. It is derived, not authoritative: `stock`,
//! `price`, and `policy` are fixed at admission time, while `consent` and
//! `time_left` are recomputed on every read because consent can matter at a
//! later approval and time-left decays continuously.

// ============================================================================
// SECTION: Imports
// ============================================================================

use risk_logic::RiskCounts;
use risk_logic::RiskLevel;
use serde::Deserialize;
use serde::Serialize;

use crate::core::time::MILLIS_PER_HOUR;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Risk Vector
// ============================================================================

/// Per-dimension risk classification for one admission candidate or order.
///
/// # Invariants
/// - Derived fresh on each evaluation and each status read; never treated as
///   stored truth on its own.
/// - `time_left` only ever takes `Green` or `Red`; the shared level type
///   admits `Yellow` but the classifier does not produce it for this
///   dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskVector {
    /// Stock availability risk.
    pub stock: RiskLevel,
    /// Price-versus-budget risk (binary pass/fail).
    pub price: RiskLevel,
    /// Policy admissibility risk (binary pass/fail).
    pub policy: RiskLevel,
    /// Third-party data sharing consent risk (binary hard gate).
    pub consent: RiskLevel,
    /// Remaining authorization hold time risk (two-state green/red).
    pub time_left: RiskLevel,
}

impl RiskVector {
    /// Returns the dimensions in display order.
    #[must_use]
    pub const fn dimensions(&self) -> [RiskLevel; 5] {
        [self.stock, self.price, self.policy, self.consent, self.time_left]
    }

    /// Tallies the vector for summary surfaces.
    #[must_use]
    pub fn counts(&self) -> RiskCounts {
        RiskCounts::tally(self.dimensions())
    }

    /// Returns the dominant severity across all five dimensions.
    #[must_use]
    pub fn dominant(&self) -> RiskLevel {
        self.counts().dominant()
    }
}

// ============================================================================
// SECTION: Time-Left Report
// ============================================================================

/// Human-facing report for the `time_left` dimension.
///
/// # Invariants
/// - `Expired` corresponds to zero or negative remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TimeLeftReport {
    /// The capture deadline has passed.
    Expired,
    /// Whole hours remaining until the capture deadline.
    HoursRemaining(i64),
}

impl TimeLeftReport {
    /// Derives the report from a capture deadline and the current time.
    #[must_use]
    pub const fn derive(deadline: Timestamp, now: Timestamp) -> Self {
        let remaining_millis = deadline.millis_from(now);
        if remaining_millis <= 0 {
            Self::Expired
        } else {
            Self::HoursRemaining(remaining_millis / MILLIS_PER_HOUR)
        }
    }

    /// Maps the report onto the two-state `time_left` severity.
    ///
    /// Red when expired or under one hour remains; green otherwise. No
    /// yellow band is produced for this dimension.
    #[must_use]
    pub const fn level(self) -> RiskLevel {
        match self {
            Self::Expired => RiskLevel::Red,
            Self::HoursRemaining(hours) => {
                if hours < 1 {
                    RiskLevel::Red
                } else {
                    RiskLevel::Green
                }
            }
        }
    }
}
