// crates/risk-logic/src/counts.rs
// ============================================================================
// Module: Risk Tallies
// Description: Aggregated severity counts for display surfaces.
// Purpose: Summarize classified dimensions without losing the worst signal.
// Dependencies: crate::level, serde::{Deserialize, Serialize}
// ============================================================================

//! ## Overview
//! Tallies let display surfaces summarize a set of classified dimensions
//! (for example an admin queue row) while preserving the dominant severity.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::level::RiskLevel;

// ============================================================================
// SECTION: Risk Counts
// ============================================================================

/// Aggregated severity counts for a set of classified dimensions
///
/// # Invariants
/// - `green + yellow + red` equals the number of observed dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCounts {
    /// Number of green dimensions
    pub green: usize,
    /// Number of yellow dimensions
    pub yellow: usize,
    /// Number of red dimensions
    pub red: usize,
}

impl RiskCounts {
    /// Tallies the given levels into counts
    #[must_use]
    pub fn tally<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = RiskLevel>,
    {
        let mut counts = Self::default();
        for level in levels {
            counts.observe(level);
        }
        counts
    }

    /// Records one observed level
    pub const fn observe(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Green => self.green += 1,
            RiskLevel::Yellow => self.yellow += 1,
            RiskLevel::Red => self.red += 1,
        }
    }

    /// Returns the total number of observed dimensions
    #[must_use]
    pub const fn total(self) -> usize {
        self.green + self.yellow + self.red
    }

    /// Returns the dominant (worst) severity among the observed dimensions
    ///
    /// Zero observations yield `Green`, consistent with
    /// [`worst_of`](crate::level::worst_of).
    #[must_use]
    pub const fn dominant(self) -> RiskLevel {
        if self.red > 0 {
            RiskLevel::Red
        } else if self.yellow > 0 {
            RiskLevel::Yellow
        } else {
            RiskLevel::Green
        }
    }
}
