// crates/risk-logic/src/level.rs
// ============================================================================
// Module: Risk Severity Levels
// Description: Three-state risk severity with worst-of composition.
// Purpose: Provide deterministic severity values for risk classification.
// Dependencies: serde::{Deserialize, Serialize}
// ============================================================================

//! ## Overview
//! Defines the closed risk severity set (`green`, `yellow`, `red`) and its
//! total order. Composition is worst-of (max severity), so incomplete or
//! degraded signals can only raise the combined severity, never lower it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Risk Level
// ============================================================================

/// Risk severity for a single classified dimension
///
/// # Invariants
/// - Represents a closed set of severities: green, yellow, or red.
/// - The derived `Ord` is the severity order: `Green < Yellow < Red`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// No concern; the dimension is healthy
    Green,
    /// Degraded or indeterminate; human attention advised
    Yellow,
    /// Hard failure; the dimension blocks or requires intervention
    Red,
}

impl RiskLevel {
    /// Returns true if the level is `Green`
    #[must_use]
    pub const fn is_green(self) -> bool {
        matches!(self, Self::Green)
    }

    /// Returns true if the level is `Yellow`
    #[must_use]
    pub const fn is_yellow(self) -> bool {
        matches!(self, Self::Yellow)
    }

    /// Returns true if the level is `Red`
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns the more severe of the two levels
    #[must_use]
    pub fn worst(self, other: Self) -> Self {
        self.max(other)
    }
}

impl From<bool> for RiskLevel {
    /// Maps a binary pass/fail gate onto the severity set.
    ///
    /// Binary gates have no middle tier: `true` is green, `false` is red.
    fn from(passed: bool) -> Self {
        if passed { Self::Green } else { Self::Red }
    }
}

// ============================================================================
// SECTION: Composition
// ============================================================================

/// Returns the worst severity across the given levels.
///
/// An empty iterator yields `Green`: absence of classified dimensions is
/// absence of risk, not unknown risk. Callers that need fail-closed handling
/// of missing signals must classify them as `Yellow` or `Red` explicitly.
#[must_use]
pub fn worst_of<I>(levels: I) -> RiskLevel
where
    I: IntoIterator<Item = RiskLevel>,
{
    levels.into_iter().fold(RiskLevel::Green, RiskLevel::worst)
}
