// crates/jsonmart-admission-core/src/core/time.rs
// ============================================================================
// Module: Admission Time Model
// Description: Caller-supplied timestamps and hold-window arithmetic.
// Purpose: Keep expiry a pure function of (deadline, now) for replayability.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! The admission engine never reads wall-clock time. Hosts supply explicit
//! timestamps on every entry point, which makes expiry a pure function of
//! `(capture_deadline, now)` and keeps every evaluation replayable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Milliseconds per hour.
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Fixed authorization hold window, in hours.
///
/// The hold window is deliberately not configurable: every authorization
/// expires 24 hours after creation unless captured or voided first.
pub const HOLD_WINDOW_HOURS: i64 = 24;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Canonical timestamp used across orders, reviews, and traces.
///
/// # Invariants
/// - Values are unix epoch milliseconds, explicitly provided by callers.
/// - No validation is performed; monotonicity is a caller responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix epoch milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as unix epoch milliseconds.
    #[must_use]
    pub const fn as_unix_millis(self) -> i64 {
        self.0
    }

    /// Returns this timestamp shifted forward by whole hours.
    #[must_use]
    pub const fn plus_hours(self, hours: i64) -> Self {
        Self(self.0.saturating_add(hours.saturating_mul(MILLIS_PER_HOUR)))
    }

    /// Returns this timestamp shifted forward by milliseconds.
    #[must_use]
    pub const fn plus_millis(self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Returns the signed number of milliseconds from `now` until `self`.
    ///
    /// Negative values mean `self` is already in the past.
    #[must_use]
    pub const fn millis_from(self, now: Self) -> i64 {
        self.0.saturating_sub(now.0)
    }

    /// Renders the timestamp as an RFC 3339 string for trace lines.
    ///
    /// Returns `None` when the value is outside the representable range.
    #[must_use]
    pub fn to_rfc3339(self) -> Option<String> {
        let seconds = self.0.div_euclid(1000);
        let millis = self.0.rem_euclid(1000);
        let nanos = i128::from(seconds) * 1_000_000_000 + i128::from(millis) * 1_000_000;
        let datetime = OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?;
        datetime.format(&Rfc3339).ok()
    }
}

// ============================================================================
// SECTION: Deadline Helpers
// ============================================================================

/// Computes the capture deadline for an authorization created at `now`.
#[must_use]
pub const fn capture_deadline(now: Timestamp) -> Timestamp {
    now.plus_hours(HOLD_WINDOW_HOURS)
}

/// Returns true when the deadline has passed at `now`.
#[must_use]
pub const fn is_expired(deadline: Timestamp, now: Timestamp) -> bool {
    deadline.millis_from(now) <= 0
}
