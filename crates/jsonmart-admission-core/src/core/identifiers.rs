// crates/jsonmart-admission-core/src/core/identifiers.rs
// ============================================================================
// Module: Admission Identifiers
// Description: Canonical opaque identifiers for policies, offers, and orders.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the canonical string-based identifiers used throughout
//! the admission engine. Identifiers are opaque and serialize as strings.
//! Validation is handled at parse or runtime boundaries rather than within
//! these simple wrappers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Declares an opaque string identifier with the shared wrapper surface.
macro_rules! string_identifier {
    ($(#[doc = $doc:literal] $name:ident),+ $(,)?) => {
        $(
            #[doc = $doc]
            #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(String);

            impl $name {
                /// Creates a new identifier.
                #[must_use]
                pub fn new(id: impl Into<String>) -> Self {
                    Self(id.into())
                }

                /// Returns the identifier as a string slice.
                #[must_use]
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self::new(value)
                }
            }

            impl From<String> for $name {
                fn from(value: String) -> Self {
                    Self::new(value)
                }
            }
        )+
    };
}

string_identifier! {
    /// Buyer agent policy identifier.
    PolicyId,
    /// Order identifier scoped to the order store.
    OrderId,
    /// Stock-keeping unit identifier for a product offer.
    Sku,
    /// Category identifier for offers and policy allow-lists.
    CategoryId,
    /// Autonomous agent identifier.
    AgentId,
    /// Peer review identifier.
    ReviewId,
    /// Correlation identifier used across admission, approval, and audit.
    CorrelationId,
}
