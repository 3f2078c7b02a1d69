// crates/jsonmart-admission-core/src/core/policy.rs
// ============================================================================
// Module: Agent Purchase Policy
// Description: Buyer agent purchasing constraints and JSON parsing.
// Purpose: Provide validated, immutable policy input for admission runs.
// Dependencies: crate::core::identifiers, bigdecimal, serde, serde_json
// ============================================================================

//! ## Overview
//! An [`AgentPolicy`] is the hard-constraint envelope a buyer agent declares
//! before admission: budget ceiling, category allow-list, delivery SLA, and
//! minimum seller trust. Policies arrive as JSON documents and are validated
//! at parse time; a parsed policy is immutable for the duration of one
//! admission run and re-parsed on the next.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::CategoryId;
use crate::core::identifiers::PolicyId;

// ============================================================================
// SECTION: Agent Policy
// ============================================================================

/// A buyer agent's declared purchasing constraints.
///
/// # Invariants
/// - All fields are immutable once parsed for a single admission run.
/// - `max_budget` is non-negative; `min_seller_trust` is within 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPolicy {
    /// Policy identifier.
    pub policy_id: PolicyId,
    /// Budget ceiling in the same currency as offers.
    pub max_budget: BigDecimal,
    /// Categories the agent is allowed to purchase from.
    pub allowed_categories: BTreeSet<CategoryId>,
    /// Maximum acceptable delivery time in days.
    pub max_delivery_days: u32,
    /// Minimum acceptable seller trust score (0–100).
    pub min_seller_trust: u8,
}

impl AgentPolicy {
    /// Parses and validates a policy from a JSON document.
    ///
    /// Field names follow the agent-facing wire form (`policyId`,
    /// `maxBudget`, `allowedCategories`, `maxDeliveryDays`,
    /// `minSellerTrust`). The budget may be a JSON number or a numeric
    /// string.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyParseError`] when the document is not an object, a
    /// required field is missing, or a field fails validation.
    pub fn parse(document: &Value) -> Result<Self, PolicyParseError> {
        let object = document.as_object().ok_or(PolicyParseError::NotAnObject)?;

        let policy_id = object
            .get("policyId")
            .and_then(Value::as_str)
            .map(PolicyId::new)
            .ok_or(PolicyParseError::MissingField("policyId"))?;

        let max_budget = parse_budget(
            object.get("maxBudget").ok_or(PolicyParseError::MissingField("maxBudget"))?,
        )?;

        let categories = object
            .get("allowedCategories")
            .and_then(Value::as_array)
            .ok_or(PolicyParseError::MissingField("allowedCategories"))?;
        let mut allowed_categories = BTreeSet::new();
        for entry in categories {
            let category = entry
                .as_str()
                .ok_or(PolicyParseError::InvalidField("allowedCategories"))?;
            allowed_categories.insert(CategoryId::new(category));
        }

        let max_delivery_days = object
            .get("maxDeliveryDays")
            .and_then(Value::as_u64)
            .and_then(|days| u32::try_from(days).ok())
            .ok_or(PolicyParseError::MissingField("maxDeliveryDays"))?;

        let min_seller_trust = object
            .get("minSellerTrust")
            .and_then(Value::as_u64)
            .ok_or(PolicyParseError::MissingField("minSellerTrust"))?;
        let min_seller_trust =
            u8::try_from(min_seller_trust).map_err(|_| PolicyParseError::TrustOutOfRange)?;
        if min_seller_trust > 100 {
            return Err(PolicyParseError::TrustOutOfRange);
        }

        Ok(Self {
            policy_id,
            max_budget,
            allowed_categories,
            max_delivery_days,
            min_seller_trust,
        })
    }

    /// Returns true when the category is on the policy allow-list.
    #[must_use]
    pub fn allows_category(&self, category: &CategoryId) -> bool {
        self.allowed_categories.contains(category)
    }
}

/// Parses the budget field from a JSON number or numeric string.
fn parse_budget(value: &Value) -> Result<BigDecimal, PolicyParseError> {
    let budget = match value {
        // serde_json renders numbers exactly, so round-tripping through the
        // display form preserves integer and decimal budgets without float
        // artifacts for the common integral case.
        Value::Number(number) => BigDecimal::from_str(&number.to_string())
            .map_err(|_| PolicyParseError::InvalidBudget)?,
        Value::String(text) => {
            BigDecimal::from_str(text).map_err(|_| PolicyParseError::InvalidBudget)?
        }
        _ => return Err(PolicyParseError::InvalidBudget),
    };
    if budget < BigDecimal::from(0) {
        return Err(PolicyParseError::InvalidBudget);
    }
    Ok(budget)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing a policy document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyParseError {
    /// The policy document is not a JSON object.
    #[error("policy document must be a json object")]
    NotAnObject,
    /// A required field is missing or has the wrong type.
    #[error("policy field missing or mistyped: {0}")]
    MissingField(&'static str),
    /// A present field failed validation.
    #[error("policy field invalid: {0}")]
    InvalidField(&'static str),
    /// The budget is not a non-negative decimal number.
    #[error("policy budget must be a non-negative decimal")]
    InvalidBudget,
    /// The minimum seller trust is outside 0–100.
    #[error("policy minimum seller trust must be within 0-100")]
    TrustOutOfRange,
}
