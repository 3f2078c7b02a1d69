// crates/jsonmart-admission-core/src/runtime/engine.rs
// ============================================================================
// Module: Admission Engine
// Description: Order admission, approval, rejection, and expiry transitions.
// Purpose: Execute the admission pipeline and guard every order transition.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The admission engine is the single canonical execution path for order
//! admission and lifecycle transitions. All surfaces (UI adapters,
//! schedulers, admin tooling) must call into these methods to preserve the
//! transition invariants and the audit trail.
//!
//! The evaluation pipeline (policy, trust, risk) is pure and stateless per
//! invocation. Transitions are applied with guarded compare-and-set against
//! the order store, so a lost race surfaces as a conflict instead of a blind
//! overwrite. Expiry is a pure function of `(capture_deadline, now)`
//! re-derived on every read, plus an idempotent sweep any scheduler may
//! call; a client render is never the sole trigger of a state change.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Reverse;
use std::collections::BTreeSet;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::core::AgentPolicy;
use crate::core::Consent;
use crate::core::CorrelationId;
use crate::core::DEFAULT_HASH_ALGORITHM;
use crate::core::DecisionTrace;
use crate::core::HashAlgorithm;
use crate::core::HashError;
use crate::core::Order;
use crate::core::OrderId;
use crate::core::OrderItem;
use crate::core::PaymentRecord;
use crate::core::PaymentStatus;
use crate::core::PolicyParseError;
use crate::core::ProcurementStatus;
use crate::core::ProductOffer;
use crate::core::RiskVector;
use crate::core::Sku;
use crate::core::StockStatus;
use crate::core::TimeLeftReport;
use crate::core::Timestamp;
use crate::core::capture_deadline;
use crate::core::is_expired;
use crate::core::reason;
use crate::interfaces::CancelRequest;
use crate::interfaces::CaptureRequest;
use crate::interfaces::CatalogError;
use crate::interfaces::CatalogStore;
use crate::interfaces::NotificationSink;
use crate::interfaces::OrderStore;
use crate::interfaces::PaymentGateway;
use crate::interfaces::StoreError;
use crate::runtime::classify::admission_gate;
use crate::runtime::classify::classify_risk;
use crate::runtime::classify::refresh_risk;
use crate::runtime::evaluator::evaluate_policy;
use crate::runtime::trust::TrustSignal;
use crate::runtime::trust::aggregate_trust;

// ============================================================================
// SECTION: Engine Configuration
// ============================================================================

/// Configuration for the admission engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionConfig {
    /// Hash algorithm used for decision trace digests.
    pub hash_algorithm: HashAlgorithm,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: DEFAULT_HASH_ALGORITHM,
        }
    }
}

// ============================================================================
// SECTION: Requests and Outcomes
// ============================================================================

/// One agent admission request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionRequest {
    /// Order identifier to create on admission; supplied by the caller so
    /// retries stay idempotent at the store.
    pub order_id: OrderId,
    /// Agent policy document in its JSON wire form.
    pub policy_document: Value,
    /// SKU the agent intends to buy; when absent the engine selects the
    /// best admissible candidate from the allowed categories.
    pub intended_sku: Option<Sku>,
    /// Quantity to order.
    pub quantity: u32,
    /// Buyer consent flags.
    pub consent: Consent,
    /// Optional correlation identifier threaded into the order.
    pub correlation_id: Option<CorrelationId>,
}

/// Why an admission run ended without creating an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionKind {
    /// No offer survived category and availability filtering.
    NoCandidate,
    /// At least one candidate was evaluated and the admission gate failed.
    GateFailed {
        /// Codes for the violated gate conjuncts.
        violations: BTreeSet<String>,
    },
}

/// Result of one admission run.
#[derive(Debug, Clone, PartialEq)]
pub enum AdmissionOutcome {
    /// The admission gate passed and an order was persisted.
    Admitted {
        /// The created order.
        order: Order,
        /// The decision trace persisted with the order.
        trace: DecisionTrace,
        /// Whether the best-effort creation notification was delivered.
        notified: bool,
    },
    /// The admission gate failed; no order was persisted.
    Rejected {
        /// The rejection reason.
        rejection: RejectionKind,
        /// Number of candidates examined before the run ended.
        candidates_evaluated: usize,
        /// Trace for the top-ranked candidate, when one was evaluated.
        trace: Option<DecisionTrace>,
    },
}

/// Live status view for one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusView {
    /// The stored order record.
    pub order: Order,
    /// Risk vector with `consent` and `time_left` refreshed for this read.
    pub risks: RiskVector,
    /// Human-facing time-left report; `None` once the hold is closed.
    pub time_left: Option<TimeLeftReport>,
    /// Status after applying the expiry rule to the stored record.
    ///
    /// A pending order past its deadline reports `Voided` here even before
    /// a sweep persists the transition.
    pub effective_status: ProcurementStatus,
}

/// Receipt for a successful approval.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalReceipt {
    /// The order after capture.
    pub order: Order,
    /// Gateway reference for the settled capture.
    pub capture_reference: Option<String>,
    /// Whether the best-effort approval notification was delivered.
    pub notified: bool,
}

/// Receipt for an administrator rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectReceipt {
    /// The voided order.
    pub order: Order,
    /// Whether the gateway acknowledged the hold release.
    pub hold_released: bool,
    /// Whether the best-effort rejection notification was delivered.
    pub notified: bool,
}

/// Summary of one expiry sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Number of pending orders examined.
    pub examined: usize,
    /// Number of orders voided by this sweep.
    pub voided: usize,
    /// Number of orders another writer transitioned first.
    pub conflicts: usize,
    /// Number of expiry notifications that failed to deliver.
    pub notify_failures: usize,
}

// ============================================================================
// SECTION: Engine Errors
// ============================================================================

/// Admission engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The policy document failed validation.
    #[error(transparent)]
    Policy(#[from] PolicyParseError),
    /// The order does not exist.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),
    /// Approval attempted while the consent dimension is red.
    #[error("order {0}: approval blocked, third-party sharing consent missing")]
    ConsentBlocked(OrderId),
    /// The order is in a terminal state and rejects all transitions.
    #[error("order {order_id} is terminal ({status:?}) and cannot transition")]
    TerminalState {
        /// Order identifier.
        order_id: OrderId,
        /// Terminal status observed.
        status: ProcurementStatus,
    },
    /// The requested transition is not valid from the current state.
    #[error("order {order_id}: cannot {action} from {from:?}")]
    InvalidTransition {
        /// Order identifier.
        order_id: OrderId,
        /// Status the order was in.
        from: ProcurementStatus,
        /// Transition that was attempted.
        action: &'static str,
    },
    /// The authorization hold expired before the transition ran.
    #[error("order {0}: authorization hold expired")]
    OrderExpired(OrderId),
    /// Another actor transitioned the order first; re-read and re-decide.
    #[error("order {order_id}: concurrent transition conflict: {detail}")]
    TransitionConflict {
        /// Order identifier.
        order_id: OrderId,
        /// Store-reported conflict detail.
        detail: String,
    },
    /// The payment gateway failed or declined the capture.
    ///
    /// The authorization is left intact for an explicit administrator retry.
    #[error("order {order_id}: payment capture failed: {message}")]
    PaymentCaptureFailed {
        /// Order identifier.
        order_id: OrderId,
        /// Gateway failure detail.
        message: String,
    },
    /// Order store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Catalog store failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Canonical hashing failure while recording a trace.
    #[error(transparent)]
    Hash(#[from] HashError),
}

// ============================================================================
// SECTION: Admission Engine
// ============================================================================

/// The order admission and risk engine.
pub struct AdmissionEngine<C, S, P, N> {
    /// Catalog and review store.
    catalog: C,
    /// Authoritative order store.
    store: S,
    /// External payment collaborator.
    payment: P,
    /// Fire-and-forget notification sink.
    notify: N,
    /// Engine configuration.
    config: AdmissionConfig,
}

impl<C, S, P, N> AdmissionEngine<C, S, P, N>
where
    C: CatalogStore,
    S: OrderStore,
    P: PaymentGateway,
    N: NotificationSink,
{
    /// Creates a new admission engine.
    #[must_use]
    pub const fn new(catalog: C, store: S, payment: P, notify: N, config: AdmissionConfig) -> Self {
        Self {
            catalog,
            store,
            payment,
            notify,
            config,
        }
    }

    // ------------------------------------------------------------------
    // Admission
    // ------------------------------------------------------------------

    /// Runs the full admission pipeline for one agent request.
    ///
    /// Parses the policy, gathers candidate offers, evaluates policy and
    /// peer trust per candidate, classifies risk, and creates a held order
    /// when the admission gate passes. Gate failures and empty candidate
    /// sets are outcomes, not errors; nothing is persisted for them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Policy`] for malformed policy documents and
    /// propagates store, catalog, and hashing faults. No partial order
    /// state is persisted on error.
    pub fn admit_order(
        &self,
        request: &AdmissionRequest,
        now: Timestamp,
    ) -> Result<AdmissionOutcome, EngineError> {
        let policy = AgentPolicy::parse(&request.policy_document)?;

        let mut candidates = self.gather_candidates(&policy, request.intended_sku.as_ref())?;
        candidates.retain(ProductOffer::is_available);
        if candidates.is_empty() {
            return Ok(AdmissionOutcome::Rejected {
                rejection: RejectionKind::NoCandidate,
                candidates_evaluated: 0,
                trace: None,
            });
        }
        if request.intended_sku.is_none() {
            candidates
                .sort_by_key(|offer| (Reverse(offer.ai_readiness_score), offer.sku.clone()));
        }

        let mut first_failure: Option<CandidateEvaluation> = None;
        let mut evaluated = 0_usize;
        for offer in &candidates {
            evaluated += 1;
            let evaluation = self.evaluate_candidate(&policy, offer, &request.consent, now)?;
            if evaluation.gate_passed {
                return self.create_order(request, &policy, evaluation, evaluated, now);
            }
            if first_failure.is_none() {
                first_failure = Some(evaluation);
            }
        }

        // All candidates failed the gate; report the top-ranked one.
        let Some(failure) = first_failure else {
            return Ok(AdmissionOutcome::Rejected {
                rejection: RejectionKind::NoCandidate,
                candidates_evaluated: 0,
                trace: None,
            });
        };
        let trace = DecisionTrace::record(
            policy.policy_id.clone(),
            evaluated,
            failure.offer.sku.clone(),
            failure.reason_codes.clone(),
            now,
            self.config.hash_algorithm,
        )?;
        Ok(AdmissionOutcome::Rejected {
            rejection: RejectionKind::GateFailed {
                violations: failure.violations,
            },
            candidates_evaluated: evaluated,
            trace: Some(trace),
        })
    }

    /// Gathers candidate offers for the request.
    ///
    /// Intended-SKU requests search the full catalog so category violations
    /// surface as policy violations; open requests pre-filter to the
    /// policy's allowed categories.
    fn gather_candidates(
        &self,
        policy: &AgentPolicy,
        intended_sku: Option<&Sku>,
    ) -> Result<Vec<ProductOffer>, EngineError> {
        if let Some(sku) = intended_sku {
            let offers = self.catalog.fetch_offers(None)?;
            return Ok(offers.into_iter().filter(|offer| offer.sku == *sku).collect());
        }
        let mut offers = Vec::new();
        for category in &policy.allowed_categories {
            offers.extend(self.catalog.fetch_offers(Some(category))?);
        }
        Ok(offers)
    }

    /// Evaluates one candidate through policy, trust, and risk.
    fn evaluate_candidate(
        &self,
        policy: &AgentPolicy,
        offer: &ProductOffer,
        consent: &Consent,
        now: Timestamp,
    ) -> Result<CandidateEvaluation, EngineError> {
        let policy_result = evaluate_policy(policy, offer);
        let reviews = self.catalog.fetch_reviews(&offer.sku)?;
        let trust = aggregate_trust(&reviews, &offer.sku);
        let risks = classify_risk(&policy_result, &trust, offer, consent, None, now);
        let gate_passed = admission_gate(&risks, &trust);

        let mut reason_codes = policy_result.reason_codes.clone();
        reason_codes.push(trust_code(&trust).to_string());
        reason_codes.push(stock_code(offer.stock_status).to_string());

        let mut violations = policy_result.violations.clone();
        if !trust.trust_verified {
            violations.insert(reason::TRUST_PEER_BLOCKLISTED.to_string());
        }
        if risks.stock.is_red() {
            violations.insert(reason::STOCK_UNAVAILABLE.to_string());
        }

        Ok(CandidateEvaluation {
            offer: offer.clone(),
            risks,
            reason_codes,
            violations,
            gate_passed,
        })
    }

    /// Creates and persists the held order for an admitted candidate.
    fn create_order(
        &self,
        request: &AdmissionRequest,
        policy: &AgentPolicy,
        evaluation: CandidateEvaluation,
        candidates_evaluated: usize,
        now: Timestamp,
    ) -> Result<AdmissionOutcome, EngineError> {
        let deadline = capture_deadline(now);
        let quantity = request.quantity.max(1);
        let authorized_amount = &evaluation.offer.price * BigDecimal::from(quantity);

        let order = Order {
            order_id: request.order_id.clone(),
            created_at: now,
            procurement_status: ProcurementStatus::ProcurementPending,
            items: vec![OrderItem {
                sku: evaluation.offer.sku.clone(),
                qty: quantity,
                reason_codes: evaluation.reason_codes.iter().cloned().collect(),
            }],
            payment: PaymentRecord {
                status: PaymentStatus::Authorized,
                authorized_amount,
                capture_deadline: deadline,
                capture_attempted_at: None,
                capture_reference: None,
            },
            risks: RiskVector {
                time_left: TimeLeftReport::derive(deadline, now).level(),
                ..evaluation.risks
            },
            consent: request.consent,
            revision: 0,
            correlation_id: request.correlation_id.clone(),
        };

        let trace = DecisionTrace::record(
            policy.policy_id.clone(),
            candidates_evaluated,
            evaluation.offer.sku.clone(),
            evaluation.reason_codes,
            now,
            self.config.hash_algorithm,
        )?;

        self.store.create(&order, &trace)?;

        let notified = self.emit_event(
            "order.created",
            &json!({
                "orderId": order.order_id.as_str(),
                "sku": evaluation.offer.sku.as_str(),
                "captureDeadline": order.payment.capture_deadline.as_unix_millis(),
            }),
        );

        Ok(AdmissionOutcome::Admitted {
            order,
            trace,
            notified,
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Returns the live status view for an order.
    ///
    /// The `consent` and `time_left` risk dimensions and the effective
    /// status are re-derived from `(capture_deadline, now)` on every call;
    /// a stored pending status is never trusted on its own.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OrderNotFound`] when the order does not
    /// exist, or a store fault.
    pub fn order_status(
        &self,
        order_id: &OrderId,
        now: Timestamp,
    ) -> Result<OrderStatusView, EngineError> {
        let order = self.load_order(order_id)?;
        let deadline = hold_deadline(&order);
        let risks = refresh_risk(&order.risks, &order.consent, deadline, now);
        let time_left = deadline.map(|deadline| TimeLeftReport::derive(deadline, now));
        let effective_status = if pending_hold_expired(&order, now) {
            ProcurementStatus::Voided
        } else {
            order.procurement_status
        };
        Ok(OrderStatusView {
            order,
            risks,
            time_left,
            effective_status,
        })
    }

    /// Returns the decision trace persisted with an order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OrderNotFound`] when no trace exists for the
    /// identifier, or a store fault.
    pub fn decision_trace(&self, order_id: &OrderId) -> Result<DecisionTrace, EngineError> {
        self.store
            .load_trace(order_id)?
            .ok_or_else(|| EngineError::OrderNotFound(order_id.clone()))
    }

    // ------------------------------------------------------------------
    // Administrator Transitions
    // ------------------------------------------------------------------

    /// Approves a pending order: captures the payment hold and advances
    /// procurement to `ProcurementSent`.
    ///
    /// The consent gate is re-derived at call time and hard-blocks approval
    /// regardless of every other risk dimension. Capture is requested only
    /// after a guarded claim succeeds, and is never retried automatically;
    /// on gateway failure the payment stays `Authorized` and the order
    /// stays `ProcurementPending` (with `capture_attempted_at` set) so the
    /// administrator can retry or void without losing the reservation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConsentBlocked`], [`EngineError::OrderExpired`],
    /// [`EngineError::TransitionConflict`],
    /// [`EngineError::PaymentCaptureFailed`], or state/store faults.
    pub fn approve_order(
        &self,
        order_id: &OrderId,
        now: Timestamp,
    ) -> Result<ApprovalReceipt, EngineError> {
        let order = self.load_order(order_id)?;
        ensure_transition(&order, ProcurementStatus::ProcurementPending, "approve")?;

        if !order.consent.third_party_sharing {
            return Err(EngineError::ConsentBlocked(order_id.clone()));
        }

        if pending_hold_expired(&order, now) {
            // Lazy expiry: persist the void this read observed, then report
            // the hold as expired rather than approving a dead order.
            let expected = order.revision;
            let voided = void_order(order);
            self.guarded_update(&voided, expected)?;
            return Err(EngineError::OrderExpired(order_id.clone()));
        }

        // Claim the capture attempt before talking to the gateway so a
        // racing sweep or second administrator surfaces as a conflict here.
        let expected = order.revision;
        let mut claimed = order.with_next_revision();
        claimed.payment.capture_attempted_at = Some(now);
        self.guarded_update(&claimed, expected)?;

        let capture = CaptureRequest {
            order_id: order_id.clone(),
            amount: claimed.payment.authorized_amount.clone(),
            description: format!("jsonmart capture for order {order_id}"),
        };
        let receipt = match self.payment.request_capture(&capture) {
            Ok(receipt) => receipt,
            Err(err) => {
                return Err(EngineError::PaymentCaptureFailed {
                    order_id: order_id.clone(),
                    message: err.to_string(),
                });
            }
        };
        if !receipt.success {
            return Err(EngineError::PaymentCaptureFailed {
                order_id: order_id.clone(),
                message: receipt
                    .error_message
                    .unwrap_or_else(|| "gateway declined capture".to_string()),
            });
        }

        let expected = claimed.revision;
        let mut captured = claimed.with_next_revision();
        captured.procurement_status = ProcurementStatus::ProcurementSent;
        captured.payment.status = PaymentStatus::Captured;
        captured.payment.capture_reference = receipt.reference_id.clone();
        self.guarded_update(&captured, expected)?;

        let notified = self.emit_event(
            "order.approved",
            &json!({
                "orderId": order_id.as_str(),
                "capturedAmount": captured.payment.authorized_amount.to_string(),
            }),
        );

        Ok(ApprovalReceipt {
            order: captured,
            capture_reference: receipt.reference_id,
            notified,
        })
    }

    /// Rejects an order: voids it and releases the payment hold.
    ///
    /// Valid from any pre-shipment state with no further conditions. The
    /// gateway hold release and the notification are best-effort; their
    /// failure never rolls back the void.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TerminalState`],
    /// [`EngineError::InvalidTransition`] for shipped orders,
    /// [`EngineError::TransitionConflict`], or store faults.
    pub fn reject_order(
        &self,
        order_id: &OrderId,
        rejection_reason: &str,
        now: Timestamp,
    ) -> Result<RejectReceipt, EngineError> {
        let order = self.load_order(order_id)?;
        if order.procurement_status.is_terminal() {
            return Err(EngineError::TerminalState {
                order_id: order_id.clone(),
                status: order.procurement_status,
            });
        }
        if !order.procurement_status.is_pre_shipment() {
            return Err(EngineError::InvalidTransition {
                order_id: order_id.clone(),
                from: order.procurement_status,
                action: "reject",
            });
        }

        let had_open_hold = order.payment.status == PaymentStatus::Authorized;
        let capture_reference = order.payment.capture_reference.clone();
        let expected = order.revision;
        let voided = void_order(order);
        self.guarded_update(&voided, expected)?;

        let hold_released = if had_open_hold {
            let cancel = CancelRequest {
                reference_id: capture_reference,
                order_id: order_id.clone(),
                reason: rejection_reason.to_string(),
            };
            self.payment.cancel(&cancel).is_ok()
        } else {
            false
        };

        let notified = self.emit_event(
            "order.rejected",
            &json!({
                "orderId": order_id.as_str(),
                "reason": rejection_reason,
                "rejectedAt": now.as_unix_millis(),
            }),
        );

        Ok(RejectReceipt {
            order: voided,
            hold_released,
            notified,
        })
    }

    /// Records supplier shipment: `ProcurementSent` to `Shipped`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TerminalState`],
    /// [`EngineError::InvalidTransition`], [`EngineError::TransitionConflict`],
    /// or store faults.
    pub fn record_shipment(&self, order_id: &OrderId, now: Timestamp) -> Result<Order, EngineError> {
        self.advance_fulfillment(
            order_id,
            ProcurementStatus::ProcurementSent,
            ProcurementStatus::Shipped,
            "ship",
            "order.shipped",
            now,
        )
    }

    /// Records delivery: `Shipped` to the terminal `Delivered`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TerminalState`],
    /// [`EngineError::InvalidTransition`], [`EngineError::TransitionConflict`],
    /// or store faults.
    pub fn record_delivery(&self, order_id: &OrderId, now: Timestamp) -> Result<Order, EngineError> {
        self.advance_fulfillment(
            order_id,
            ProcurementStatus::Shipped,
            ProcurementStatus::Delivered,
            "deliver",
            "order.delivered",
            now,
        )
    }

    // ------------------------------------------------------------------
    // Expiry Sweep
    // ------------------------------------------------------------------

    /// Voids every pending order whose capture deadline has passed.
    ///
    /// Idempotent: already-voided orders are not listed as pending, so a
    /// second sweep over the same state is a no-op with no duplicate
    /// events. Orders another writer transitions mid-sweep are counted as
    /// conflicts, not raised.
    ///
    /// # Errors
    ///
    /// Returns a store fault when listing or a non-conflict update fails.
    pub fn sweep_expired(&self, now: Timestamp) -> Result<SweepReport, EngineError> {
        let pending = self.store.list_pending()?;
        let mut report = SweepReport {
            examined: pending.len(),
            ..SweepReport::default()
        };
        for order in pending {
            if !pending_hold_expired(&order, now) {
                continue;
            }
            let order_id = order.order_id.clone();
            let expected = order.revision;
            let voided = void_order(order);
            match self.store.update_guarded(&voided, expected) {
                Ok(()) => {
                    report.voided += 1;
                    let delivered = self.emit_event(
                        "order.expired",
                        &json!({
                            "orderId": order_id.as_str(),
                            "expiredAt": now.as_unix_millis(),
                        }),
                    );
                    if !delivered {
                        report.notify_failures += 1;
                    }
                }
                Err(StoreError::Conflict(_)) => report.conflicts += 1,
                Err(err) => return Err(EngineError::Store(err)),
            }
        }
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Internal Helpers
    // ------------------------------------------------------------------

    /// Loads an order or reports it missing.
    fn load_order(&self, order_id: &OrderId) -> Result<Order, EngineError> {
        self.store
            .load(order_id)?
            .ok_or_else(|| EngineError::OrderNotFound(order_id.clone()))
    }

    /// Applies a guarded update, mapping store conflicts to engine
    /// conflicts.
    fn guarded_update(&self, order: &Order, expected_revision: u64) -> Result<(), EngineError> {
        match self.store.update_guarded(order, expected_revision) {
            Ok(()) => Ok(()),
            Err(StoreError::Conflict(detail)) => Err(EngineError::TransitionConflict {
                order_id: order.order_id.clone(),
                detail,
            }),
            Err(err) => Err(EngineError::Store(err)),
        }
    }

    /// Advances a fulfillment status by one step.
    fn advance_fulfillment(
        &self,
        order_id: &OrderId,
        from: ProcurementStatus,
        to: ProcurementStatus,
        action: &'static str,
        event_type: &str,
        now: Timestamp,
    ) -> Result<Order, EngineError> {
        let order = self.load_order(order_id)?;
        ensure_transition(&order, from, action)?;
        let expected = order.revision;
        let mut advanced = order.with_next_revision();
        advanced.procurement_status = to;
        self.guarded_update(&advanced, expected)?;
        let _ = self.emit_event(
            event_type,
            &json!({
                "orderId": order_id.as_str(),
                "recordedAt": now.as_unix_millis(),
            }),
        );
        Ok(advanced)
    }

    /// Emits a best-effort notification; failures are advisory.
    fn emit_event(&self, event_type: &str, payload: &Value) -> bool {
        self.notify.emit(event_type, payload).is_ok()
    }
}

// ============================================================================
// SECTION: Candidate Evaluation
// ============================================================================

/// Internal result of evaluating one candidate offer.
struct CandidateEvaluation {
    /// The evaluated offer snapshot.
    offer: ProductOffer,
    /// Classified risk vector.
    risks: RiskVector,
    /// Full ordered reason codes (policy, trust, stock).
    reason_codes: Vec<String>,
    /// Codes for the violated gate conjuncts.
    violations: BTreeSet<String>,
    /// Whether the admission gate passed.
    gate_passed: bool,
}

// ============================================================================
// SECTION: Transition Helpers
// ============================================================================

/// Checks an order is in the expected state for a transition.
fn ensure_transition(
    order: &Order,
    expected: ProcurementStatus,
    action: &'static str,
) -> Result<(), EngineError> {
    if order.procurement_status.is_terminal() {
        return Err(EngineError::TerminalState {
            order_id: order.order_id.clone(),
            status: order.procurement_status,
        });
    }
    if order.procurement_status != expected {
        return Err(EngineError::InvalidTransition {
            order_id: order.order_id.clone(),
            from: order.procurement_status,
            action,
        });
    }
    Ok(())
}

/// Returns the capture deadline while a hold is still open.
fn hold_deadline(order: &Order) -> Option<Timestamp> {
    (order.payment.status == PaymentStatus::Authorized).then_some(order.payment.capture_deadline)
}

/// Returns true when a pending order's hold has expired.
fn pending_hold_expired(order: &Order, now: Timestamp) -> bool {
    order.procurement_status == ProcurementStatus::ProcurementPending
        && order.payment.status == PaymentStatus::Authorized
        && is_expired(order.payment.capture_deadline, now)
}

/// Voids an order and its payment, advancing the revision.
fn void_order(order: Order) -> Order {
    let mut voided = order.with_next_revision();
    voided.procurement_status = ProcurementStatus::Voided;
    voided.payment.status = PaymentStatus::Voided;
    voided
}

/// Maps a trust signal onto its reason code.
const fn trust_code(trust: &TrustSignal) -> &'static str {
    if trust.trust_verified { reason::TRUST_PEER_VERIFIED } else { reason::TRUST_PEER_BLOCKLISTED }
}

/// Maps a stock status onto its reason code.
const fn stock_code(status: StockStatus) -> &'static str {
    match status {
        StockStatus::InStock => reason::STOCK_AVAILABLE,
        StockStatus::OutOfStock => reason::STOCK_UNAVAILABLE,
        StockStatus::Unknown => reason::STOCK_UNKNOWN,
    }
}
