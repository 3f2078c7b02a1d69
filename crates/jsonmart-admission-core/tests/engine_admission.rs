// crates/jsonmart-admission-core/tests/engine_admission.rs
// ============================================================================
// Module: Admission Pipeline Tests
// Description: End-to-end tests for the admission entry point.
// Purpose: Validate candidate gathering, ranking, gating, and order creation.
// Dependencies: jsonmart-admission-core, serde_json
// ============================================================================
//! ## Overview
//! Drives the full admission pipeline through mock collaborators: intended
//! and ranked candidate selection, the gate conjunction, rejection outcomes,
//! and the persisted order and trace on admission.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::Mutex;

use bigdecimal::BigDecimal;
use jsonmart_admission_core::AdmissionConfig;
use jsonmart_admission_core::AdmissionEngine;
use jsonmart_admission_core::AdmissionOutcome;
use jsonmart_admission_core::AdmissionRequest;
use jsonmart_admission_core::AgentId;
use jsonmart_admission_core::AgentReview;
use jsonmart_admission_core::CancelRequest;
use jsonmart_admission_core::CaptureReceipt;
use jsonmart_admission_core::CaptureRequest;
use jsonmart_admission_core::CatalogError;
use jsonmart_admission_core::CatalogStore;
use jsonmart_admission_core::CategoryId;
use jsonmart_admission_core::Consent;
use jsonmart_admission_core::EngineError;
use jsonmart_admission_core::InMemoryOrderStore;
use jsonmart_admission_core::NotificationSink;
use jsonmart_admission_core::NotifyError;
use jsonmart_admission_core::OrderId;
use jsonmart_admission_core::OrderStore;
use jsonmart_admission_core::PaymentError;
use jsonmart_admission_core::PaymentGateway;
use jsonmart_admission_core::PaymentStatus;
use jsonmart_admission_core::ProcurementStatus;
use jsonmart_admission_core::ProductOffer;
use jsonmart_admission_core::RejectionKind;
use jsonmart_admission_core::ReviewId;
use jsonmart_admission_core::ReviewMetrics;
use jsonmart_admission_core::ReviewVerdict;
use jsonmart_admission_core::Sku;
use jsonmart_admission_core::StockStatus;
use jsonmart_admission_core::StoreError;
use jsonmart_admission_core::Timestamp;
use jsonmart_admission_core::capture_deadline;
use jsonmart_admission_core::core::reason;
use serde_json::Value;
use serde_json::json;

// ------------------------------------------------------------------
// Mock collaborators
// ------------------------------------------------------------------

#[derive(Default, Clone)]
struct MockCatalog {
    offers: Vec<ProductOffer>,
    reviews: BTreeMap<String, Vec<AgentReview>>,
}

impl CatalogStore for MockCatalog {
    fn fetch_offers(&self, category: Option<&CategoryId>) -> Result<Vec<ProductOffer>, CatalogError> {
        Ok(self
            .offers
            .iter()
            .filter(|offer| category.is_none_or(|category| offer.category == *category))
            .cloned()
            .collect())
    }

    fn fetch_reviews(&self, sku: &Sku) -> Result<Vec<AgentReview>, CatalogError> {
        Ok(self.reviews.get(sku.as_str()).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
struct OkGateway;

impl PaymentGateway for OkGateway {
    fn request_capture(&self, _request: &CaptureRequest) -> Result<CaptureReceipt, PaymentError> {
        Ok(CaptureReceipt {
            success: true,
            reference_id: Some("cap-ref-1".to_string()),
            error_message: None,
        })
    }

    fn cancel(&self, _request: &CancelRequest) -> Result<(), PaymentError> {
        Ok(())
    }
}

#[derive(Default, Clone)]
struct RecordingNotify {
    events: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingNotify {
    fn events(&self) -> Vec<String> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl NotificationSink for RecordingNotify {
    fn emit(&self, event_type: &str, _payload: &Value) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::DeliveryFailed("sink offline".to_string()));
        }
        if let Ok(mut events) = self.events.lock() {
            events.push(event_type.to_string());
        }
        Ok(())
    }
}

// ------------------------------------------------------------------
// Fixtures
// ------------------------------------------------------------------

fn offer(sku: &str, category: &str, price: &str, ai_readiness: u8) -> ProductOffer {
    ProductOffer {
        sku: Sku::new(sku),
        category: CategoryId::new(category),
        price: BigDecimal::from_str(price).expect("price"),
        stock_status: StockStatus::InStock,
        stock_qty: Some(10),
        eta_days: 3,
        seller_trust: 85,
        ai_readiness_score: ai_readiness,
    }
}

fn review(sku: &str, verdict: ReviewVerdict) -> AgentReview {
    AgentReview {
        review_id: ReviewId::new(format!("rev-{sku}")),
        target_sku: Sku::new(sku),
        reviewer_agent_id: AgentId::new("agent-reviewer"),
        submitted_at: Timestamp::from_unix_millis(1_600_000_000_000),
        metrics: ReviewMetrics {
            fulfillment_delta_hours: 0,
            spec_compliance: 1.0,
            api_latency_ms: 50,
        },
        structured_log: Vec::new(),
        verdict,
    }
}

fn policy_document() -> Value {
    json!({
        "policyId": "policy-1",
        "maxBudget": "1500.00",
        "allowedCategories": ["gpu", "ssd"],
        "maxDeliveryDays": 5,
        "minSellerTrust": 70,
    })
}

fn request(order_id: &str, intended_sku: Option<&str>) -> AdmissionRequest {
    AdmissionRequest {
        order_id: OrderId::new(order_id),
        policy_document: policy_document(),
        intended_sku: intended_sku.map(Sku::new),
        quantity: 1,
        consent: Consent {
            third_party_sharing: true,
        },
        correlation_id: None,
    }
}

fn engine(
    catalog: MockCatalog,
    store: InMemoryOrderStore,
    notify: RecordingNotify,
) -> AdmissionEngine<MockCatalog, InMemoryOrderStore, OkGateway, RecordingNotify> {
    AdmissionEngine::new(catalog, store, OkGateway, notify, AdmissionConfig::default())
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

/// Verifies an admissible intended-SKU request creates a held order.
#[test]
fn intended_sku_admission_creates_held_order() {
    let catalog = MockCatalog {
        offers: vec![offer("sku-gpu-1", "gpu", "1200.00", 90)],
        reviews: BTreeMap::from([(
            "sku-gpu-1".to_string(),
            vec![review("sku-gpu-1", ReviewVerdict::Endorse)],
        )]),
    };
    let store = InMemoryOrderStore::new();
    let notify = RecordingNotify::default();
    let engine = engine(catalog, store.clone(), notify.clone());
    let now = Timestamp::from_unix_millis(1_700_000_000_000);

    let outcome = engine.admit_order(&request("ord-1", Some("sku-gpu-1")), now).expect("admit");
    let AdmissionOutcome::Admitted {
        order,
        trace,
        notified,
    } = outcome
    else {
        panic!("expected admission, got {outcome:?}");
    };

    assert_eq!(order.procurement_status, ProcurementStatus::ProcurementPending);
    assert_eq!(order.payment.status, PaymentStatus::Authorized);
    assert_eq!(order.payment.capture_deadline, capture_deadline(now));
    assert_eq!(order.payment.authorized_amount, BigDecimal::from_str("1200.00").expect("amount"));
    assert_eq!(order.revision, 0);
    assert_eq!(order.items.len(), 1);
    assert!(order.items[0].reason_codes.contains(reason::TRUST_PEER_VERIFIED));
    assert!(order.items[0].reason_codes.contains(reason::STOCK_AVAILABLE));

    assert_eq!(trace.candidates_evaluated, 1);
    assert_eq!(trace.selected_sku.as_str(), "sku-gpu-1");
    assert_eq!(trace.reason_codes.len(), 6);
    assert!(trace.verify_hash().expect("hashing succeeds"));

    assert!(notified);
    assert_eq!(notify.events(), vec!["order.created".to_string()]);

    let stored = store.load(&OrderId::new("ord-1")).expect("load").expect("persisted");
    assert_eq!(stored, order);
    let stored_trace = store.load_trace(&OrderId::new("ord-1")).expect("load").expect("persisted");
    assert_eq!(stored_trace, trace);
}

/// Verifies the authorized amount multiplies price by quantity.
#[test]
fn authorized_amount_scales_with_quantity() {
    let catalog = MockCatalog {
        offers: vec![offer("sku-ssd-1", "ssd", "199.99", 50)],
        reviews: BTreeMap::new(),
    };
    let engine = engine(catalog, InMemoryOrderStore::new(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    let mut admission = request("ord-qty", Some("sku-ssd-1"));
    admission.quantity = 3;
    let outcome = engine.admit_order(&admission, now).expect("admit");
    let AdmissionOutcome::Admitted {
        order, ..
    } = outcome
    else {
        panic!("expected admission, got {outcome:?}");
    };
    assert_eq!(order.items[0].qty, 3);
    assert_eq!(order.payment.authorized_amount, BigDecimal::from_str("599.97").expect("amount"));
}

/// Verifies ranked selection skips a vetoed top candidate.
#[test]
fn ranked_selection_skips_vetoed_top_candidate() {
    let catalog = MockCatalog {
        offers: vec![
            offer("sku-low", "gpu", "900.00", 70),
            offer("sku-top", "gpu", "1100.00", 95),
            offer("sku-mid", "gpu", "1000.00", 85),
        ],
        reviews: BTreeMap::from([(
            "sku-top".to_string(),
            vec![review("sku-top", ReviewVerdict::Blocklist)],
        )]),
    };
    let engine = engine(catalog, InMemoryOrderStore::new(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    let outcome = engine.admit_order(&request("ord-ranked", None), now).expect("admit");
    let AdmissionOutcome::Admitted {
        order,
        trace,
        ..
    } = outcome
    else {
        panic!("expected admission, got {outcome:?}");
    };
    // sku-top (95) is vetoed, so the run settles on sku-mid (85).
    assert_eq!(order.items[0].sku.as_str(), "sku-mid");
    assert_eq!(trace.candidates_evaluated, 2);
}

/// Verifies ranking breaks readiness ties by SKU order.
#[test]
fn ranked_selection_breaks_ties_by_sku() {
    let catalog = MockCatalog {
        offers: vec![offer("sku-b", "gpu", "500", 80), offer("sku-a", "gpu", "500", 80)],
        reviews: BTreeMap::new(),
    };
    let engine = engine(catalog, InMemoryOrderStore::new(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    let outcome = engine.admit_order(&request("ord-tie", None), now).expect("admit");
    let AdmissionOutcome::Admitted {
        order, ..
    } = outcome
    else {
        panic!("expected admission, got {outcome:?}");
    };
    assert_eq!(order.items[0].sku.as_str(), "sku-a");
}

/// Verifies open requests never consider offers outside allowed categories.
#[test]
fn ranked_selection_excludes_disallowed_categories() {
    let catalog = MockCatalog {
        offers: vec![offer("sku-cpu", "cpu", "100", 99), offer("sku-gpu", "gpu", "100", 10)],
        reviews: BTreeMap::new(),
    };
    let engine = engine(catalog, InMemoryOrderStore::new(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    let outcome = engine.admit_order(&request("ord-cat", None), now).expect("admit");
    let AdmissionOutcome::Admitted {
        order, ..
    } = outcome
    else {
        panic!("expected admission, got {outcome:?}");
    };
    assert_eq!(order.items[0].sku.as_str(), "sku-gpu");
}

/// Verifies an intended SKU outside the allow-list fails as a policy
/// violation rather than disappearing from the candidate set.
#[test]
fn intended_sku_outside_allowed_category_surfaces_violation() {
    let catalog = MockCatalog {
        offers: vec![offer("sku-cpu", "cpu", "100", 50)],
        reviews: BTreeMap::new(),
    };
    let store = InMemoryOrderStore::new();
    let engine = engine(catalog, store.clone(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    let outcome = engine.admit_order(&request("ord-blocked", Some("sku-cpu")), now).expect("admit");
    let AdmissionOutcome::Rejected {
        rejection,
        candidates_evaluated,
        trace,
    } = outcome
    else {
        panic!("expected rejection, got {outcome:?}");
    };
    let RejectionKind::GateFailed {
        violations,
    } = rejection
    else {
        panic!("expected gate failure, got {rejection:?}");
    };
    assert!(violations.contains(reason::POLICY_CATEGORY_BLOCKED));
    assert_eq!(candidates_evaluated, 1);
    let trace = trace.expect("rejection carries a trace");
    assert!(trace.reason_codes.contains(&reason::POLICY_CATEGORY_BLOCKED.to_string()));
    assert!(store.load(&OrderId::new("ord-blocked")).expect("load").is_none());
}

/// Verifies a budget violation rejects without persisting anything.
#[test]
fn budget_violation_rejects_without_persisting() {
    let catalog = MockCatalog {
        offers: vec![offer("sku-gpu-1", "gpu", "9999.00", 90)],
        reviews: BTreeMap::new(),
    };
    let store = InMemoryOrderStore::new();
    let notify = RecordingNotify::default();
    let engine = engine(catalog, store.clone(), notify.clone());
    let now = Timestamp::from_unix_millis(0);

    let outcome = engine.admit_order(&request("ord-2", Some("sku-gpu-1")), now).expect("admit");
    let AdmissionOutcome::Rejected {
        rejection, ..
    } = outcome
    else {
        panic!("expected rejection, got {outcome:?}");
    };
    let RejectionKind::GateFailed {
        violations,
    } = rejection
    else {
        panic!("expected gate failure, got {rejection:?}");
    };
    assert!(violations.contains(reason::POLICY_BUDGET_EXCEEDED));
    assert!(store.load(&OrderId::new("ord-2")).expect("load").is_none());
    assert!(notify.events().is_empty());
}

/// Verifies a peer veto rejects an otherwise admissible candidate.
#[test]
fn peer_veto_rejects_admissible_candidate() {
    let catalog = MockCatalog {
        offers: vec![offer("sku-gpu-1", "gpu", "1200.00", 90)],
        reviews: BTreeMap::from([(
            "sku-gpu-1".to_string(),
            vec![
                review("sku-gpu-1", ReviewVerdict::Endorse),
                review("sku-gpu-1", ReviewVerdict::Blocklist),
            ],
        )]),
    };
    let engine = engine(catalog, InMemoryOrderStore::new(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    let outcome = engine.admit_order(&request("ord-3", Some("sku-gpu-1")), now).expect("admit");
    let AdmissionOutcome::Rejected {
        rejection, ..
    } = outcome
    else {
        panic!("expected rejection, got {outcome:?}");
    };
    let RejectionKind::GateFailed {
        violations,
    } = rejection
    else {
        panic!("expected gate failure, got {rejection:?}");
    };
    assert_eq!(
        violations.into_iter().collect::<Vec<_>>(),
        vec![reason::TRUST_PEER_BLOCKLISTED.to_string()]
    );
}

/// Verifies an empty candidate set is a no-candidate rejection.
#[test]
fn out_of_stock_catalog_yields_no_candidate() {
    let mut unavailable = offer("sku-gpu-1", "gpu", "1200.00", 90);
    unavailable.stock_status = StockStatus::OutOfStock;
    let catalog = MockCatalog {
        offers: vec![unavailable],
        reviews: BTreeMap::new(),
    };
    let engine = engine(catalog, InMemoryOrderStore::new(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    let outcome = engine.admit_order(&request("ord-4", None), now).expect("admit");
    let AdmissionOutcome::Rejected {
        rejection,
        candidates_evaluated,
        trace,
    } = outcome
    else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert_eq!(rejection, RejectionKind::NoCandidate);
    assert_eq!(candidates_evaluated, 0);
    assert!(trace.is_none());
}

/// Verifies an unknown intended SKU is a no-candidate rejection.
#[test]
fn unknown_intended_sku_yields_no_candidate() {
    let catalog = MockCatalog {
        offers: vec![offer("sku-gpu-1", "gpu", "1200.00", 90)],
        reviews: BTreeMap::new(),
    };
    let engine = engine(catalog, InMemoryOrderStore::new(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    let outcome = engine.admit_order(&request("ord-5", Some("sku-ghost")), now).expect("admit");
    let AdmissionOutcome::Rejected {
        rejection, ..
    } = outcome
    else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert_eq!(rejection, RejectionKind::NoCandidate);
}

/// Verifies unknown stock is admissible and recorded with its warn code.
#[test]
fn unknown_stock_admits_with_warn_code() {
    let mut uncertain = offer("sku-gpu-1", "gpu", "1200.00", 90);
    uncertain.stock_status = StockStatus::Unknown;
    let catalog = MockCatalog {
        offers: vec![uncertain],
        reviews: BTreeMap::new(),
    };
    let engine = engine(catalog, InMemoryOrderStore::new(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    let outcome = engine.admit_order(&request("ord-6", Some("sku-gpu-1")), now).expect("admit");
    let AdmissionOutcome::Admitted {
        order,
        trace,
        ..
    } = outcome
    else {
        panic!("expected admission, got {outcome:?}");
    };
    assert!(order.items[0].reason_codes.contains(reason::STOCK_UNKNOWN));
    assert!(trace.reason_codes.contains(&reason::STOCK_UNKNOWN.to_string()));
}

/// Verifies a malformed policy document fails before candidate gathering.
#[test]
fn malformed_policy_fails_closed() {
    let engine =
        engine(MockCatalog::default(), InMemoryOrderStore::new(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    let mut admission = request("ord-7", None);
    admission.policy_document = json!({ "policyId": "policy-1" });
    let err = engine.admit_order(&admission, now).expect_err("must fail");
    assert!(matches!(err, EngineError::Policy(_)));
}

/// Verifies a duplicate order identifier surfaces the store conflict.
#[test]
fn duplicate_order_id_is_rejected_by_store() {
    let catalog = MockCatalog {
        offers: vec![offer("sku-gpu-1", "gpu", "1200.00", 90)],
        reviews: BTreeMap::new(),
    };
    let engine = engine(catalog, InMemoryOrderStore::new(), RecordingNotify::default());
    let now = Timestamp::from_unix_millis(0);

    engine.admit_order(&request("ord-8", Some("sku-gpu-1")), now).expect("first admit");
    let err = engine.admit_order(&request("ord-8", Some("sku-gpu-1")), now).expect_err("must fail");
    assert!(matches!(err, EngineError::Store(StoreError::AlreadyExists(_))));
}

/// Verifies a failed notification never rolls back the created order.
#[test]
fn notification_failure_does_not_roll_back_admission() {
    let catalog = MockCatalog {
        offers: vec![offer("sku-gpu-1", "gpu", "1200.00", 90)],
        reviews: BTreeMap::new(),
    };
    let store = InMemoryOrderStore::new();
    let notify = RecordingNotify {
        fail: true,
        ..RecordingNotify::default()
    };
    let engine = engine(catalog, store.clone(), notify);
    let now = Timestamp::from_unix_millis(0);

    let outcome = engine.admit_order(&request("ord-9", Some("sku-gpu-1")), now).expect("admit");
    let AdmissionOutcome::Admitted {
        notified, ..
    } = outcome
    else {
        panic!("expected admission, got {outcome:?}");
    };
    assert!(!notified);
    assert!(store.load(&OrderId::new("ord-9")).expect("load").is_some());
}
