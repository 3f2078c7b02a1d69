// crates/jsonmart-admission-core/tests/trace.rs
// ============================================================================
// Module: Decision Trace Tests
// Description: Tests for trace recording, hashing, and trace rendering.
// Purpose: Validate hash-anchored immutability and re-derived logic traces.
// Dependencies: jsonmart-admission-core
// ============================================================================
//! ## Overview
//! Ensures decision traces hash deterministically over canonical JSON,
//! tampering is detectable, and the human-readable logic trace is re-derived
//! from the stored reason codes.

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

use jsonmart_admission_core::DEFAULT_HASH_ALGORITHM;
use jsonmart_admission_core::DecisionTrace;
use jsonmart_admission_core::PolicyId;
use jsonmart_admission_core::Sku;
use jsonmart_admission_core::Timestamp;
use jsonmart_admission_core::core::reason;

fn sample_trace() -> DecisionTrace {
    DecisionTrace::record(
        PolicyId::new("policy-1"),
        3,
        Sku::new("sku-7"),
        vec![
            reason::ELIG_CATEGORY_ALLOWED.to_string(),
            reason::ELIG_WITHIN_BUDGET.to_string(),
            reason::ELIG_DELIVERY_WITHIN_SLA.to_string(),
            reason::ELIG_SELLER_TRUST_MET.to_string(),
            reason::TRUST_PEER_VERIFIED.to_string(),
            reason::STOCK_AVAILABLE.to_string(),
        ],
        Timestamp::from_unix_millis(1_700_000_000_000),
        DEFAULT_HASH_ALGORITHM,
    )
    .expect("trace records")
}

/// Verifies a recorded trace validates against its own hash.
#[test]
fn recorded_trace_verifies() {
    let trace = sample_trace();
    assert!(trace.verify_hash().expect("hashing succeeds"));
}

/// Verifies identical inputs produce identical hashes.
#[test]
fn trace_hash_is_deterministic() {
    let first = sample_trace();
    let second = sample_trace();
    assert_eq!(first.trace_hash, second.trace_hash);
}

/// Verifies tampering with any recorded field is detectable.
#[test]
fn tampered_trace_fails_verification() {
    let mut trace = sample_trace();
    trace.reason_codes.push(reason::POLICY_BUDGET_EXCEEDED.to_string());
    assert!(!trace.verify_hash().expect("hashing succeeds"));

    let mut trace = sample_trace();
    trace.selected_sku = Sku::new("sku-other");
    assert!(!trace.verify_hash().expect("hashing succeeds"));

    let mut trace = sample_trace();
    trace.candidates_evaluated = 99;
    assert!(!trace.verify_hash().expect("hashing succeeds"));
}

/// Verifies the logic trace renders a header plus one line per code.
#[test]
fn logic_trace_renders_header_and_codes() {
    let trace = sample_trace();
    let lines = trace.logic_trace();
    assert_eq!(lines.len(), trace.reason_codes.len() + 1);
    assert!(lines[0].contains("policy-1"));
    assert!(lines[0].contains("3 candidate(s)"));
    assert!(lines[0].contains("sku-7"));
    for (line, code) in lines.iter().skip(1).zip(&trace.reason_codes) {
        assert!(line.ends_with(&format!("[{code}]")), "line: {line}");
    }
}

/// Verifies pass and fail codes render distinct prefixes.
#[test]
fn logic_trace_distinguishes_pass_and_fail() {
    let trace = DecisionTrace::record(
        PolicyId::new("policy-1"),
        1,
        Sku::new("sku-7"),
        vec![
            reason::ELIG_WITHIN_BUDGET.to_string(),
            reason::POLICY_DELIVERY_TOO_SLOW.to_string(),
        ],
        Timestamp::from_unix_millis(0),
        DEFAULT_HASH_ALGORITHM,
    )
    .expect("trace records");
    let lines = trace.logic_trace();
    assert!(lines[1].starts_with("PASS"), "line: {}", lines[1]);
    assert!(lines[2].starts_with("FAIL"), "line: {}", lines[2]);
}

/// Verifies unknown reason codes render without panicking.
#[test]
fn logic_trace_echoes_unknown_codes() {
    let trace = DecisionTrace::record(
        PolicyId::new("policy-1"),
        1,
        Sku::new("sku-7"),
        vec!["FUTURE_CODE".to_string()],
        Timestamp::from_unix_millis(0),
        DEFAULT_HASH_ALGORITHM,
    )
    .expect("trace records");
    let lines = trace.logic_trace();
    assert!(lines[1].contains("FUTURE_CODE"));
}
