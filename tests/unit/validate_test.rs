use refrecon::refrecon::pipeline::validate::{evaluate, evaluate_record, VALIDITY_COLUMN};
use refrecon::refrecon::types::{FieldValue, Record};

fn s(v: &str) -> FieldValue {
    FieldValue::String(v.to_string())
}

/// A record satisfying every condition_a conjunct.
fn fully_rewarded() -> Record {
    let mut r = Record::default();
    r.set("reward_value", FieldValue::Float(30.0));
    r.set("referral_status", s("Berhasil"));
    r.set("transaction_id", s("tx1"));
    r.set("transaction_status", s("Paid"));
    r.set("transaction_type", s("New"));
    r.set("transaction_after_referral", FieldValue::Boolean(true));
    r.set("same_month", FieldValue::Boolean(true));
    r.set("membership_valid", FieldValue::Boolean(true));
    r.set("is_deleted", FieldValue::Boolean(false));
    r.set("is_reward_granted", FieldValue::Boolean(true));
    r
}

/// A pending referral correctly carrying no reward (condition_b).
fn pending_unrewarded() -> Record {
    let mut r = Record::default();
    r.set("referral_status", s("Menunggu"));
    r.set("reward_value", FieldValue::Null);
    r
}

// ============================================================================
// condition_a: every conjunct is load-bearing
// ============================================================================

#[test]
fn test_fully_rewarded_referral_is_valid() {
    assert!(evaluate_record(&fully_rewarded()));
}

#[test]
fn test_each_condition_a_conjunct_failure_invalidates() {
    let spoilers: Vec<(&str, FieldValue)> = vec![
        ("reward_value", FieldValue::Float(0.0)),
        ("reward_value", FieldValue::Null),
        ("referral_status", s("Menunggu")),
        ("transaction_id", FieldValue::Null),
        ("transaction_status", s("Pending")),
        ("transaction_type", s("Renewal")),
        ("transaction_after_referral", FieldValue::Boolean(false)),
        ("same_month", FieldValue::Boolean(false)),
        ("membership_valid", FieldValue::Boolean(false)),
        ("is_deleted", FieldValue::Boolean(true)),
        ("is_reward_granted", FieldValue::Boolean(false)),
        ("is_reward_granted", FieldValue::Null),
    ];

    for (column, spoiled) in spoilers {
        let mut record = fully_rewarded();
        record.set(column, spoiled.clone());
        assert!(
            !evaluate_record(&record),
            "spoiling '{}' with {:?} should invalidate the record",
            column,
            spoiled
        );
    }
}

#[test]
fn test_unknown_deletion_status_counts_as_deleted() {
    let mut record = fully_rewarded();
    record.set("is_deleted", FieldValue::Null);
    assert!(!evaluate_record(&record));
}

#[test]
fn test_status_comparison_is_case_exact() {
    // Labels are canonicalized upstream; a raw lowercase label must not match
    let mut record = fully_rewarded();
    record.set("referral_status", s("berhasil"));
    assert!(!evaluate_record(&record));
}

// ============================================================================
// condition_b: correctly never rewarded
// ============================================================================

#[test]
fn test_pending_without_reward_is_valid() {
    assert!(evaluate_record(&pending_unrewarded()));
}

#[test]
fn test_failed_without_reward_is_valid() {
    let mut record = pending_unrewarded();
    record.set("referral_status", s("Tidak Berhasil"));
    assert!(evaluate_record(&record));
}

#[test]
fn test_pending_with_reward_value_is_invalid() {
    let mut record = pending_unrewarded();
    record.set("reward_value", FieldValue::Float(30.0));
    assert!(!evaluate_record(&record));
}

#[test]
fn test_completed_without_reward_is_invalid() {
    // "Berhasil" is not a condition_b status, and condition_a needs a reward
    let mut record = pending_unrewarded();
    record.set("referral_status", s("Berhasil"));
    assert!(!evaluate_record(&record));
}

#[test]
fn test_completed_with_ungranted_reward_is_invalid() {
    // Open business question pinned by this test: a completed referral with
    // a reward value but no grant stays invalid
    let mut record = fully_rewarded();
    record.set("is_reward_granted", FieldValue::Boolean(false));
    assert!(!evaluate_record(&record));
}

// ============================================================================
// evaluate(): column annotation
// ============================================================================

#[test]
fn test_evaluate_annotates_every_row() {
    let mut rows = vec![fully_rewarded(), pending_unrewarded(), Record::default()];
    evaluate(&mut rows);

    assert_eq!(rows[0].field(VALIDITY_COLUMN), &FieldValue::Boolean(true));
    assert_eq!(rows[1].field(VALIDITY_COLUMN), &FieldValue::Boolean(true));
    assert_eq!(rows[2].field(VALIDITY_COLUMN), &FieldValue::Boolean(false));
}
