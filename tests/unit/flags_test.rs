use chrono::NaiveDate;
use refrecon::refrecon::error::PipelineError;
use refrecon::refrecon::pipeline::flags::{
    derive_flags, FLAG_MEMBERSHIP_VALID, FLAG_SAME_MONTH, FLAG_TRANSACTION_AFTER_REFERRAL,
};
use refrecon::refrecon::types::{FieldValue, Record};

fn ts(y: i32, m: u32, d: u32, h: u32) -> FieldValue {
    FieldValue::Timestamp(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap(),
    )
}

fn row(
    transaction_at: FieldValue,
    referral_at: FieldValue,
    membership_expired: FieldValue,
) -> Record {
    let mut record = Record::default();
    record.set("transaction_at", transaction_at);
    record.set("referral_at", referral_at);
    record.set("membership_expired_date", membership_expired);
    record
}

fn flags_of(record: Record) -> (bool, bool, bool) {
    let mut rows = vec![record];
    derive_flags(&mut rows).unwrap();
    let r = &rows[0];
    let get = |name: &str| match r.field(name) {
        FieldValue::Boolean(b) => *b,
        other => panic!("Expected boolean flag {}, got {:?}", name, other),
    };
    (
        get(FLAG_TRANSACTION_AFTER_REFERRAL),
        get(FLAG_SAME_MONTH),
        get(FLAG_MEMBERSHIP_VALID),
    )
}

#[test]
fn test_transaction_after_referral_same_month() {
    let (after, same_month, membership) = flags_of(row(
        ts(2023, 5, 20, 10),
        ts(2023, 5, 14, 9),
        ts(2023, 6, 1, 0),
    ));
    assert!(after);
    assert!(same_month);
    assert!(membership);
}

#[test]
fn test_transaction_before_referral() {
    let (after, _, _) = flags_of(row(ts(2023, 5, 10, 10), ts(2023, 5, 14, 9), ts(2023, 6, 1, 0)));
    assert!(!after);
}

#[test]
fn test_same_month_requires_same_year() {
    let (_, same_month, _) =
        flags_of(row(ts(2024, 5, 20, 10), ts(2023, 5, 14, 9), ts(2024, 6, 1, 0)));
    assert!(!same_month);
}

#[test]
fn test_membership_expiring_on_transaction_day_is_valid() {
    // >= comparison: expiry at the same instant still counts
    let (_, _, membership) =
        flags_of(row(ts(2023, 5, 20, 0), ts(2023, 5, 14, 9), ts(2023, 5, 20, 0)));
    assert!(membership);
}

#[test]
fn test_expired_membership() {
    let (_, _, membership) =
        flags_of(row(ts(2023, 5, 20, 10), ts(2023, 5, 14, 9), ts(2023, 5, 1, 0)));
    assert!(!membership);
}

#[test]
fn test_null_operands_fail_to_false_never_raise() {
    let (after, same_month, membership) =
        flags_of(row(FieldValue::Null, ts(2023, 5, 14, 9), FieldValue::Null));
    assert!(!after);
    assert!(!same_month);
    assert!(!membership);
}

#[test]
fn test_unnormalized_operand_is_fatal() {
    // A timestamp column still holding text means the normalizer never ran
    // on it; comparing would silently coerce, so the run must fail
    let mut rows = vec![row(
        FieldValue::String("2023-05-20T10:00:00+07:00".to_string()),
        ts(2023, 5, 14, 9),
        FieldValue::Null,
    )];
    match derive_flags(&mut rows) {
        Err(PipelineError::TypeError { actual, .. }) => assert_eq!(actual, "string"),
        other => panic!("Expected TypeError, got {:?}", other),
    }
}
