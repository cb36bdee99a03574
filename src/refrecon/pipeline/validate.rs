//! Eligibility evaluation.
//!
//! A pure boolean formula over one wide row, no state machine:
//! `is_business_logic_valid = condition_a OR condition_b`.
//!
//! - **condition_a**: the referral was fully and correctly rewarded
//!   end-to-end: positive reward, completed status, a paid new-member
//!   transaction after the referral in the same month, a live membership,
//!   an undeleted referrer, and a granted reward.
//! - **condition_b**: the referral was correctly never rewarded, still
//!   pending or explicitly failed, with no reward value attached.
//!
//! Any other combination (a completed referral whose reward never got
//! granted, a pending referral that somehow carries a reward) is a data
//! defect and evaluates to false.

use crate::refrecon::types::{FieldValue, Record};

/// Output column holding the final validity verdict.
pub const VALIDITY_COLUMN: &str = "is_business_logic_valid";

/// Referral status label for a completed referral.
const STATUS_COMPLETED: &str = "Berhasil";
/// Referral status labels for pending / failed referrals.
const STATUSES_UNREWARDED: [&str; 2] = ["Menunggu", "Tidak Berhasil"];

/// Three-valued reading of a boolean cell.
///
/// `None` means the record does not answer the question; each predicate
/// states its own policy for that case rather than leaning on a default.
fn tristate(value: &FieldValue) -> Option<bool> {
    match value {
        FieldValue::Boolean(b) => Some(*b),
        _ => None,
    }
}

fn string_equals(value: &FieldValue, literal: &str) -> bool {
    matches!(value, FieldValue::String(s) if s == literal)
}

fn reward_positive(value: &FieldValue) -> bool {
    match value {
        FieldValue::Float(v) => *v > 0.0,
        FieldValue::Integer(i) => *i > 0,
        _ => false,
    }
}

fn flag_set(record: &Record, column: &str) -> bool {
    tristate(record.field(column)).unwrap_or(false)
}

/// Rewarded, completed referral with every supporting fact in place.
fn condition_a(record: &Record) -> bool {
    // Unknown deletion status counts as deleted: the branch only passes
    // when the referrer is known to be active
    let referrer_deleted = tristate(record.field("is_deleted")).unwrap_or(true);

    reward_positive(record.field("reward_value"))
        && string_equals(record.field("referral_status"), STATUS_COMPLETED)
        && !record.field("transaction_id").is_null()
        && string_equals(record.field("transaction_status"), "Paid")
        && string_equals(record.field("transaction_type"), "New")
        && flag_set(record, super::flags::FLAG_TRANSACTION_AFTER_REFERRAL)
        && flag_set(record, super::flags::FLAG_SAME_MONTH)
        && flag_set(record, super::flags::FLAG_MEMBERSHIP_VALID)
        && !referrer_deleted
        && tristate(record.field("is_reward_granted")).unwrap_or(false)
}

/// Pending or failed referral, correctly carrying no reward.
fn condition_b(record: &Record) -> bool {
    STATUSES_UNREWARDED
        .iter()
        .any(|status| string_equals(record.field("referral_status"), status))
        && record.field("reward_value").is_null()
}

/// Evaluate the validity verdict for one wide row.
pub fn evaluate_record(record: &Record) -> bool {
    condition_a(record) || condition_b(record)
}

/// Annotate every wide row with `is_business_logic_valid`.
pub fn evaluate(rows: &mut [Record]) {
    let mut valid = 0usize;
    for row in rows.iter_mut() {
        let verdict = evaluate_record(row);
        if verdict {
            valid += 1;
        }
        row.set(VALIDITY_COLUMN, FieldValue::Boolean(verdict));
    }
    log::info!(
        "Eligibility evaluated: {}/{} rows valid",
        valid,
        rows.len()
    );
}
