//! Derived comparison flags.
//!
//! Three boolean columns computed per wide row from the joined timestamps:
//!
//! - `transaction_after_referral`: `transaction_at > referral_at`
//! - `same_month`: both fall in the same calendar year-month
//! - `membership_valid`: `membership_expired_date >= transaction_at`
//!
//! A null operand makes the flag false: "cannot determine" propagates to
//! a conservative eligibility outcome instead of raising. A *non-timestamp*
//! operand is different: it means the normalizer never reduced the column,
//! and comparing it would silently coerce across timezone semantics, so it
//! fails the run.

use crate::refrecon::error::{PipelineError, PipelineResult};
use crate::refrecon::types::{FieldValue, Record};
use chrono::{Datelike, NaiveDateTime};

pub const FLAG_TRANSACTION_AFTER_REFERRAL: &str = "transaction_after_referral";
pub const FLAG_SAME_MONTH: &str = "same_month";
pub const FLAG_MEMBERSHIP_VALID: &str = "membership_valid";

/// Extract a comparison operand: a naive timestamp, null, or a fatal
/// type defect.
fn timestamp_operand(
    record: &Record,
    column: &str,
) -> PipelineResult<Option<NaiveDateTime>> {
    match record.field(column) {
        FieldValue::Timestamp(ts) => Ok(Some(*ts)),
        FieldValue::Null => Ok(None),
        other => Err(PipelineError::type_error(
            format!("naive timestamp in column '{}'", column),
            other.type_name(),
            Some(other.to_string()),
        )),
    }
}

/// Compute the three derived flags for every wide row in place.
pub fn derive_flags(rows: &mut [Record]) -> PipelineResult<()> {
    for row in rows.iter_mut() {
        let transaction_at = timestamp_operand(row, "transaction_at")?;
        let referral_at = timestamp_operand(row, "referral_at")?;
        let membership_expired = timestamp_operand(row, "membership_expired_date")?;

        let after = match (transaction_at, referral_at) {
            (Some(tx), Some(referral)) => tx > referral,
            _ => false,
        };
        let same_month = match (transaction_at, referral_at) {
            (Some(tx), Some(referral)) => {
                (tx.year(), tx.month()) == (referral.year(), referral.month())
            }
            _ => false,
        };
        let membership_valid = match (membership_expired, transaction_at) {
            (Some(expired), Some(tx)) => expired >= tx,
            _ => false,
        };

        row.set(FLAG_TRANSACTION_AFTER_REFERRAL, FieldValue::Boolean(after));
        row.set(FLAG_SAME_MONTH, FieldValue::Boolean(same_month));
        row.set(FLAG_MEMBERSHIP_VALID, FieldValue::Boolean(membership_valid));
    }
    Ok(())
}
