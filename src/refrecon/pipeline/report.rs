//! Report projection.
//!
//! Selects the fixed 20-column report projection from the wide relation
//! and removes rows that are exact duplicates across every selected
//! column. Row order carries no meaning; deduplication keeps the first
//! occurrence seen.

use crate::refrecon::types::{Record, Table};
use std::collections::HashSet;

/// Output name of the report table.
pub const REPORT_TABLE_NAME: &str = "referral_validation_report";

/// The report's column set, in output order.
pub const REPORT_COLUMNS: [&str; 20] = [
    "referral_id",
    "referral_source",
    "referral_at",
    "referrer_id",
    "referrer_name",
    "referrer_phone_number",
    "referrer_homeclub",
    "referee_id",
    "referee_name",
    "referee_phone",
    "referral_status",
    "reward_value",
    "transaction_id",
    "transaction_status",
    "transaction_at",
    "transaction_location",
    "transaction_type",
    "updated_at",
    "reward_granted_at",
    "is_business_logic_valid",
];

/// Canonical identity of a projected row, used for duplicate detection.
///
/// Type name and canonical text together distinguish a null cell from an
/// empty string and an integer from its text form.
fn projection_key(record: &Record) -> String {
    let mut key = String::new();
    for column in REPORT_COLUMNS {
        let value = record.field(column);
        key.push_str(value.type_name());
        key.push(':');
        key.push_str(&value.to_output_string());
        key.push('\u{1f}');
    }
    key
}

/// Project the wide rows onto the report columns and drop exact duplicates.
pub fn project(rows: Vec<Record>) -> Table {
    let mut report = Table::new(
        REPORT_TABLE_NAME,
        REPORT_COLUMNS.iter().map(|c| c.to_string()).collect(),
    );

    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
    for row in rows {
        let mut projected = Record::default();
        for column in REPORT_COLUMNS {
            projected.set(column, row.field(column).clone());
        }
        if seen.insert(projection_key(&projected)) {
            report.rows.push(projected);
        }
    }

    report
}
