//! Input normalization.
//!
//! Everything the joins and comparisons depend on is made safe here:
//! timestamp columns are parsed and reduced to timezone-naive values,
//! free-text reward descriptions become numeric day counts, categorical
//! labels are title-cased exactly once, and referral rows missing a join
//! key are dropped. Each field fails independently: a malformed value
//! nulls that cell, never the table.

use crate::refrecon::types::{FieldValue, Table};
use chrono::{DateTime, NaiveDateTime};

/// Timestamp parse formats carrying an explicit UTC offset. The offset is
/// stripped after parsing, preserving wall-clock time.
const AWARE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
];

/// Timezone-naive timestamp parse formats.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse one cell into a timezone-naive timestamp.
///
/// Accepts values the datasource already typed (timestamps pass through,
/// dates become midnight), integer epoch seconds, and string forms with or
/// without an offset. Returns None for anything unparsable.
pub fn parse_timestamp(value: &FieldValue) -> Option<NaiveDateTime> {
    match value {
        FieldValue::Timestamp(ts) => Some(*ts),
        FieldValue::Date(d) => d.and_hms_opt(0, 0, 0),
        FieldValue::Integer(secs) => {
            DateTime::from_timestamp(*secs, 0).map(|dt| dt.naive_utc())
        }
        FieldValue::String(s) => {
            let s = s.trim();
            for fmt in AWARE_FORMATS {
                if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                    // Drop the offset without converting: wall-clock time
                    // is what the business comparisons are defined over
                    return Some(dt.naive_local());
                }
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.naive_local());
            }
            if s.len() == 10 {
                if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    return d.and_hms_opt(0, 0, 0);
                }
            }
            for fmt in NAIVE_FORMATS {
                if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
                    return Some(ts);
                }
            }
            None
        }
        _ => None,
    }
}

/// Rewrite a timestamp column in place; unparsable cells become null.
pub fn normalize_timestamp_column(table: &mut Table, column: &str) {
    let mut failed = 0usize;
    for row in &mut table.rows {
        let value = row.field(column).clone();
        if value.is_null() {
            continue;
        }
        match parse_timestamp(&value) {
            Some(ts) => row.set(column, FieldValue::Timestamp(ts)),
            None => {
                failed += 1;
                row.set(column, FieldValue::Null);
            }
        }
    }
    if failed > 0 {
        log::warn!(
            "Table '{}': {} unparsable value(s) in timestamp column '{}' set to null",
            table.name,
            failed,
            column
        );
    }
}

/// Extract the first contiguous digit run from free text as a float.
///
/// `"30 days"` becomes `30.0`; text with no digits yields None, never
/// zero. Zero and "no digits" carry different eligibility meanings.
pub fn extract_leading_digits(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<f64>().ok()
}

/// Reduce a free-text reward column to its numeric day count.
pub fn normalize_reward_column(table: &mut Table, column: &str) {
    for row in &mut table.rows {
        let replacement = match row.field(column) {
            FieldValue::String(s) => match extract_leading_digits(s) {
                Some(v) => FieldValue::Float(v),
                None => FieldValue::Null,
            },
            FieldValue::Integer(i) => FieldValue::Float(*i as f64),
            FieldValue::Float(f) => FieldValue::Float(*f),
            _ => FieldValue::Null,
        };
        row.set(column, replacement);
    }
}

/// Title-case a single word: first alphabetic character uppercased, the
/// rest lowercased. Word boundaries are any non-alphabetic character.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Canonicalize a categorical text column to title case.
///
/// Comparisons downstream match against titled literals ("Berhasil",
/// "Paid", "New"), so this must run exactly once per column.
pub fn normalize_categorical_column(table: &mut Table, column: &str) {
    for row in &mut table.rows {
        if let FieldValue::String(s) = row.field(column) {
            let titled = title_case(s);
            row.set(column, FieldValue::String(titled));
        }
    }
}

/// Drop rows whose key columns are null.
///
/// A filtering policy, not an error: referral rows without `referral_id`
/// or `referrer_id` cannot participate in any join or appear in the
/// report, so they are removed before the pipeline proper.
pub fn drop_null_keys(table: &mut Table, key_columns: &[&str]) {
    let before = table.len();
    table
        .rows
        .retain(|row| key_columns.iter().all(|k| !row.field(k).is_null()));
    let dropped = before - table.len();
    if dropped > 0 {
        log::info!(
            "Table '{}': dropped {} row(s) with null key(s) {:?}",
            table.name,
            dropped,
            key_columns
        );
    }
}
