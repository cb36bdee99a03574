use refrecon::refrecon::error::PipelineError;
use refrecon::refrecon::pipeline::join::join_all;
use refrecon::refrecon::types::{FieldValue, Record, Table};
use std::collections::HashMap;

fn table_with_rows(name: &str, columns: &[&str], rows: Vec<Vec<FieldValue>>) -> Table {
    let mut table = Table::new(name, columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        let fields: HashMap<String, FieldValue> = columns
            .iter()
            .map(|c| c.to_string())
            .zip(row.into_iter())
            .collect();
        table.rows.push(Record::new(fields));
    }
    table
}

fn s(v: &str) -> FieldValue {
    FieldValue::String(v.to_string())
}

fn referrals() -> Table {
    table_with_rows(
        "user_referrals",
        &[
            "referral_id",
            "referrer_id",
            "user_referral_status_id",
            "referral_reward_id",
            "transaction_id",
        ],
        vec![
            vec![
                s("r1"),
                FieldValue::Integer(10),
                FieldValue::Integer(1),
                FieldValue::Integer(100),
                s("tx1"),
            ],
            vec![
                s("r2"),
                FieldValue::Integer(11),
                FieldValue::Integer(99), // no such status
                FieldValue::Null,
                FieldValue::Null,
            ],
        ],
    )
}

fn statuses() -> Table {
    table_with_rows(
        "user_referral_statuses",
        &["id", "description"],
        vec![vec![FieldValue::Integer(1), s("Berhasil")]],
    )
}

fn rewards() -> Table {
    table_with_rows(
        "referral_rewards",
        &["id", "reward_value"],
        vec![vec![FieldValue::Integer(100), FieldValue::Float(30.0)]],
    )
}

fn paid_transactions() -> Table {
    table_with_rows(
        "paid_transactions",
        &[
            "transaction_id",
            "transaction_at",
            "transaction_status",
            "transaction_type",
            "transaction_location",
        ],
        vec![vec![
            s("tx1"),
            FieldValue::Null,
            s("Paid"),
            s("New"),
            s("Jakarta"),
        ]],
    )
}

fn user_logs() -> Table {
    table_with_rows(
        "user_logs",
        &[
            "user_id",
            "name",
            "phone_number",
            "homeclub",
            "membership_expired_date",
            "is_deleted",
        ],
        vec![vec![
            FieldValue::Integer(10),
            s("Ayu"),
            s("0812"),
            s("Senayan"),
            FieldValue::Null,
            FieldValue::Boolean(false),
        ]],
    )
}

fn referral_logs() -> Table {
    table_with_rows(
        "user_referral_logs",
        &["user_referral_id", "created_at", "is_reward_granted"],
        vec![vec![s("r1"), FieldValue::Null, FieldValue::Boolean(true)]],
    )
}

// ============================================================================
// Left-join semantics
// ============================================================================

#[test]
fn test_left_join_totality() {
    let wide = join_all(
        &referrals(),
        &statuses(),
        &rewards(),
        &paid_transactions(),
        &user_logs(),
        &referral_logs(),
    )
    .unwrap();

    // Both referral rows survive regardless of match success
    assert_eq!(wide.len(), 2);
}

#[test]
fn test_matched_row_carries_renamed_projections() {
    let wide = join_all(
        &referrals(),
        &statuses(),
        &rewards(),
        &paid_transactions(),
        &user_logs(),
        &referral_logs(),
    )
    .unwrap();

    let row = &wide[0];
    assert_eq!(row.field("referral_status"), &s("Berhasil"));
    assert_eq!(row.field("reward_value"), &FieldValue::Float(30.0));
    assert_eq!(row.field("transaction_status"), &s("Paid"));
    assert_eq!(row.field("referrer_name"), &s("Ayu"));
    assert_eq!(row.field("referrer_phone_number"), &s("0812"));
    assert_eq!(row.field("referrer_homeclub"), &s("Senayan"));
    assert_eq!(row.field("is_reward_granted"), &FieldValue::Boolean(true));
    // Original keys remain untouched by the renames
    assert_eq!(row.field("referral_id"), &s("r1"));
    assert_eq!(row.field("referrer_id"), &FieldValue::Integer(10));
    assert_eq!(row.field("transaction_id"), &s("tx1"));
}

#[test]
fn test_unmatched_row_gets_nulls_not_dropped() {
    let wide = join_all(
        &referrals(),
        &statuses(),
        &rewards(),
        &paid_transactions(),
        &user_logs(),
        &referral_logs(),
    )
    .unwrap();

    let row = &wide[1];
    assert!(row.field("referral_status").is_null());
    assert!(row.field("reward_value").is_null());
    assert!(row.field("transaction_status").is_null());
    assert!(row.field("referrer_name").is_null());
    assert!(row.field("is_reward_granted").is_null());
    // The referral itself is still reportable
    assert_eq!(row.field("referral_id"), &s("r2"));
}

#[test]
fn test_duplicate_right_keys_do_not_multiply_rows() {
    let mut logs = referral_logs();
    // Second grant event for the same referral
    logs.rows.push(Record::new(
        [
            ("user_referral_id".to_string(), s("r1")),
            ("created_at".to_string(), FieldValue::Null),
            ("is_reward_granted".to_string(), FieldValue::Boolean(false)),
        ]
        .into_iter()
        .collect(),
    ));

    let wide = join_all(
        &referrals(),
        &statuses(),
        &rewards(),
        &paid_transactions(),
        &user_logs(),
        &logs,
    )
    .unwrap();

    assert_eq!(wide.len(), 2);
    // First occurrence wins
    assert_eq!(wide[0].field("is_reward_granted"), &FieldValue::Boolean(true));
}

#[test]
fn test_missing_join_key_column_is_schema_error() {
    let bad_statuses = table_with_rows(
        "user_referral_statuses",
        &["status_code", "description"],
        vec![vec![FieldValue::Integer(1), s("Berhasil")]],
    );

    let result = join_all(
        &referrals(),
        &bad_statuses,
        &rewards(),
        &paid_transactions(),
        &user_logs(),
        &referral_logs(),
    );

    match result {
        Err(PipelineError::SchemaError { column, .. }) => {
            assert_eq!(column.as_deref(), Some("id"));
        }
        other => panic!("Expected SchemaError, got {:?}", other),
    }
}
