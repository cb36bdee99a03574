//! Join engine.
//!
//! Builds the wide reconciliation relation: one row per surviving referral,
//! enriched through an ordered sequence of left joins against the lookup
//! and event tables. Every join preserves all left rows; unmatched right
//! sides contribute nulls. Right-side key columns are never copied into
//! the wide row, so the original `referral_id` / `referrer_id` /
//! `transaction_id` stay unambiguous through every rename.

use crate::refrecon::error::{PipelineError, PipelineResult};
use crate::refrecon::types::{FieldValue, Record, Table};
use std::collections::HashMap;

/// One left join step: match `left_key` against `right_key` in the right
/// table and project `(source column, output column)` pairs into the wide
/// row.
struct JoinStep<'a> {
    right: &'a Table,
    left_key: &'a str,
    right_key: &'a str,
    projections: &'a [(&'a str, &'a str)],
}

/// Join key form used for hash lookups. Typed values reduce to their
/// canonical text so an id read as integer on one side and text on the
/// other still matches.
fn key_of(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Null => None,
        other => Some(other.to_output_string()),
    }
}

/// Execute one hash left join over the wide rows in place.
///
/// The right side is indexed once; on duplicate right-side keys the first
/// occurrence wins, so each left row produces exactly one output row.
fn left_join(rows: &mut [Record], step: &JoinStep<'_>) -> PipelineResult<()> {
    if !step.right.has_column(step.right_key) {
        return Err(PipelineError::schema_error(
            format!("join key missing from table '{}'", step.right.name),
            Some(step.right_key.to_string()),
        ));
    }
    for (source, _) in step.projections {
        if !step.right.has_column(source) {
            return Err(PipelineError::schema_error(
                format!("projected column missing from table '{}'", step.right.name),
                Some(source.to_string()),
            ));
        }
    }

    let mut index: HashMap<String, &Record> = HashMap::with_capacity(step.right.len());
    for right_row in &step.right.rows {
        if let Some(key) = key_of(right_row.field(step.right_key)) {
            index.entry(key).or_insert(right_row);
        }
    }

    for row in rows.iter_mut() {
        let matched = key_of(row.field(step.left_key)).and_then(|k| index.get(&k).copied());
        for (source, output) in step.projections {
            let value = match matched {
                Some(right_row) => right_row.field(source).clone(),
                None => FieldValue::Null,
            };
            row.set(*output, value);
        }
    }
    Ok(())
}

/// Build the wide relation from the cleaned referral table and the five
/// supporting record sets.
///
/// Join order follows the reconciliation contract:
/// 1. status lookup (`referral_status`)
/// 2. reward lookup (`reward_value`)
/// 3. paid transaction (all transaction fields)
/// 4. referrer membership snapshot (renamed `referrer_*` fields)
/// 5. reward-grant log (`reward_granted_at`, `is_reward_granted`)
pub fn join_all(
    referrals: &Table,
    statuses: &Table,
    rewards: &Table,
    paid_transactions: &Table,
    user_logs: &Table,
    referral_logs: &Table,
) -> PipelineResult<Vec<Record>> {
    let mut rows: Vec<Record> = referrals.rows.clone();

    let steps = [
        JoinStep {
            right: statuses,
            left_key: "user_referral_status_id",
            right_key: "id",
            projections: &[("description", "referral_status")],
        },
        JoinStep {
            right: rewards,
            left_key: "referral_reward_id",
            right_key: "id",
            projections: &[("reward_value", "reward_value")],
        },
        JoinStep {
            right: paid_transactions,
            left_key: "transaction_id",
            right_key: "transaction_id",
            projections: &[
                ("transaction_at", "transaction_at"),
                ("transaction_status", "transaction_status"),
                ("transaction_type", "transaction_type"),
                ("transaction_location", "transaction_location"),
            ],
        },
        JoinStep {
            right: user_logs,
            left_key: "referrer_id",
            right_key: "user_id",
            projections: &[
                ("name", "referrer_name"),
                ("phone_number", "referrer_phone_number"),
                ("homeclub", "referrer_homeclub"),
                ("membership_expired_date", "membership_expired_date"),
                ("is_deleted", "is_deleted"),
            ],
        },
        JoinStep {
            right: referral_logs,
            left_key: "referral_id",
            right_key: "user_referral_id",
            projections: &[
                ("created_at", "reward_granted_at"),
                ("is_reward_granted", "is_reward_granted"),
            ],
        },
    ];

    for step in &steps {
        left_join(&mut rows, step)?;
        log::debug!(
            "Joined '{}' on {} = {} ({} wide rows)",
            step.right.name,
            step.left_key,
            step.right_key,
            rows.len()
        );
    }

    Ok(rows)
}
