//! The reconciliation pipeline.
//!
//! A pure function from seven input tables to one report table: normalize,
//! join, derive flags, evaluate eligibility, project. Path and IO concerns
//! live with the caller; the pipeline itself holds no external state and
//! either completes or fails outright.

pub mod flags;
pub mod join;
pub mod normalize;
pub mod report;
pub mod validate;

use crate::refrecon::error::PipelineResult;
use crate::refrecon::types::Table;

/// The seven input record sets, already parsed into tables.
///
/// `lead_logs` participates in normalization and profiling only; it is
/// never joined into the report.
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    pub referrals: Table,
    pub statuses: Table,
    pub rewards: Table,
    pub paid_transactions: Table,
    pub user_logs: Table,
    pub referral_logs: Table,
    pub lead_logs: Table,
}

/// Run the full reconciliation: returns the deduplicated 20-column report.
pub fn run(mut inputs: PipelineInputs) -> PipelineResult<Table> {
    // -------------------
    // NORMALIZE
    // -------------------
    normalize::normalize_timestamp_column(&mut inputs.lead_logs, "created_at");
    normalize::normalize_timestamp_column(&mut inputs.paid_transactions, "transaction_at");
    normalize::normalize_timestamp_column(&mut inputs.user_logs, "membership_expired_date");
    normalize::normalize_timestamp_column(&mut inputs.referral_logs, "created_at");
    normalize::normalize_timestamp_column(&mut inputs.referrals, "referral_at");
    normalize::normalize_timestamp_column(&mut inputs.referrals, "updated_at");

    normalize::normalize_reward_column(&mut inputs.rewards, "reward_value");

    normalize::drop_null_keys(&mut inputs.referrals, &["referral_id", "referrer_id"]);

    normalize::normalize_categorical_column(&mut inputs.referrals, "referral_source");
    normalize::normalize_categorical_column(&mut inputs.statuses, "description");
    normalize::normalize_categorical_column(&mut inputs.paid_transactions, "transaction_status");
    normalize::normalize_categorical_column(&mut inputs.paid_transactions, "transaction_type");

    log::info!(
        "Normalized inputs: {} referral(s) surviving key cleaning",
        inputs.referrals.len()
    );

    // -------------------
    // JOIN
    // -------------------
    let mut wide = join::join_all(
        &inputs.referrals,
        &inputs.statuses,
        &inputs.rewards,
        &inputs.paid_transactions,
        &inputs.user_logs,
        &inputs.referral_logs,
    )?;
    log::info!("Joined wide relation: {} row(s)", wide.len());

    // -------------------
    // FLAGS + ELIGIBILITY
    // -------------------
    flags::derive_flags(&mut wide)?;
    validate::evaluate(&mut wide);

    // -------------------
    // REPORT
    // -------------------
    let report = report::project(wide);
    log::info!("Report projected: {} row(s) after deduplication", report.len());

    Ok(report)
}
