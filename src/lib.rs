//! # refrecon
//!
//! A batch reconciliation and validation engine for referral program data.
//! Seven independently-sourced record sets (referrals, statuses, rewards,
//! paid transactions, member snapshots, reward-grant logs, and lead logs)
//! are normalized, left-joined into one wide relation per referral, and
//! annotated with a computed eligibility verdict.
//!
//! ## Features
//!
//! - **Typed tabular model**: dynamic [`FieldValue`] cells over named-field
//!   records, inferred at load time
//! - **Safe comparisons**: timestamps reduced to timezone-naive values
//!   before any ordering or month arithmetic; a non-normalized operand
//!   fails the run instead of coercing
//! - **Pure pipeline**: the whole transform is a function from input
//!   tables to the report table; IO stays with the caller
//! - **Data-quality profile**: per-column dtype, null count, and distinct
//!   count across all input tables
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use refrecon::refrecon::datasource::FileReader;
//! use refrecon::refrecon::pipeline::{self, PipelineInputs};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reader = FileReader::csv();
//!     let data = Path::new("data");
//!
//!     let inputs = PipelineInputs {
//!         referrals: reader.load_table(&data.join("user_referrals.csv"), "user_referrals")?,
//!         statuses: reader.load_table(
//!             &data.join("user_referral_statuses.csv"),
//!             "user_referral_statuses",
//!         )?,
//!         rewards: reader.load_table(&data.join("referral_rewards.csv"), "referral_rewards")?,
//!         paid_transactions: reader
//!             .load_table(&data.join("paid_transactions.csv"), "paid_transactions")?,
//!         user_logs: reader.load_table(&data.join("user_logs.csv"), "user_logs")?,
//!         referral_logs: reader
//!             .load_table(&data.join("user_referral_logs.csv"), "user_referral_logs")?,
//!         lead_logs: reader.load_table(&data.join("lead_log.csv"), "lead_log")?,
//!     };
//!
//!     let report = pipeline::run(inputs)?;
//!     println!("Final rows: {}", report.len());
//!     Ok(())
//! }
//! ```

pub mod refrecon;

// Re-export main API at crate root for easy access
pub use refrecon::error::{PipelineError, PipelineResult};
pub use refrecon::pipeline::{run, PipelineInputs};
pub use refrecon::types::{FieldValue, Record, Table};
