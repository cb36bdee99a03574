//! Referral reconciliation CLI.
//!
//! Loads the seven referral-program record sets from a data directory, then
//! either runs the full validation pipeline or the per-column data-quality
//! profile, writing the result as delimited text.
//!
//! ## Usage
//!
//! ```bash
//! # Build the validation report
//! refrecon report --data-dir ./data --output ./output/referral_validation_report.csv
//!
//! # Build the per-column profile
//! refrecon profile --data-dir ./data --output ./profiling_report.csv
//! ```

use clap::{Parser, Subcommand};
use log::{error, info};
use refrecon::refrecon::datasource::{FileReader, FileWriter};
use refrecon::refrecon::pipeline::{self, PipelineInputs};
use refrecon::refrecon::profile;
use refrecon::refrecon::types::Table;
use refrecon::PipelineResult;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "refrecon")]
#[command(about = "Batch reconciliation and validation of referral program data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the validation pipeline and write the referral report
    Report {
        /// Directory containing the seven input CSV files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Output path for the validation report
        #[arg(short, long, default_value = "output/referral_validation_report.csv")]
        output: PathBuf,
    },
    /// Profile every column of the input tables
    Profile {
        /// Directory containing the seven input CSV files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Output path for the profiling report
        #[arg(short, long, default_value = "profiling_report.csv")]
        output: PathBuf,
    },
}

/// Input file names as produced by the upstream export job.
const INPUT_FILES: [(&str, &str); 7] = [
    ("user_referrals", "user_referrals.csv"),
    ("user_referral_statuses", "user_referral_statuses.csv"),
    ("referral_rewards", "referral_rewards.csv"),
    ("paid_transactions", "paid_transactions.csv"),
    ("user_logs", "user_logs.csv"),
    ("user_referral_logs", "user_referral_logs.csv"),
    ("lead_log", "lead_log.csv"),
];

fn load_inputs(data_dir: &Path) -> PipelineResult<PipelineInputs> {
    let reader = FileReader::csv();
    let mut tables: Vec<Table> = Vec::with_capacity(INPUT_FILES.len());
    for (name, file) in INPUT_FILES {
        let table = reader.load_table(&data_dir.join(file), name)?;
        info!("Loaded '{}': {} row(s)", name, table.len());
        tables.push(table);
    }

    // INPUT_FILES order
    let mut tables = tables.into_iter();
    Ok(PipelineInputs {
        referrals: tables.next().unwrap(),
        statuses: tables.next().unwrap(),
        rewards: tables.next().unwrap(),
        paid_transactions: tables.next().unwrap(),
        user_logs: tables.next().unwrap(),
        referral_logs: tables.next().unwrap(),
        lead_logs: tables.next().unwrap(),
    })
}

fn run_report(data_dir: &Path, output: &Path) -> PipelineResult<()> {
    let inputs = load_inputs(data_dir)?;
    let report = pipeline::run(inputs)?;
    FileWriter::csv().write_table(&report, output)?;
    info!("Pipeline complete: {} final row(s)", report.len());
    Ok(())
}

fn run_profile(data_dir: &Path, output: &Path) -> PipelineResult<()> {
    let inputs = load_inputs(data_dir)?;
    let profile = profile::profile_tables(&[
        &inputs.lead_logs,
        &inputs.paid_transactions,
        &inputs.rewards,
        &inputs.user_logs,
        &inputs.referral_logs,
        &inputs.statuses,
        &inputs.referrals,
    ]);
    FileWriter::csv().write_table(&profile, output)?;
    info!("Profiling complete: {} column(s)", profile.len());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Report { data_dir, output } => run_report(&data_dir, &output),
        Commands::Profile { data_dir, output } => run_profile(&data_dir, &output),
    };

    if let Err(e) = result {
        error!("Run failed: {}", e);
        std::process::exit(1);
    }
}
