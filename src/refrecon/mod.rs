// Referral reconciliation engine for refrecon
// Batch validation of referral program lifecycle data

pub mod datasource;
pub mod error;
pub mod pipeline;
pub mod profile;
pub mod types;

// Re-export main API
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{run, PipelineInputs};
pub use types::{FieldValue, Record, Table};
