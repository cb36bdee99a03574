//! Pipeline error handling.
//!
//! All reconciliation operations return well-structured errors with the
//! context needed to identify which input or stage failed. The taxonomy is
//! deliberately small:
//!
//! - **Source errors**: an input table could not be loaded or is malformed
//!   beyond field-level recovery
//! - **Schema errors**: a required column is missing from a record set
//! - **Type errors**: a comparison met an operand the normalizer should
//!   have reduced (e.g. a timestamp column still carrying text); these are
//!   fatal rather than silently coerced
//! - **IO errors**: the report or profile artifact could not be written
//!
//! Field-level defects (unparsable timestamps, digitless reward text) are
//! *not* errors: they become null values and propagate to a conservative
//! `false` eligibility outcome.

use std::fmt;

/// Errors raised by the reconciliation pipeline and its datasource layer.
#[derive(Debug, Clone)]
pub enum PipelineError {
    /// An input table failed to load.
    SourceError {
        /// Name of the input table
        table: String,
        /// Description of the load failure
        message: String,
    },

    /// A record set is missing a column an operation requires.
    SchemaError {
        /// Description of the schema violation
        message: String,
        /// Name of the offending column, if applicable
        column: Option<String>,
    },

    /// A value had the wrong type for the operation applied to it.
    TypeError {
        /// Expected type name
        expected: String,
        /// Actual type name encountered
        actual: String,
        /// The value that caused the error, if available
        value: Option<String>,
    },

    /// An output artifact could not be written.
    IoError {
        /// Path being written
        path: String,
        /// Description of the IO failure
        message: String,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::SourceError { table, message } => {
                write!(f, "Source error for table '{}': {}", table, message)
            }
            PipelineError::SchemaError { message, column } => {
                if let Some(col) = column {
                    write!(f, "Schema error for column '{}': {}", col, message)
                } else {
                    write!(f, "Schema error: {}", message)
                }
            }
            PipelineError::TypeError {
                expected,
                actual,
                value,
            } => {
                if let Some(val) = value {
                    write!(
                        f,
                        "Type error: expected {}, got {} for value '{}'",
                        expected, actual, val
                    )
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, actual)
                }
            }
            PipelineError::IoError { path, message } => {
                write!(f, "IO error for '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for PipelineError {}

impl PipelineError {
    /// Create a source error for a named input table.
    pub fn source_error(table: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::SourceError {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a schema error.
    pub fn schema_error(message: impl Into<String>, column: Option<String>) -> Self {
        PipelineError::SchemaError {
            message: message.into(),
            column,
        }
    }

    /// Create a type error.
    pub fn type_error(
        expected: impl Into<String>,
        actual: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        PipelineError::TypeError {
            expected: expected.into(),
            actual: actual.into(),
            value,
        }
    }

    /// Create an IO error for an output path.
    pub fn io_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
