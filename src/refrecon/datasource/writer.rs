//! File Sink Implementation
//!
//! Writes a finished table as delimited text. The header row comes from the
//! table's declared column order; cells use the value model's canonical
//! formatting (null as empty, timestamps without a zone suffix).

use crate::refrecon::datasource::config::FileSinkConfig;
use crate::refrecon::error::{PipelineError, PipelineResult};
use crate::refrecon::types::Table;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writer that persists tables as delimited text files
pub struct FileWriter {
    config: FileSinkConfig,
}

impl FileWriter {
    /// Create a new file writer with configuration
    pub fn new(config: FileSinkConfig) -> Self {
        Self { config }
    }

    /// Create a writer with the default CSV configuration
    pub fn csv() -> Self {
        Self::new(FileSinkConfig::default())
    }

    /// Write `table` to `path`, creating parent directories as needed.
    pub fn write_table(&self, table: &Table, path: &Path) -> PipelineResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PipelineError::io_error(path.display().to_string(), e.to_string())
                })?;
            }
        }

        let file = File::create(path)
            .map_err(|e| PipelineError::io_error(path.display().to_string(), e.to_string()))?;
        let mut writer = BufWriter::new(file);

        if self.config.write_header {
            let header = table
                .columns
                .iter()
                .map(|c| self.quote_field(c))
                .collect::<Vec<_>>()
                .join(&self.config.delimiter.to_string());
            writeln!(writer, "{}", header)
                .map_err(|e| PipelineError::io_error(path.display().to_string(), e.to_string()))?;
        }

        for row in &table.rows {
            let line = table
                .columns
                .iter()
                .map(|c| self.quote_field(&row.field(c).to_output_string()))
                .collect::<Vec<_>>()
                .join(&self.config.delimiter.to_string());
            writeln!(writer, "{}", line)
                .map_err(|e| PipelineError::io_error(path.display().to_string(), e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| PipelineError::io_error(path.display().to_string(), e.to_string()))?;

        log::info!(
            "Wrote table '{}' ({} rows) to {}",
            table.name,
            table.len(),
            path.display()
        );
        Ok(())
    }

    /// RFC 4180 quoting: wrap the field when it contains the delimiter,
    /// the quote character, or a line break, doubling embedded quotes.
    fn quote_field(&self, field: &str) -> String {
        let needs_quoting = field.contains(self.config.delimiter)
            || field.contains(self.config.quote)
            || field.contains('\n')
            || field.contains('\r');

        if needs_quoting {
            let quote = self.config.quote;
            let escaped = field.replace(quote, &format!("{}{}", quote, quote));
            format!("{}{}{}", quote, escaped, quote)
        } else {
            field.to_string()
        }
    }
}
