//! File Data Reader Implementation
//!
//! Loads one tabular record set per file. CSV parsing is RFC 4180 quote
//! aware; field values are inferred into the crate's value model so the
//! normalizer downstream only deals with typed cells.

use crate::refrecon::datasource::config::{FileFormat, FileSourceConfig};
use crate::refrecon::error::{PipelineError, PipelineResult};
use crate::refrecon::types::{FieldValue, Record, Table};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reader that loads whole tables from delimited or JSON Lines files
pub struct FileReader {
    config: FileSourceConfig,
}

impl FileReader {
    /// Create a new file reader with configuration
    pub fn new(config: FileSourceConfig) -> Self {
        Self { config }
    }

    /// Create a reader with the default CSV configuration
    pub fn csv() -> Self {
        Self::new(FileSourceConfig::default())
    }

    /// Load the file at `path` as a table named `table_name`.
    ///
    /// The whole file is materialized; this is a batch job and inputs are
    /// expected to fit in memory.
    pub fn load_table(&self, path: &Path, table_name: &str) -> PipelineResult<Table> {
        let file = File::open(path).map_err(|e| {
            PipelineError::source_error(
                table_name,
                format!("failed to open '{}': {}", path.display(), e),
            )
        })?;
        let reader = BufReader::new(file);

        match self.config.format {
            FileFormat::Csv | FileFormat::CsvNoHeader => self.load_csv(reader, table_name),
            FileFormat::JsonLines => self.load_json_lines(reader, table_name),
        }
    }

    fn load_csv(&self, reader: BufReader<File>, table_name: &str) -> PipelineResult<Table> {
        let has_header = self.config.format == FileFormat::Csv;
        let mut lines = reader.lines().skip(self.config.skip_lines);

        let mut headers: Option<Vec<String>> = None;
        if has_header {
            match lines.next() {
                Some(Ok(line)) => {
                    headers = Some(self.parse_csv_fields(&line));
                }
                Some(Err(e)) => {
                    return Err(PipelineError::source_error(
                        table_name,
                        format!("failed to read header: {}", e),
                    ));
                }
                None => {
                    // Empty file: a valid, zero-column, zero-row table
                    return Ok(Table::new(table_name, Vec::new()));
                }
            }
        }

        let mut table = Table::new(table_name, headers.clone().unwrap_or_default());

        for (line_number, line) in lines.enumerate() {
            if let Some(max) = self.config.max_records {
                if table.len() >= max {
                    break;
                }
            }
            let line = line.map_err(|e| {
                PipelineError::source_error(
                    table_name,
                    format!("failed to read line {}: {}", line_number + 1, e),
                )
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let raw_fields = self.parse_csv_fields(&line);
            let mut fields = HashMap::with_capacity(raw_fields.len());
            for (i, raw) in raw_fields.iter().enumerate() {
                let field_name = match &headers {
                    Some(h) => h
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| format!("column_{}", i)),
                    None => format!("column_{}", i),
                };
                if headers.is_none() {
                    table.add_column(field_name.clone());
                }
                fields.insert(field_name, infer_field_value(raw));
            }
            table.rows.push(Record::new(fields));
        }

        log::debug!(
            "Loaded table '{}': {} rows, {} columns",
            table_name,
            table.len(),
            table.columns.len()
        );
        Ok(table)
    }

    fn load_json_lines(&self, reader: BufReader<File>, table_name: &str) -> PipelineResult<Table> {
        let mut table = Table::new(table_name, Vec::new());

        for (line_number, line) in reader.lines().skip(self.config.skip_lines).enumerate() {
            if let Some(max) = self.config.max_records {
                if table.len() >= max {
                    break;
                }
            }
            let line = line.map_err(|e| {
                PipelineError::source_error(
                    table_name,
                    format!("failed to read line {}: {}", line_number + 1, e),
                )
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let value: serde_json::Value = serde_json::from_str(&line).map_err(|e| {
                PipelineError::source_error(
                    table_name,
                    format!("invalid JSON on line {}: {}", line_number + 1, e),
                )
            })?;
            let object = value.as_object().ok_or_else(|| {
                PipelineError::source_error(
                    table_name,
                    format!("line {} is not a JSON object", line_number + 1),
                )
            })?;

            let mut fields = HashMap::with_capacity(object.len());
            for (key, val) in object {
                table.add_column(key.clone());
                fields.insert(key.clone(), json_to_field_value(val));
            }
            table.rows.push(Record::new(fields));
        }

        log::debug!(
            "Loaded table '{}': {} rows, {} columns",
            table_name,
            table.len(),
            table.columns.len()
        );
        Ok(table)
    }

    /// RFC 4180 compliant CSV field parsing
    fn parse_csv_fields(&self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current_field = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                c if c == self.config.csv_quote => {
                    if in_quotes {
                        // Doubled quote is an escaped quote
                        if chars.peek() == Some(&self.config.csv_quote) {
                            current_field.push(self.config.csv_quote);
                            chars.next();
                        } else {
                            in_quotes = false;
                        }
                    } else {
                        in_quotes = true;
                    }
                }
                c if c == self.config.csv_delimiter && !in_quotes => {
                    fields.push(current_field.trim().to_string());
                    current_field.clear();
                }
                c => {
                    current_field.push(c);
                }
            }
        }

        fields.push(current_field.trim().to_string());
        fields
    }
}

/// Infer a typed field value from raw CSV text.
///
/// Integer parsing runs before boolean detection so identifier-like cells
/// ("1", "0") stay integers; only the word forms count as booleans.
pub fn infer_field_value(value: &str) -> FieldValue {
    if value.is_empty() {
        return FieldValue::Null;
    }

    if let Ok(i) = value.parse::<i64>() {
        return FieldValue::Integer(i);
    }

    if let Ok(f) = value.parse::<f64>() {
        return FieldValue::Float(f);
    }

    // ISO 8601 datetime, with or without fractional seconds
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, fmt) {
            return FieldValue::Timestamp(ts);
        }
    }

    // ISO 8601 date
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return FieldValue::Date(d);
    }

    match value.to_lowercase().as_str() {
        "true" | "yes" => FieldValue::Boolean(true),
        "false" | "no" => FieldValue::Boolean(false),
        _ => FieldValue::String(value.to_string()),
    }
}

/// Map a JSON scalar onto the value model.
fn json_to_field_value(value: &serde_json::Value) -> FieldValue {
    match value {
        serde_json::Value::Null => FieldValue::Null,
        serde_json::Value::Bool(b) => FieldValue::Boolean(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else {
                FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        // Strings go through the same inference as CSV cells so date
        // columns come out typed either way
        serde_json::Value::String(s) => infer_field_value(s),
        other => FieldValue::String(other.to_string()),
    }
}
