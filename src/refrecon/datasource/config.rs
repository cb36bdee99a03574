//! File Datasource Configuration

use serde::{Deserialize, Serialize};

/// Supported file formats for input tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FileFormat {
    /// CSV files with header row
    #[default]
    Csv,
    /// CSV files without header row (columns named by index)
    CsvNoHeader,
    /// JSON Lines format (newline-delimited JSON objects)
    JsonLines,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Csv => write!(f, "csv"),
            FileFormat::CsvNoHeader => write!(f, "csv_no_header"),
            FileFormat::JsonLines => write!(f, "jsonl"),
        }
    }
}

impl std::str::FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "csv_no_header" | "csvnoheader" => Ok(FileFormat::CsvNoHeader),
            "jsonl" | "jsonlines" | "json_lines" => Ok(FileFormat::JsonLines),
            _ => Err(format!("Unknown file format: {}", s)),
        }
    }
}

/// Configuration for loading one tabular record set from a file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSourceConfig {
    /// File format
    pub format: FileFormat,

    /// CSV delimiter character
    pub csv_delimiter: char,

    /// CSV quote character
    pub csv_quote: char,

    /// Skip first N lines before the header
    pub skip_lines: usize,

    /// Maximum number of records to read (None = unlimited)
    pub max_records: Option<usize>,
}

impl Default for FileSourceConfig {
    fn default() -> Self {
        Self {
            format: FileFormat::Csv,
            csv_delimiter: ',',
            csv_quote: '"',
            skip_lines: 0,
            max_records: None,
        }
    }
}

/// Configuration for writing a table as delimited text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSinkConfig {
    /// Field delimiter character
    pub delimiter: char,

    /// Quote character for fields containing the delimiter or newlines
    pub quote: char,

    /// Whether to emit the header row
    pub write_header: bool,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            write_header: true,
        }
    }
}
