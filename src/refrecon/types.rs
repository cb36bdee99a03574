//! Core tabular data types.
//!
//! This module contains the fundamental data types used throughout the
//! reconciliation engine:
//! - [`FieldValue`] - The dynamic value type for record fields
//! - [`Record`] - A single row of named fields
//! - [`Table`] - A named record set with a stable column order

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::fmt;

/// A value in a record field.
///
/// This enum represents every data type the reconciliation engine works
/// with. Values arrive from the file datasource via type inference and are
/// refined by the normalizer (e.g. free-text reward descriptions become
/// floats, timestamp strings become timezone-naive timestamps).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Boolean value (true/false)
    Boolean(bool),
    /// Missing or undefined value
    Null,
    /// Date type (YYYY-MM-DD)
    Date(NaiveDate),
    /// Timezone-naive timestamp (YYYY-MM-DD HH:MM:SS[.nnn])
    Timestamp(NaiveDateTime),
}

impl FieldValue {
    /// Returns true for [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Name of the value's type, used by the column profiler and in error
    /// messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "string",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Null => "null",
            FieldValue::Date(_) => "date",
            FieldValue::Timestamp(_) => "timestamp",
        }
    }

    /// Canonical text form used for delimited output and distinct counting.
    ///
    /// Null becomes the empty string; booleans are lowercase; timestamps
    /// render as `YYYY-MM-DD HH:MM:SS` without a zone suffix.
    pub fn to_output_string(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "NULL"),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::Timestamp(t) => write!(f, "{}", t),
        }
    }
}

/// A single row: named fields mapped to dynamic values.
///
/// Fields not present in the map are treated as [`FieldValue::Null`] by
/// [`Record::field`], which keeps left-join results uniform without
/// materializing a null for every unmatched column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// The field data for this record
    pub fields: HashMap<String, FieldValue>,
}

impl Record {
    /// Create a record from prebuilt field data.
    pub fn new(fields: HashMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    /// Look up a field, treating absence as null.
    pub fn field(&self, name: &str) -> &FieldValue {
        self.fields.get(name).unwrap_or(&FieldValue::Null)
    }

    /// Insert or replace a field value.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }
}

/// A named record set with a stable column order.
///
/// The column list drives header emission in the file writer and the
/// column iteration order of the profiler; rows may carry a subset of the
/// listed columns (missing cells read as null).
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Source or output name (e.g. the file stem it was loaded from)
    pub name: String,
    /// Column names in declaration order
    pub columns: Vec<String>,
    /// Row data
    pub rows: Vec<Record>,
}

impl Table {
    /// Create an empty table with the given column order.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when the column list contains `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Append a column to the declared order if not already present.
    pub fn add_column(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.has_column(&name) {
            self.columns.push(name);
        }
    }
}
