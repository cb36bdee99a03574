//! Column profiling.
//!
//! Independent data-quality pass over the raw input tables: for every
//! column it reports the observed value type, the null count, and the
//! distinct non-null count. The profile feeds monitoring, not eligibility
//! decisions; it runs against the tables as loaded, before any
//! normalization.

use crate::refrecon::types::{FieldValue, Record, Table};
use std::collections::HashSet;

/// Output name of the profile table.
pub const PROFILE_TABLE_NAME: &str = "profiling_report";

/// Profile columns, in output order.
pub const PROFILE_COLUMNS: [&str; 5] =
    ["table", "column", "dtype", "null_count", "distinct_count"];

/// Profile of a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub table: String,
    pub column: String,
    pub dtype: String,
    pub null_count: usize,
    pub distinct_count: usize,
}

/// Profile one column of one table.
fn profile_column(table: &Table, column: &str) -> ColumnProfile {
    let mut null_count = 0usize;
    let mut dtype: Option<&'static str> = None;
    let mut mixed = false;
    let mut distinct: HashSet<String> = HashSet::new();

    for row in &table.rows {
        let value = row.field(column);
        if value.is_null() {
            null_count += 1;
            continue;
        }
        match dtype {
            None => dtype = Some(value.type_name()),
            Some(seen) if seen != value.type_name() => mixed = true,
            Some(_) => {}
        }
        distinct.insert(format!("{}:{}", value.type_name(), value.to_output_string()));
    }

    let dtype = if mixed {
        "mixed".to_string()
    } else {
        dtype.unwrap_or("null").to_string()
    };

    ColumnProfile {
        table: table.name.clone(),
        column: column.to_string(),
        dtype,
        null_count,
        distinct_count: distinct.len(),
    }
}

/// Profile every column of every given table, in declaration order.
pub fn profile_tables(tables: &[&Table]) -> Table {
    let mut profile = Table::new(
        PROFILE_TABLE_NAME,
        PROFILE_COLUMNS.iter().map(|c| c.to_string()).collect(),
    );

    for table in tables {
        for column in &table.columns {
            let entry = profile_column(table, column);
            let mut row = Record::default();
            row.set("table", FieldValue::String(entry.table));
            row.set("column", FieldValue::String(entry.column));
            row.set("dtype", FieldValue::String(entry.dtype));
            row.set("null_count", FieldValue::Integer(entry.null_count as i64));
            row.set(
                "distinct_count",
                FieldValue::Integer(entry.distinct_count as i64),
            );
            profile.rows.push(row);
        }
        log::debug!(
            "Profiled table '{}': {} column(s)",
            table.name,
            table.columns.len()
        );
    }

    profile
}
