//! Distinct-value and value-length profiling over parsed tables.
//!
//! All profiles are computed in a single pass that tabulates every header
//! column's distinct-value set simultaneously. Each operation is a pure
//! function of the table contents: profiling the same data twice yields
//! identical results, and nothing is cached between calls.

use std::path::Path;

use indexmap::IndexSet;

use super::report::{ColumnProfile, TableProfile};
use crate::error::{BlotterError, Result};
use crate::input::{DataTable, Parser, ParserConfig};

/// Profiles delimited files from disk.
///
/// The in-memory functions ([`distinct_values`], [`profile_columns`], ...)
/// are the primary API; this type bundles them with a configured [`Parser`]
/// for one-shot use against a file path.
pub struct Profiler {
    parser: Parser,
}

impl Profiler {
    /// Create a profiler with default parser configuration.
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Create a profiler with custom parser configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            parser: Parser::with_config(config),
        }
    }

    /// Read `path` and return the distinct values in one column.
    pub fn distinct_values_in_file(
        &self,
        path: impl AsRef<Path>,
        column: usize,
    ) -> Result<IndexSet<String>> {
        let (table, _) = self.parser.parse_file(path)?;
        distinct_values(&table, column)
    }

    /// Read `path` and profile every header column.
    pub fn profile_file(&self, path: impl AsRef<Path>) -> Result<TableProfile> {
        let (table, source) = self.parser.parse_file(path)?;
        let columns = profile_columns(&table)?;
        Ok(TableProfile { source, columns })
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Return the set of unique string values at `column` across all data rows.
///
/// Fails with [`BlotterError::ColumnOutOfRange`] if `column` is not covered
/// by the header or by every data row. A table with zero data rows yields
/// the empty set.
pub fn distinct_values(table: &DataTable, column: usize) -> Result<IndexSet<String>> {
    if column >= table.column_count() {
        return Err(BlotterError::ColumnOutOfRange {
            column,
            width: table.column_count(),
            row: 0,
        });
    }

    let mut values = IndexSet::new();
    for (idx, row) in table.rows.iter().enumerate() {
        let value = row.get(column).ok_or(BlotterError::ColumnOutOfRange {
            column,
            width: row.len(),
            row: idx + 1,
        })?;
        values.insert(value.clone());
    }

    Ok(values)
}

/// Distinct values for a named header column.
pub fn distinct_values_by_name(table: &DataTable, name: &str) -> Result<IndexSet<String>> {
    let column = table
        .column_index(name)
        .ok_or_else(|| BlotterError::UnknownColumn(name.to_string()))?;
    distinct_values(table, column)
}

/// Profile every header column in a single pass over the rows.
///
/// Fails with [`BlotterError::ColumnOutOfRange`] at the first row narrower
/// than the header. Fields beyond the header width are ignored.
pub fn profile_columns(table: &DataTable) -> Result<Vec<ColumnProfile>> {
    let width = table.column_count();
    let mut sets: Vec<IndexSet<String>> = vec![IndexSet::new(); width];

    for (idx, row) in table.rows.iter().enumerate() {
        if row.len() < width {
            return Err(BlotterError::ColumnOutOfRange {
                column: row.len(),
                width: row.len(),
                row: idx + 1,
            });
        }
        for (set, value) in sets.iter_mut().zip(row.iter()) {
            set.insert(value.clone());
        }
    }

    Ok(sets
        .into_iter()
        .enumerate()
        .map(|(position, values)| {
            ColumnProfile::from_values(table.headers[position].clone(), position, values)
        })
        .collect())
}

/// Per column, in header order: the cardinality of its distinct-value set.
pub fn distinct_counts(table: &DataTable) -> Result<Vec<(String, usize)>> {
    Ok(profile_columns(table)?
        .into_iter()
        .map(|p| (p.name, p.distinct_count))
        .collect())
}

/// The maximum character length among the distinct values of one column.
///
/// An empty value set is an error, not zero.
pub fn max_value_length(table: &DataTable, column: usize) -> Result<usize> {
    let values = distinct_values(table, column)?;
    values
        .iter()
        .map(|v| v.chars().count())
        .max()
        .ok_or_else(|| BlotterError::EmptyColumn(table.headers[column].clone()))
}

/// Per column, in header order: the maximum character length among its
/// distinct values. Fails on a table with no data rows.
pub fn max_value_lengths(table: &DataTable) -> Result<Vec<(String, usize)>> {
    profile_columns(table)?
        .into_iter()
        .map(|p| match p.max_length {
            Some(len) => Ok((p.name, len)),
            None => Err(BlotterError::EmptyColumn(p.name)),
        })
        .collect()
}
