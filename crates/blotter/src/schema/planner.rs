//! Column type planning from profiles.
//!
//! Maps each column's distinct-value set onto the narrowest PostgreSQL type
//! that covers every observed value. The plan is a recommendation feeding
//! table creation; the caller decides whether to widen it (a human may
//! round a varchar up, for instance).

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::SqlType;
use crate::profile::{ColumnProfile, TableProfile};

/// ISO calendar date, e.g. `2018-09-02`.
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Plain decimal number with a fractional part, e.g. `-71.13937053`.
static DECIMAL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+\.\d+$").unwrap());

/// The planned definition for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Column name.
    pub name: String,
    /// Recommended type.
    pub sql_type: SqlType,
    /// True when no empty field was observed in the column.
    pub not_null: bool,
    /// True when every data row holds a distinct value.
    pub unique: bool,
    /// Observed values, present when the column is an enumerated-type
    /// candidate (declaration order = first-observed order).
    pub enum_values: Option<Vec<String>>,
}

/// Plans PostgreSQL column types from column profiles.
pub struct TypePlanner {
    /// Maximum distinct values for an enumerated-type candidate.
    enum_threshold: usize,
}

impl TypePlanner {
    /// Create a planner with the default enumerated-type threshold.
    pub fn new() -> Self {
        Self { enum_threshold: 20 }
    }

    /// Create a planner with a custom enumerated-type threshold.
    pub fn with_enum_threshold(enum_threshold: usize) -> Self {
        Self { enum_threshold }
    }

    /// Plan every column of a profiled table, in header order.
    pub fn plan_table(&self, profile: &TableProfile) -> Vec<ColumnPlan> {
        profile
            .columns
            .iter()
            .map(|column| self.plan_column(column, profile.row_count()))
            .collect()
    }

    /// Plan a single column.
    pub fn plan_column(&self, profile: &ColumnProfile, row_count: usize) -> ColumnPlan {
        let non_empty: Vec<&str> = profile
            .values
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| v.as_str())
            .collect();

        let sql_type = self.fit_type(profile, &non_empty);
        let enum_values = match &sql_type {
            SqlType::Enum { .. } => Some(non_empty.iter().map(|v| v.to_string()).collect()),
            _ => None,
        };

        ColumnPlan {
            name: profile.name.clone(),
            sql_type,
            not_null: !profile.has_empty && !non_empty.is_empty(),
            unique: profile.is_unique(row_count),
            enum_values,
        }
    }

    /// Find the narrowest type covering every non-empty value.
    fn fit_type(&self, profile: &ColumnProfile, values: &[&str]) -> SqlType {
        if values.is_empty() {
            return SqlType::VarChar {
                length: profile.max_length.unwrap_or(0).max(1),
            };
        }

        if values
            .iter()
            .all(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "false"))
        {
            return SqlType::Boolean;
        }

        if let Some(fit) = integer_fit(values) {
            return fit;
        }

        if let Some(fit) = decimal_fit(values) {
            return fit;
        }

        if values.iter().all(|v| is_date(v)) {
            return SqlType::Date;
        }

        if values.len() <= self.enum_threshold {
            return SqlType::Enum {
                type_name: enum_type_name(&profile.name),
            };
        }

        SqlType::VarChar {
            length: profile.max_length.unwrap_or(0).max(1),
        }
    }
}

impl Default for TypePlanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive an enumerated-type name from a column name.
pub fn enum_type_name(column: &str) -> String {
    format!("{column}_enum")
}

/// The smallest integer type covering all values, if they all parse.
fn integer_fit(values: &[&str]) -> Option<SqlType> {
    let mut min = i64::MAX;
    let mut max = i64::MIN;

    for v in values {
        let n = v.parse::<i64>().ok()?;
        min = min.min(n);
        max = max.max(n);
    }

    if min >= i64::from(i16::MIN) && max <= i64::from(i16::MAX) {
        Some(SqlType::SmallInt)
    } else if min >= i64::from(i32::MIN) && max <= i64::from(i32::MAX) {
        Some(SqlType::Integer)
    } else {
        Some(SqlType::BigInt)
    }
}

/// A decimal type sized to the observed digit counts, if every value is a
/// plain decimal number with a fractional part.
fn decimal_fit(values: &[&str]) -> Option<SqlType> {
    let mut integer_digits = 0u32;
    let mut fraction_digits = 0u32;

    for v in values {
        if !DECIMAL_PATTERN.is_match(v) {
            return None;
        }
        let (int_part, frac_part) = v.split_once('.')?;
        integer_digits = integer_digits.max(int_part.trim_start_matches('-').len() as u32);
        fraction_digits = fraction_digits.max(frac_part.len() as u32);
    }

    Some(SqlType::Decimal {
        precision: integer_digits + fraction_digits,
        scale: fraction_digits,
    })
}

/// Whether a value is a valid ISO calendar date.
fn is_date(value: &str) -> bool {
    DATE_PATTERN.is_match(value)
        && chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
