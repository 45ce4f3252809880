//! Concrete PostgreSQL column types and table definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A concrete PostgreSQL column type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SqlType {
    /// 2-byte integer.
    SmallInt,
    /// 4-byte integer.
    Integer,
    /// 8-byte integer.
    BigInt,
    /// Exact numeric with fixed precision and scale.
    Decimal { precision: u32, scale: u32 },
    /// Boolean.
    Boolean,
    /// Calendar date without time.
    Date,
    /// Bounded variable-length text.
    VarChar { length: usize },
    /// Unbounded text.
    Text,
    /// A named enumerated type, created separately with `CREATE TYPE`.
    Enum { type_name: String },
}

impl SqlType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SqlType::SmallInt | SqlType::Integer | SqlType::BigInt | SqlType::Decimal { .. }
        )
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::SmallInt => write!(f, "smallint"),
            SqlType::Integer => write!(f, "integer"),
            SqlType::BigInt => write!(f, "bigint"),
            SqlType::Decimal { precision, scale } => write!(f, "decimal({precision},{scale})"),
            SqlType::Boolean => write!(f, "boolean"),
            SqlType::Date => write!(f, "date"),
            SqlType::VarChar { length } => write!(f, "varchar({length})"),
            SqlType::Text => write!(f, "text"),
            SqlType::Enum { type_name } => write!(f, "{type_name}"),
        }
    }
}

/// A named enumerated type with its allowed values, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumTypeSpec {
    /// Type name, e.g. `weekday`.
    pub name: String,
    /// Allowed values in declaration order.
    pub values: Vec<String>,
}

impl EnumTypeSpec {
    /// Create an enum type spec.
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Definition of a single table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Explicit column type.
    pub sql_type: SqlType,
    /// Whether the column carries a NOT NULL constraint.
    pub not_null: bool,
    /// Whether the column is the table's primary key.
    pub primary_key: bool,
}

impl ColumnSpec {
    /// Create a plain column.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            not_null: false,
            primary_key: false,
        }
    }

    /// Mark this column as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark this column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }
}

/// Definition of a table inside a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Table name (unqualified).
    pub name: String,
    /// Column definitions, in order.
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    /// Create a table spec.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
