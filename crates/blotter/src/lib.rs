//! Blotter: profile a crime-report dataset and provision a PostgreSQL
//! database for it.
//!
//! Blotter reads a delimited incident-report file, computes per-column
//! profiles (distinct-value counts and maximum value lengths) to support
//! choosing explicit column types, and renders/executes the provisioning
//! sequence for the dataset: database, schema, enumerated type, table,
//! bulk load, privilege groups, and users.
//!
//! # Core Principles
//!
//! - **Literal text**: profiles are computed over the raw field text, never
//!   a parsed or typed value.
//! - **Pure planning**: profiling and SQL rendering have no side effects;
//!   only the [`provision::Provisioner`] talks to a server.
//! - **One shot**: every operation runs at most once and any failure halts
//!   the run. There are no retries.
//!
//! # Example
//!
//! ```no_run
//! use blotter::{Profiler, ProvisioningPlan};
//!
//! let profiler = Profiler::new();
//! let profile = profiler.profile_file("boston.csv").unwrap();
//!
//! for column in &profile.columns {
//!     println!("{}: {} distinct", column.name, column.distinct_count);
//! }
//!
//! let plan = ProvisioningPlan::crime_reports();
//! println!("{}", plan.script());
//! ```

pub mod error;
pub mod input;
pub mod profile;
pub mod provision;
pub mod schema;

pub use error::{BlotterError, Result};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use profile::{
    ColumnProfile, Profiler, TableProfile, distinct_counts, distinct_values,
    distinct_values_by_name, max_value_length, max_value_lengths, profile_columns,
};
pub use provision::{
    GrantRecord, Phase, Privilege, Provisioner, ProvisioningPlan, RoleSpec, Statement, UserSpec,
    VerificationReport,
};
pub use schema::{ColumnPlan, ColumnSpec, EnumTypeSpec, SqlType, TableSpec, TypePlanner};
