//! Table schema: concrete PostgreSQL column types and type planning.

mod planner;
mod types;

pub use planner::{ColumnPlan, TypePlanner};
pub use types::{ColumnSpec, EnumTypeSpec, SqlType, TableSpec};
