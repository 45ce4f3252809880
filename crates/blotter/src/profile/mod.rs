//! Column profiling: distinct-value sets, cardinality, and value lengths.

mod profiler;
mod report;

pub use profiler::{
    Profiler, distinct_counts, distinct_values, distinct_values_by_name, max_value_length,
    max_value_lengths, profile_columns,
};
pub use report::{ColumnProfile, TableProfile};
