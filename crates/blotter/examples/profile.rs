//! Profile a data file and print the provisioning script derived from it.
//!
//! Usage: cargo run --example profile -- path/to/boston.csv

use blotter::{Profiler, ProvisioningPlan, TypePlanner};

fn main() {
    let path = std::env::args()
        .nth(1)
        .expect("usage: profile <data-file>");

    let profile = Profiler::new()
        .profile_file(&path)
        .expect("profiling failed");

    println!("{} rows, {} columns\n", profile.source.row_count, profile.source.column_count);
    for column in &profile.columns {
        println!(
            "{:20} {:>8} distinct, max length {:?}",
            column.name, column.distinct_count, column.max_length
        );
    }

    let plan = ProvisioningPlan::from_profile(
        "crime_db",
        "crimes",
        "boston_crimes",
        &profile,
        &TypePlanner::new(),
    );
    println!("\n{}", plan.script());
}
