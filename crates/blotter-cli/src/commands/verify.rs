//! Verify command - run the verification queries and show the results.

use blotter::Provisioner;
use colored::Colorize;

use super::build_plan;
use crate::cli::{ConnectionArgs, PlanArgs};

pub async fn run(
    connection: ConnectionArgs,
    args: PlanArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = connection.resolve_url()?;
    let plan = build_plan(None, &args)?;

    println!(
        "{} {}",
        "Verifying".cyan().bold(),
        plan.qualified_table().white()
    );

    let provisioner = Provisioner::connect(&url).await?;
    let report = provisioner.verify(&plan).await?;

    println!();
    println!(
        "Row count: {}",
        report.row_count.to_string().white().bold()
    );

    if !report.sample_rows.is_empty() {
        println!();
        println!("{}", "First rows:".yellow().bold());
        println!("  {}", plan.table.column_names().join(", "));
        for row in &report.sample_rows {
            println!("  {}", row.join(", "));
        }
    }

    println!();
    println!("{}", "Privileges:".yellow().bold());
    for role in &plan.roles {
        let privileges = report.privileges_for(&role.name);
        let rendered = if privileges.is_empty() {
            "none".red().to_string()
        } else {
            privileges.join(", ")
        };
        println!("  {:12} {}", role.name, rendered);
    }

    Ok(())
}
