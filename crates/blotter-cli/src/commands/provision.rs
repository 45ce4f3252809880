//! Provision command - create the database objects and bulk-load the data.

use std::path::PathBuf;

use blotter::Provisioner;
use colored::Colorize;

use super::build_plan;
use crate::cli::{ConnectionArgs, PlanArgs};

pub async fn run(
    file: PathBuf,
    connection: ConnectionArgs,
    args: PlanArgs,
    skip_load: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let url = connection.resolve_url()?;
    let plan = build_plan(Some(file.as_path()), &args)?;

    println!(
        "{} {} ({} roles, {} users)",
        "Provisioning".cyan().bold(),
        plan.qualified_table().white(),
        plan.roles.len(),
        plan.users.len()
    );

    let provisioner = Provisioner::connect(&url).await?;
    provisioner.provision(&plan).await?;

    println!(
        "{} database {} provisioned",
        "Done:".green().bold(),
        plan.database.white()
    );

    if skip_load {
        println!("Skipping bulk load (--skip-load)");
        return Ok(());
    }

    let rows = provisioner.load_csv(&plan, &file).await?;
    println!(
        "{} {} rows into {}",
        "Loaded".green().bold(),
        rows.to_string().white().bold(),
        plan.qualified_table().white()
    );

    println!();
    println!(
        "Run {} to check the result",
        "blotter verify".cyan().bold()
    );

    Ok(())
}
