//! Plan command - render the provisioning SQL script.

use std::path::PathBuf;

use colored::Colorize;

use super::build_plan;
use crate::cli::PlanArgs;

pub fn run(
    file: Option<PathBuf>,
    output: Option<PathBuf>,
    args: PlanArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(ref f) = file {
        if !f.exists() {
            return Err(format!("File not found: {}", f.display()).into());
        }
    }

    let plan = build_plan(file.as_deref(), &args)?;
    let script = plan.script();

    match output {
        Some(path) => {
            std::fs::write(&path, script)?;
            println!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
        None => print!("{script}"),
    }

    Ok(())
}
