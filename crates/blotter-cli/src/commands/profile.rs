//! Profile command - per-column distinct counts and max value lengths.

use std::path::PathBuf;

use blotter::{Profiler, TypePlanner};
use colored::Colorize;

pub fn run(
    file: PathBuf,
    json: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Profiling".cyan().bold(),
        file.display().to_string().white()
    );

    let profile = Profiler::new().profile_file(&file)?;

    if json {
        match output {
            Some(path) => {
                profile.save(&path)?;
                println!(
                    "{} {}",
                    "Saved to".green().bold(),
                    path.display().to_string().white()
                );
            }
            None => println!("{}", profile.to_json()?),
        }
        return Ok(());
    }

    let planner = TypePlanner::new();
    let plans = planner.plan_table(&profile);

    println!();
    println!(
        "  {:20} {:>10} {:>12}  {}",
        "column".yellow().bold(),
        "distinct".yellow().bold(),
        "max length".yellow().bold(),
        "suggested type".yellow().bold()
    );
    for (column, plan) in profile.columns.iter().zip(&plans) {
        let max_length = column
            .max_length
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:20} {:>10} {:>12}  {}",
            column.name,
            column.distinct_count.to_string().white().bold(),
            max_length,
            plan.sql_type.to_string().cyan()
        );
    }

    println!();
    println!(
        "{} rows, {} columns",
        profile.source.row_count.to_string().white().bold(),
        profile.source.column_count.to_string().white().bold()
    );

    Ok(())
}
