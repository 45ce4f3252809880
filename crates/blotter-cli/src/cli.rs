//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Blotter: crime-report dataset profiling and provisioning
#[derive(Parser)]
#[command(name = "blotter")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a data file: per-column distinct counts and max value lengths
    Profile {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the provisioning SQL script
    Plan {
        /// Derive column types from this file instead of the built-in
        /// crime-report table definition
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Write the script to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        plan: PlanArgs,
    },

    /// Provision the database and bulk-load the dataset
    Provision {
        /// Path to the dataset CSV to load
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        connection: ConnectionArgs,

        #[command(flatten)]
        plan: PlanArgs,

        /// Provision only; skip the bulk load
        #[arg(long)]
        skip_load: bool,
    },

    /// Run the verification queries against a provisioned database
    Verify {
        #[command(flatten)]
        connection: ConnectionArgs,

        #[command(flatten)]
        plan: PlanArgs,
    },
}

/// Names and credentials shaping the provisioning plan.
#[derive(Args)]
pub struct PlanArgs {
    /// Target database name
    #[arg(long, default_value = "crime_db")]
    pub database: String,

    /// Schema holding the dataset table
    #[arg(long, default_value = "crimes")]
    pub schema: String,

    /// Dataset table name
    #[arg(long, default_value = "boston_crimes")]
    pub table: String,

    /// Derive column types from the data file (Plan/Provision with FILE)
    #[arg(long)]
    pub infer: bool,

    /// Password for the read-only analyst user
    /// (or BLOTTER_ANALYST_PASSWORD)
    #[arg(long)]
    pub analyst_password: Option<String>,

    /// Password for the read-write scientist user
    /// (or BLOTTER_SCIENTIST_PASSWORD)
    #[arg(long)]
    pub scientist_password: Option<String>,
}

/// PostgreSQL connection settings.
#[derive(Args)]
pub struct ConnectionArgs {
    /// Connection URL for the maintenance database
    /// (or BLOTTER_DATABASE_URL)
    #[arg(long)]
    pub url: Option<String>,
}

impl ConnectionArgs {
    /// Resolve the connection URL from the flag or the environment.
    pub fn resolve_url(&self) -> Result<String, String> {
        self.url
            .clone()
            .or_else(|| std::env::var("BLOTTER_DATABASE_URL").ok())
            .ok_or_else(|| {
                "No connection URL: pass --url or set BLOTTER_DATABASE_URL".to_string()
            })
    }
}

impl PlanArgs {
    /// Analyst password from the flag or the environment.
    pub fn resolve_analyst_password(&self) -> Option<String> {
        self.analyst_password
            .clone()
            .or_else(|| std::env::var("BLOTTER_ANALYST_PASSWORD").ok())
    }

    /// Scientist password from the flag or the environment.
    pub fn resolve_scientist_password(&self) -> Option<String> {
        self.scientist_password
            .clone()
            .or_else(|| std::env::var("BLOTTER_SCIENTIST_PASSWORD").ok())
    }
}
