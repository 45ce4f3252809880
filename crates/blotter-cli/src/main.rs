//! Blotter CLI - crime-report dataset profiling and provisioning.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let result = match cli.command {
        Commands::Profile { file, json, output } => commands::profile::run(file, json, output),

        Commands::Plan { file, output, plan } => commands::plan::run(file, output, plan),

        Commands::Provision {
            file,
            connection,
            plan,
            skip_load,
        } => commands::provision::run(file, connection, plan, skip_load).await,

        Commands::Verify { connection, plan } => commands::verify::run(connection, plan).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
