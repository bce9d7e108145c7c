//! Sprout CLI - browse the plant catalog and keep track of watering
//!
//! Every command goes through `sprout-core`, the same way the app screens do.

mod cli;
mod commands;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::adopt::run_adopt;
use crate::commands::catalog::run_catalog;
use crate::commands::common::{resolve_config, ConfigOverrides};
use crate::commands::environments::run_environments;
use crate::commands::garden::run_garden;
use crate::commands::remove::run_remove;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sprout=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&ConfigOverrides {
        db_path: cli.db_path,
        api_url: cli.api_url,
        locale: cli.locale,
    })?;

    match cli.command {
        Commands::Environments { json } => run_environments(&config, json).await?,
        Commands::Catalog {
            environment,
            pages,
            json,
        } => run_catalog(&config, environment.as_deref(), pages, json).await?,
        Commands::Adopt { id, at } => run_adopt(&config, &id, &at).await?,
        Commands::Garden { json } => run_garden(&config, json)?,
        Commands::Remove { id, yes } => run_remove(&config, &id, yes)?,
    }

    Ok(())
}
