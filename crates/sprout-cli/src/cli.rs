use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sprout")]
#[command(about = "Adopt plants and get reminded to water them")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the local plant database
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Plant catalog API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Message language (en, pt)
    #[arg(long, global = true, value_name = "CODE")]
    pub locale: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the environments plants can be filtered by
    Environments {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse the plant catalog
    Catalog {
        /// Only show plants for this environment key
        #[arg(short, long, value_name = "KEY")]
        environment: Option<String>,
        /// Number of catalog pages to load
        #[arg(short, long, default_value = "1")]
        pages: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Adopt a catalog plant and schedule its watering reminder
    Adopt {
        /// Catalog plant ID
        id: String,
        /// Reminder time: HH:MM today, or an RFC 3339 timestamp
        #[arg(long, value_name = "TIME")]
        at: String,
    },
    /// Show your plants and the next watering
    #[command(alias = "mine")]
    Garden {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove one of your plants
    Remove {
        /// Owned plant ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
