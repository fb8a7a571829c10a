//! SiteDeck CLI - demo data and storage maintenance.
//!
//! # Usage
//!
//! ```bash
//! # Write demo data for every collection that is still empty
//! sitedeck-cli seed
//!
//! # Overwrite existing collections with demo data
//! sitedeck-cli seed --force
//!
//! # Report keys whose stored JSON no longer parses
//! sitedeck-cli check
//!
//! # Copy one key's JSON to a file
//! sitedeck-cli export products products.json
//!
//! # Delete one key, or every known key
//! sitedeck-cli reset sales
//! sitedeck-cli reset
//! ```
//!
//! All commands operate on the file store in `--data-dir`
//! (`SITEDECK_DATA_DIR`, default `./data`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sitedeck_admin::db::Store;

mod commands;

#[derive(Parser)]
#[command(name = "sitedeck-cli")]
#[command(author, version, about = "SiteDeck CLI tools")]
struct Cli {
    /// Directory holding the JSON files
    #[arg(long, env = "SITEDECK_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write demo data for every collection
    Seed {
        /// Replace collections that already have data
        #[arg(short, long)]
        force: bool,
    },
    /// Load every known key and report malformed JSON
    Check,
    /// Write one key's JSON to a file
    Export {
        /// Storage key, e.g. `products` or `globalStyles`
        key: String,
        /// Destination file
        file: PathBuf,
    },
    /// Delete one key, or all known keys when none is given
    Reset {
        /// Storage key to delete
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(&cli.data_dir).await?;
    let store = Store::file(&cli.data_dir);

    match cli.command {
        Commands::Seed { force } => commands::seed::run(&store, force).await?,
        Commands::Check => {
            let problems = commands::storage::check(&store).await?;
            if problems > 0 {
                return Err(format!("{problems} key(s) failed to load").into());
            }
        }
        Commands::Export { key, file } => commands::storage::export(&store, &key, &file).await?,
        Commands::Reset { key } => {
            commands::storage::reset(&store, key.as_deref()).await?;
        }
    }
    Ok(())
}
