//! # feed-cli
//!
//! CLI for fetching and browsing a WordPress post feed offline.
//!
//! ## Commands
//!
//! - `fetch`: Refresh the feed from the remote endpoint
//! - `list`: Page through cached posts without the network
//! - `show`: Print one cached post in full
//! - `status`: Show endpoint and cache details
//!
//! ## Example
//!
//! ```bash
//! # Fetch the first three pages into the local cache
//! feed-cli fetch --pages 3
//!
//! # Browse the cache, no network needed
//! feed-cli list
//! feed-cli list --after 4242
//!
//! # Read one post
//! feed-cli show 4242
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{fetch, list, show, status};

/// CLI for fetching and browsing a WordPress post feed offline.
#[derive(Parser, Debug)]
#[command(name = "feed-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Data directory for the post cache and CLI settings
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the WordPress API root (persisted for later runs)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Refresh the feed from the remote endpoint
    Fetch {
        /// Number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,
    },

    /// Page through cached posts without touching the network
    List {
        /// Only list posts with an id greater than this
        #[arg(long)]
        after: Option<u64>,

        /// Maximum number of posts to list
        #[arg(long, default_value = "10")]
        limit: u32,
    },

    /// Print one cached post in full
    Show {
        /// Post id
        id: u64,
    },

    /// Show endpoint and cache details
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    // Determine data directory
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir)
        .await
        .context("Failed to create data directory")?;

    let mut settings = config::CliConfig::load_or_default(&data_dir).await?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url.trim_end_matches('/').to_string();
        settings.save(&data_dir).await?;
    }

    match cli.command {
        Commands::Fetch { pages } => {
            fetch::run(&data_dir, &settings, pages).await?;
        }
        Commands::List { after, limit } => {
            list::run(&data_dir, after, limit).await?;
        }
        Commands::Show { id } => {
            show::run(&data_dir, id).await?;
        }
        Commands::Status => {
            status::run(&data_dir, &settings).await?;
        }
    }

    Ok(())
}

/// Route diagnostics to stderr so command output stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Get the default data directory for feed-cli.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("rs", "feedsync", "feed-cli")
        .context("Could not determine home directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
