//! Show endpoint and cache details.

use anyhow::{Context, Result};
use feed_client::{CacheStore, SqliteCache};
use std::path::Path;

use crate::config::{self, CliConfig};

/// Run the status command.
pub async fn run(data_dir: &Path, settings: &CliConfig) -> Result<()> {
    println!("=== feed-cli status ===");
    println!();

    println!("Endpoint:");
    println!("  URL:      {}", settings.base_url);
    println!("  Per page: {}", settings.per_page);
    println!();

    let path = config::cache_path(data_dir);
    println!("Cache:");
    println!("  Path:  {}", path.display());

    let cache = SqliteCache::open(&path)
        .await
        .context("Failed to open post cache")?;
    let count = cache.count().await?;
    if count == 0 {
        println!("  Posts: none cached; run 'feed-cli fetch'");
    } else {
        println!("  Posts: {}", count);
    }

    Ok(())
}
