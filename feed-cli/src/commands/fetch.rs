//! Refresh the feed from the remote endpoint.

use anyhow::{Context, Result};
use feed_client::{display_title, CacheStore, FeedConfig, FeedReader, PostSource, SqliteCache, WpSource};
use feed_core::Snapshot;
use std::path::Path;

use crate::config::{self, CliConfig};

/// Run the fetch command.
pub async fn run(data_dir: &Path, settings: &CliConfig, pages: u32) -> Result<()> {
    let source = WpSource::new(&settings.base_url).context("Failed to create HTTP client")?;
    let cache = SqliteCache::open(&config::cache_path(data_dir))
        .await
        .context("Failed to open post cache")?;
    let reader = FeedReader::new(
        FeedConfig::new().with_per_page(settings.per_page),
        source,
        cache,
    );

    println!("Fetching from {}...", settings.base_url);
    let (snapshot, error) = drive(&reader, pages).await;

    if let Some(message) = &error {
        eprintln!("Fetch problem: {}", message);
    }
    if snapshot.is_empty() {
        if let Some(message) = error {
            anyhow::bail!("no posts fetched: {}", message);
        }
        println!("The feed is empty.");
        return Ok(());
    }

    println!("Cached {} post(s):", snapshot.len());
    println!();
    for post in &snapshot {
        println!("  [{}] {}", post.id, display_title(post));
    }
    Ok(())
}

/// Refresh, then keep loading until `pages` pages have been requested.
///
/// Failures do not abort the run; whatever loaded stays loaded and the
/// published error message is returned alongside the final snapshot.
async fn drive<S: PostSource, C: CacheStore>(
    reader: &FeedReader<S, C>,
    pages: u32,
) -> (Snapshot, Option<String>) {
    reader.refresh().await;
    for _ in 1..pages {
        reader.load_more().await;
    }
    let error = reader.watch_error().borrow().clone();
    (reader.snapshot(), error)
}
