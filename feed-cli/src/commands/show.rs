//! Print one cached post in full.

use anyhow::{Context, Result};
use feed_client::{display_title, CacheStore, SqliteCache, NO_CONTENT};
use feed_types::PostId;
use std::path::Path;

use crate::config;

/// Run the show command.
pub async fn run(data_dir: &Path, id: u64) -> Result<()> {
    let cache = SqliteCache::open(&config::cache_path(data_dir))
        .await
        .context("Failed to open post cache")?;

    let post = match cache.get(PostId::new(id)).await? {
        Some(post) => post,
        None => anyhow::bail!("post {} is not cached. Run 'feed-cli fetch' first.", id),
    };

    println!("{}", display_title(&post));
    if let Some(link) = &post.link {
        println!("{}", link);
    }
    if let Some(date) = &post.date {
        println!("Published: {}", date);
    }
    if let Some(modified) = &post.modified {
        println!("Modified:  {}", modified);
    }
    if let Some(status) = &post.status {
        println!("Status:    {}", status);
    }
    println!();
    // The body keeps its markup; a pager or browser renders it better
    // than a stripped-down plain text dump would read.
    println!("{}", post.content_html().unwrap_or(NO_CONTENT));
    Ok(())
}
