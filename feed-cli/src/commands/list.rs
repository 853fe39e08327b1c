//! Page through cached posts without touching the network.

use anyhow::{Context, Result};
use feed_client::{display_preview, display_title, CacheStore, SqliteCache};
use feed_types::{PostId, ScanCursor};
use std::path::Path;

use crate::config;

/// How much of the post body the listing shows per row.
const PREVIEW_WIDTH: usize = 72;

/// Run the list command.
pub async fn run(data_dir: &Path, after: Option<u64>, limit: u32) -> Result<()> {
    let cache = SqliteCache::open(&config::cache_path(data_dir))
        .await
        .context("Failed to open post cache")?;

    let cursor = after.map(|id| ScanCursor::after(PostId::new(id)));
    let page = cache.read_page_after(cursor, limit).await?;

    if page.posts.is_empty() {
        if after.is_some() {
            println!("No more cached posts.");
        } else {
            println!("Nothing cached yet. Run 'feed-cli fetch' first.");
        }
        return Ok(());
    }

    for post in &page.posts {
        println!("[{}] {}", post.id, display_title(post));
        println!("       {}", clip(&display_preview(post), PREVIEW_WIDTH));
    }

    if let Some(next) = page.next {
        println!();
        println!("Next: feed-cli list --after {}", next.last_seen());
    }
    Ok(())
}

/// Cut `text` down to at most `max` characters, marking the cut.
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max).collect();
    format!("{}...", clipped.trim_end())
}
