//! # feed-client
//!
//! Offline-first client library for reading a WordPress post feed.
//!
//! This is the main library that applications use to load and page
//! through posts.
//!
//! ## Features
//!
//! - **Offline-First**: cached posts are published before the network answers
//! - **Superseded-Load Discard**: a refresh invalidates anything still in flight
//! - **Pluggable Seams**: remote source and cache are traits (WordPress/SQLite
//!   in production, mock/in-memory in tests)
//! - **Pure State Machine**: uses feed-core for side-effect-free load logic
//!
//! ## Example
//!
//! ```ignore
//! use feed_client::{FeedConfig, FeedReader, SqliteCache, WpSource, DEFAULT_BASE_URL};
//!
//! let source = WpSource::new(DEFAULT_BASE_URL)?;
//! let cache = SqliteCache::open(Path::new("posts.db")).await?;
//! let reader = FeedReader::new(FeedConfig::new(), source, cache);
//!
//! // Cached posts appear immediately, page 1 replaces them when it lands.
//! reader.refresh().await;
//!
//! // Append page 2 when the consumer scrolls to the bottom.
//! reader.load_more().await;
//!
//! let posts = reader.watch_posts();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod projection;
pub mod reader;
pub mod source;
pub mod store;

pub use projection::{display_preview, display_title, should_load_more, NO_CONTENT, NO_TITLE};
pub use reader::{FeedConfig, FeedReader, DEFAULT_PER_PAGE};
pub use source::{FetchError, MockSource, PostSource, WpSource, DEFAULT_BASE_URL};
pub use store::{CacheError, CacheStore, MemoryCache, ScanPage, SqliteCache};
