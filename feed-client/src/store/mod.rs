//! Local post cache abstraction.
//!
//! This module provides a pluggable cache layer that abstracts where
//! posts persist between runs (SQLite on disk, memory for testing).
//!
//! # Design
//!
//! The cache is a document store keyed by post id:
//! - writes are last-write-wins upserts, so re-fetching a page is idempotent
//! - reads present one stable order (ascending id), independent of
//!   insertion order
//! - a paged read takes an opaque cursor, so callers can walk the cache
//!   without duplication or gaps
//!
//! Callers in the read path treat any cache error as "nothing cached";
//! the cache accelerates startup and covers offline, it is never load-bearing.

mod memory;
mod sqlite;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;

use async_trait::async_trait;
use feed_types::{Post, PostId, ScanCursor};
use thiserror::Error;

/// Errors from the local cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The underlying database failed.
    #[error("database error: {message}")]
    Database {
        /// Description of the database failure.
        message: String,
    },

    /// A stored record could not be encoded or decoded.
    #[error("corrupt cache record for post {id}: {message}")]
    Corrupt {
        /// Id of the offending post.
        id: PostId,
        /// Description of the codec failure.
        message: String,
    },
}

impl From<sqlx::Error> for CacheError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database {
            message: e.to_string(),
        }
    }
}

/// One page of a forward cache scan.
#[derive(Debug, Clone)]
pub struct ScanPage {
    /// The posts in this page, in store order.
    pub posts: Vec<Post>,
    /// Position to resume after, or `None` when this page was empty.
    ///
    /// A final partial page still yields a cursor; the scan is over once
    /// a page comes back empty.
    pub next: Option<ScanCursor>,
}

/// Persistent post cache keyed by post id.
///
/// Implementations must keep one record per id (upserts overwrite) and
/// present reads in ascending id order.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Insert or fully overwrite each post, keyed by its id.
    async fn upsert_all(&self, posts: &[Post]) -> Result<(), CacheError>;

    /// Every cached post, in store order.
    async fn read_all(&self) -> Result<Vec<Post>, CacheError>;

    /// Up to `limit` posts strictly after `after`, in store order.
    ///
    /// `None` starts from the beginning. Feeding each returned cursor
    /// into the next call walks the whole cache exactly once.
    async fn read_page_after(
        &self,
        after: Option<ScanCursor>,
        limit: u32,
    ) -> Result<ScanPage, CacheError>;

    /// Look up one post by id.
    async fn get(&self, id: PostId) -> Result<Option<Post>, CacheError>;

    /// Number of cached posts.
    async fn count(&self) -> Result<u64, CacheError>;
}
