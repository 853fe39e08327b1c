//! In-memory cache for testing.

use super::{CacheError, CacheStore, ScanPage};
use async_trait::async_trait;
use feed_types::{Post, PostId, ScanCursor};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, Mutex};

/// In-memory post cache.
///
/// A BTreeMap keyed by id yields the same ascending-id read order as the
/// SQLite backend. Clones share state, so tests can keep a handle while
/// the reader owns another. Supports one-shot failure injection per
/// operation kind. Not persistent.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    inner: Arc<Mutex<MemoryCacheInner>>,
}

#[derive(Debug, Default)]
struct MemoryCacheInner {
    posts: BTreeMap<PostId, Post>,
    fail_next_upsert: Option<String>,
    fail_next_read: Option<String>,
    fail_next_get: Option<String>,
}

impl MemoryCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached posts.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.posts.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cause the next `upsert_all` to fail with the given error.
    pub fn fail_next_upsert(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_upsert = Some(error.to_string());
    }

    /// Cause the next read (`read_all` or `read_page_after`) to fail.
    pub fn fail_next_read(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_read = Some(error.to_string());
    }

    /// Cause the next `get` to fail with the given error.
    pub fn fail_next_get(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_get = Some(error.to_string());
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn upsert_all(&self, posts: &[Post]) -> Result<(), CacheError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_upsert.take() {
            return Err(CacheError::Database { message: error });
        }

        for post in posts {
            inner.posts.insert(post.id, post.clone());
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Post>, CacheError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_read.take() {
            return Err(CacheError::Database { message: error });
        }

        Ok(inner.posts.values().cloned().collect())
    }

    async fn read_page_after(
        &self,
        after: Option<ScanCursor>,
        limit: u32,
    ) -> Result<ScanPage, CacheError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_read.take() {
            return Err(CacheError::Database { message: error });
        }

        let start = match after {
            Some(cursor) => Bound::Excluded(cursor.last_seen()),
            None => Bound::Unbounded,
        };
        let posts: Vec<Post> = inner
            .posts
            .range((start, Bound::Unbounded))
            .take(limit as usize)
            .map(|(_, post)| post.clone())
            .collect();
        let next = posts.last().map(|post| ScanCursor::after(post.id));

        Ok(ScanPage { posts, next })
    }

    async fn get(&self, id: PostId) -> Result<Option<Post>, CacheError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_get.take() {
            return Err(CacheError::Database { message: error });
        }

        Ok(inner.posts.get(&id).cloned())
    }

    async fn count(&self) -> Result<u64, CacheError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.posts.len() as u64)
    }
}
