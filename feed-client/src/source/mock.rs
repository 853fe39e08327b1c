//! Mock post source for testing.
//!
//! Allows scripting page results, forcing failures, and holding a fetch
//! in flight so tests can interleave loads deterministically.

use super::{FetchError, PostSource};
use async_trait::async_trait;
use feed_types::{PageNumber, Post};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock post source for testing.
///
/// Pages queued with [`queue_page`](Self::queue_page) are returned in
/// FIFO order regardless of the requested page number; the requested
/// numbers are recorded for verification instead.
#[derive(Debug, Default)]
pub struct MockSource {
    inner: Arc<Mutex<MockSourceInner>>,
    released: Arc<Notify>,
}

#[derive(Debug, Default)]
struct MockSourceInner {
    pages: VecDeque<Vec<Post>>,
    calls: Vec<(PageNumber, u32)>,
    fail_next_fetch: Option<String>,
    hold_next_fetch: bool,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the page the next successful fetch returns.
    pub fn queue_page(&self, posts: Vec<Post>) {
        let mut inner = self.inner.lock().unwrap();
        inner.pages.push_back(posts);
    }

    /// Cause the next fetch to fail with the given error.
    pub fn fail_next_fetch(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_fetch = Some(error.to_string());
    }

    /// Hold the next fetch in flight until [`release_fetch`](Self::release_fetch).
    ///
    /// The call is recorded immediately; only its completion is delayed.
    pub fn gate_next_fetch(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.hold_next_fetch = true;
    }

    /// Release a fetch held by [`gate_next_fetch`](Self::gate_next_fetch).
    ///
    /// Safe to call before the fetch arrives; the release is remembered.
    pub fn release_fetch(&self) {
        self.released.notify_one();
    }

    /// All `(page, per_page)` pairs requested so far.
    pub fn calls(&self) -> Vec<(PageNumber, u32)> {
        let inner = self.inner.lock().unwrap();
        inner.calls.clone()
    }

    /// How many fetches have been requested.
    pub fn fetch_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.calls.len()
    }
}

impl Clone for MockSource {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            released: Arc::clone(&self.released),
        }
    }
}

#[async_trait]
impl PostSource for MockSource {
    async fn fetch_page(&self, page: PageNumber, per_page: u32) -> Result<Vec<Post>, FetchError> {
        let held = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push((page, per_page));
            std::mem::take(&mut inner.hold_next_fetch)
        };

        // The lock must not be held while parked, or concurrent fetches
        // could not proceed past us.
        if held {
            self.released.notified().await;
        }

        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_fetch.take() {
            return Err(FetchError::Transport { message: error });
        }

        inner.pages.pop_front().ok_or(FetchError::Transport {
            message: "no scripted page".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_types::PostId;

    fn make_page(ids: std::ops::Range<u64>) -> Vec<Post> {
        ids.map(|id| Post::new(PostId::new(id))).collect()
    }

    // ===========================================
    // MockSource Basic Tests
    // ===========================================

    #[tokio::test]
    async fn returns_queued_pages_in_order() {
        let source = MockSource::new();
        source.queue_page(make_page(1..4));
        source.queue_page(make_page(4..7));

        let first = source.fetch_page(PageNumber::FIRST, 3).await.unwrap();
        let second = source.fetch_page(PageNumber::new(2), 3).await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first[0].id, PostId::new(1));
        assert_eq!(second[0].id, PostId::new(4));
    }

    #[tokio::test]
    async fn exhausted_queue_errors() {
        let source = MockSource::new();

        let result = source.fetch_page(PageNumber::FIRST, 10).await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }

    #[tokio::test]
    async fn records_requested_pages() {
        let source = MockSource::new();
        source.queue_page(vec![]);
        source.queue_page(vec![]);

        source.fetch_page(PageNumber::FIRST, 10).await.unwrap();
        source.fetch_page(PageNumber::new(2), 10).await.unwrap();

        assert_eq!(
            source.calls(),
            vec![(PageNumber::FIRST, 10), (PageNumber::new(2), 10)]
        );
        assert_eq!(source.fetch_count(), 2);
    }

    // ===========================================
    // Error Injection Tests
    // ===========================================

    #[tokio::test]
    async fn forced_failure_is_one_shot() {
        let source = MockSource::new();
        source.queue_page(make_page(1..2));
        source.fail_next_fetch("connection refused");

        let result = source.fetch_page(PageNumber::FIRST, 10).await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));

        // Next fetch should work and get the queued page
        let posts = source.fetch_page(PageNumber::FIRST, 10).await.unwrap();
        assert_eq!(posts.len(), 1);
    }

    // ===========================================
    // Gate Tests
    // ===========================================

    #[tokio::test]
    async fn gated_fetch_waits_for_release() {
        let source = MockSource::new();
        source.queue_page(make_page(1..2));
        source.gate_next_fetch();

        let fetcher = source.clone();
        let handle =
            tokio::spawn(async move { fetcher.fetch_page(PageNumber::FIRST, 10).await });

        // Let the spawned fetch reach the gate: the call is recorded but
        // the future has not resolved.
        while source.fetch_count() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!handle.is_finished());

        source.release_fetch();
        let posts = handle.await.unwrap().unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn release_before_fetch_is_remembered() {
        let source = MockSource::new();
        source.queue_page(make_page(1..2));
        source.gate_next_fetch();
        source.release_fetch();

        let posts = source.fetch_page(PageNumber::FIRST, 10).await.unwrap();
        assert_eq!(posts.len(), 1);
    }

    // ===========================================
    // Clone and Shared State Tests
    // ===========================================

    #[tokio::test]
    async fn clone_shares_state() {
        let source1 = MockSource::new();
        let source2 = source1.clone();

        source1.queue_page(make_page(1..3));
        let posts = source2.fetch_page(PageNumber::FIRST, 10).await.unwrap();
        assert_eq!(posts.len(), 2);

        assert_eq!(source1.fetch_count(), 1);
    }
}
