//! The feed reader: drives loads, owns the published state.
//!
//! [`FeedReader`] connects the pure load-state machine in feed-core to
//! the real world. Entry points feed events into the machine; the actions
//! it returns are split in two: publishing actions (snapshot, loading
//! flag, error message) are applied immediately under the state lock so
//! watchers always observe a consistent trio, and I/O actions (cache
//! read, page fetches) run afterwards with no locks held, so loads can
//! overlap and be superseded.
//!
//! Entry points never return errors. A failed load becomes state: the
//! snapshot keeps its previous contents and the failure is published on
//! the error channel.

use std::sync::Arc;

use feed_core::{Generation, LoadAction, LoadEvent, LoadState, PageTracker, Snapshot};
use feed_types::{PageNumber, Post, PostId};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::projection::FeedOutput;
use crate::source::PostSource;
use crate::store::{CacheError, CacheStore};

/// Posts requested per remote page unless configured otherwise.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Configuration for [`FeedReader`].
#[derive(Debug, Clone)]
pub struct FeedConfig {
    per_page: u32,
}

impl FeedConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Set how many posts each remote page requests.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Posts requested per remote page.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Offline-first post reader.
///
/// Generic over the remote source and the local cache so tests can swap
/// in [`MockSource`](crate::source::MockSource) and
/// [`MemoryCache`](crate::store::MemoryCache) for the production
/// WordPress + SQLite pair.
pub struct FeedReader<S: PostSource, C: CacheStore> {
    config: FeedConfig,
    source: S,
    cache: C,
    state: Arc<Mutex<LoadState>>,
    pages: Arc<Mutex<PageTracker>>,
    output: FeedOutput,
}

impl<S: PostSource, C: CacheStore> FeedReader<S, C> {
    /// Create a reader over the given source and cache.
    ///
    /// Nothing is loaded until [`refresh`](Self::refresh) is called; the
    /// published snapshot starts empty.
    pub fn new(config: FeedConfig, source: S, cache: C) -> Self {
        Self {
            config,
            source,
            cache,
            state: Arc::new(Mutex::new(LoadState::new())),
            pages: Arc::new(Mutex::new(PageTracker::new())),
            output: FeedOutput::new(),
        }
    }

    /// Start a fresh first-page load.
    ///
    /// Whatever the cache holds is published right away so the consumer
    /// has something to show, then page 1 is fetched and replaces it. A
    /// refresh is accepted in every state and supersedes any load still
    /// in flight; the superseded load's result is discarded when it
    /// lands.
    pub async fn refresh(&self) {
        info!("refresh requested");
        for action in self.apply(LoadEvent::RefreshRequested, None).await {
            self.run_io(action).await;
        }
    }

    /// Fetch the page after the last one and append it to the snapshot.
    ///
    /// Only honored once the previous load settled (successfully or
    /// not); while a load is in flight this is a silent no-op, which
    /// debounces the repeated triggers a scrolling consumer emits. From
    /// a failed state it acts as the retry, continuing with the page
    /// after the one that failed.
    pub async fn load_more(&self) {
        let actions = self.apply(LoadEvent::MoreRequested, None).await;
        if actions.is_empty() {
            debug!("load-more ignored in current state");
            return;
        }
        info!("loading next page");
        for action in actions {
            self.run_io(action).await;
        }
    }

    /// Read the next page straight from the cache, without the network.
    ///
    /// Resumes where the previous call left off; a settled refresh
    /// rewinds the walk to the beginning. Returns an empty vec once the
    /// cache is exhausted.
    pub async fn next_cached_page(&self, limit: u32) -> Result<Vec<Post>, CacheError> {
        let mut pages = self.pages.lock().await;
        let page = self.cache.read_page_after(pages.scan_position(), limit).await?;
        if let Some(next) = page.next {
            pages.mark_scanned(next);
        }
        Ok(page.posts)
    }

    /// Subscribe to the published post list.
    pub fn watch_posts(&self) -> watch::Receiver<Snapshot> {
        self.output.watch_posts()
    }

    /// Subscribe to the loading flag.
    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.output.watch_loading()
    }

    /// Subscribe to the published error message.
    pub fn watch_error(&self) -> watch::Receiver<Option<String>> {
        self.output.watch_error()
    }

    /// A clone of the currently published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.output.snapshot()
    }

    /// Find a post by id in the current snapshot.
    ///
    /// `None` means the post has not been loaded, not that it does not
    /// exist remotely.
    pub fn find_post(&self, id: PostId) -> Option<Post> {
        self.output.find_post(id)
    }

    /// The current load lifecycle state.
    pub async fn load_state(&self) -> LoadState {
        let state = self.state.lock().await;
        state.clone()
    }

    /// Check if a load is currently in flight.
    pub async fn is_loading(&self) -> bool {
        let state = self.state.lock().await;
        state.is_loading()
    }

    /// Drive one event through the machine and apply what can be applied
    /// on the spot.
    ///
    /// Publishing actions run here, under the state lock, so the
    /// snapshot, loading flag, and error message always change together.
    /// I/O actions are returned for the caller to run with the lock
    /// released. `page` carries the fetched posts for replace/append.
    async fn apply(&self, event: LoadEvent, page: Option<Vec<Post>>) -> Vec<LoadAction> {
        let mut state = self.state.lock().await;
        let (next, actions) = state.clone().on_event(event);
        *state = next;
        self.output.set_loading(state.is_loading());

        let mut page = page;
        let mut io = Vec::new();
        for action in actions {
            match action {
                LoadAction::ReplaceSnapshot => {
                    if let Some(posts) = page.take() {
                        self.output.replace_snapshot(posts);
                    }
                }
                LoadAction::AppendSnapshot => {
                    if let Some(posts) = page.take() {
                        self.output.append_snapshot(posts);
                    }
                }
                LoadAction::ClearError => self.output.clear_error(),
                LoadAction::PublishError { error } => self.output.publish_error(error),
                LoadAction::ResetPages => {
                    let mut pages = self.pages.lock().await;
                    pages.reset();
                }
                other => io.push(other),
            }
        }
        io
    }

    /// Execute one I/O action produced by [`apply`](Self::apply).
    async fn run_io(&self, action: LoadAction) {
        match action {
            LoadAction::ReadCache { generation } => self.publish_cached(generation).await,
            LoadAction::FetchFirst { generation } => {
                self.fetch_and_settle(generation, PageNumber::FIRST).await;
            }
            LoadAction::FetchNext { generation } => {
                let page = {
                    let mut pages = self.pages.lock().await;
                    pages.advance()
                };
                self.fetch_and_settle(generation, page).await;
            }
            // Publishing actions never get here; `apply` handles them.
            _ => {}
        }
    }

    /// Publish the cache contents as a provisional snapshot.
    ///
    /// Skipped when the cache is empty or unreadable (an unreadable
    /// cache means "nothing cached", never a user-visible error), and
    /// when a newer refresh superseded this one while the read ran.
    async fn publish_cached(&self, generation: Generation) {
        let cached = match self.cache.read_all().await {
            Ok(posts) => posts,
            Err(error) => {
                warn!(%error, "cache read failed; starting with an empty list");
                return;
            }
        };
        if cached.is_empty() {
            debug!("cache is empty, waiting for the remote page");
            return;
        }

        let state = self.state.lock().await;
        if state.generation() != generation {
            debug!(generation, "skipping cached publish for a superseded refresh");
            return;
        }
        info!(count = cached.len(), "published cached snapshot");
        self.output.replace_snapshot(cached);
    }

    /// Fetch one page and feed the outcome back into the machine.
    async fn fetch_and_settle(&self, generation: Generation, page: PageNumber) {
        debug!(%page, generation, "fetching page");
        match self.source.fetch_page(page, self.config.per_page).await {
            Ok(posts) => {
                // Best-effort staleness check before the cache write; the
                // machine re-checks when the completion is applied.
                if self.is_stale(generation).await {
                    warn!(%page, generation, "discarding page from a superseded load");
                    return;
                }
                if let Err(error) = self.cache.upsert_all(&posts).await {
                    warn!(%error, "cache write failed; keeping the fetched page");
                }
                let count = posts.len();
                self.apply(
                    LoadEvent::PageLoaded { generation, count },
                    Some(posts),
                )
                .await;
                info!(%page, count, "page loaded");
            }
            Err(error) => {
                warn!(%page, %error, "page fetch failed");
                self.apply(
                    LoadEvent::LoadFailed {
                        generation,
                        error: error.to_string(),
                    },
                    None,
                )
                .await;
            }
        }
    }

    async fn is_stale(&self, generation: Generation) -> bool {
        let state = self.state.lock().await;
        state.generation() != generation
    }
}
