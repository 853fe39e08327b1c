//! Observable projection of reader state.
//!
//! The reader is the single writer; consumers subscribe through
//! [`tokio::sync::watch`] receivers and only ever observe. Three channels
//! make up the projection:
//! - the post list ([`Snapshot`])
//! - a loading flag
//! - the current error message, if any
//!
//! Display helpers live here too: they substitute presentation defaults
//! ("No Title", "No Content Available") at this boundary only. The stored
//! model keeps raw markup so nothing upstream has to guess what a blank
//! title means.

use feed_core::{strip_markup, Snapshot};
use feed_types::{Post, PostId};
use tokio::sync::watch;

/// Shown in place of a title that is missing or renders to nothing.
pub const NO_TITLE: &str = "No Title";

/// Shown in place of a body that is missing or renders to nothing.
pub const NO_CONTENT: &str = "No Content Available";

/// The write side of the projection, owned by the reader.
pub(crate) struct FeedOutput {
    posts: watch::Sender<Snapshot>,
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
}

impl FeedOutput {
    /// Create a projection publishing an empty, idle, error-free feed.
    pub(crate) fn new() -> Self {
        let (posts, _) = watch::channel(Snapshot::new());
        let (loading, _) = watch::channel(false);
        let (error, _) = watch::channel(None);
        Self {
            posts,
            loading,
            error,
        }
    }

    pub(crate) fn watch_posts(&self) -> watch::Receiver<Snapshot> {
        self.posts.subscribe()
    }

    pub(crate) fn watch_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub(crate) fn watch_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub(crate) fn replace_snapshot(&self, posts: Vec<Post>) {
        self.posts.send_replace(Snapshot::from_posts(posts));
    }

    pub(crate) fn append_snapshot(&self, posts: Vec<Post>) {
        self.posts.send_modify(|snapshot| snapshot.append(posts));
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        self.loading.send_replace(loading);
    }

    pub(crate) fn publish_error(&self, message: String) {
        self.error.send_replace(Some(message));
    }

    pub(crate) fn clear_error(&self) {
        self.error.send_replace(None);
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        self.posts.borrow().clone()
    }

    pub(crate) fn find_post(&self, id: PostId) -> Option<Post> {
        self.posts.borrow().find(id).cloned()
    }
}

/// Whether scrolling has reached the point where the next page should load.
///
/// True exactly when the last visible row is the last loaded row. An
/// empty list never triggers (the first page comes from refresh, not
/// load-more), and neither does a list with no visible rows.
pub fn should_load_more(last_visible: Option<usize>, total: usize) -> bool {
    total > 0 && last_visible == Some(total - 1)
}

/// Title for a list row: markup stripped, default substituted when empty.
pub fn display_title(post: &Post) -> String {
    non_blank(post.title_html().map(strip_markup)).unwrap_or_else(|| NO_TITLE.to_string())
}

/// Body preview for a list row: markup stripped, default substituted when empty.
pub fn display_preview(post: &Post) -> String {
    non_blank(post.content_html().map(strip_markup)).unwrap_or_else(|| NO_CONTENT.to_string())
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}
