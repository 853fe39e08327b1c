//! The published post list.
//!
//! A snapshot is what consumers actually see: the first page in server
//! order, with later pages appended at the tail. Replace and append are
//! the only mutations; nothing here decides *when* they happen - that is
//! the state machine's job.

use feed_types::{Post, PostId};

/// Ordered collection of posts as published to consumers.
///
/// Append performs no de-duplication: if the remote hands back
/// overlapping pages (posts published mid-scroll shift the pages), the
/// overlap is visible here too. Lookups by id return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    posts: Vec<Post>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self { posts: Vec::new() }
    }

    /// Create a snapshot holding the given posts.
    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Discard the current contents and publish the given posts instead.
    pub fn replace(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    /// Add the given posts at the tail, preserving their order.
    pub fn append(&mut self, posts: Vec<Post>) {
        self.posts.extend(posts);
    }

    /// Find the first post with the given id.
    ///
    /// `None` means "not loaded", not "does not exist".
    pub fn find(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// All posts in publication order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Number of posts in the snapshot.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Check whether the snapshot holds no posts.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Iterate over the posts in publication order.
    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_types::Rendered;

    fn make_post(id: u64, title: &str) -> Post {
        Post {
            title: Some(Rendered::new(title)),
            ..Post::new(PostId::new(id))
        }
    }

    fn ids(snapshot: &Snapshot) -> Vec<u64> {
        snapshot.iter().map(|p| p.id.value()).collect()
    }

    #[test]
    fn starts_empty() {
        let snapshot = Snapshot::new();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
    }

    #[test]
    fn replace_discards_previous_contents() {
        let mut snapshot = Snapshot::from_posts(vec![make_post(1, "old")]);
        snapshot.replace(vec![make_post(2, "new"), make_post(3, "newer")]);

        assert_eq!(ids(&snapshot), vec![2, 3]);
    }

    #[test]
    fn append_preserves_existing_order() {
        let mut snapshot = Snapshot::from_posts(vec![make_post(1, "a"), make_post(2, "b")]);
        snapshot.append(vec![make_post(3, "c"), make_post(4, "d")]);

        assert_eq!(ids(&snapshot), vec![1, 2, 3, 4]);
    }

    #[test]
    fn append_keeps_duplicate_ids() {
        let mut snapshot = Snapshot::from_posts(vec![make_post(1, "a"), make_post(2, "b")]);
        snapshot.append(vec![make_post(2, "b again"), make_post(3, "c")]);

        assert_eq!(ids(&snapshot), vec![1, 2, 2, 3]);
    }

    #[test]
    fn append_empty_page_changes_nothing() {
        let mut snapshot = Snapshot::from_posts(vec![make_post(1, "a")]);
        snapshot.append(vec![]);

        assert_eq!(ids(&snapshot), vec![1]);
    }

    #[test]
    fn find_returns_first_match() {
        let mut snapshot = Snapshot::from_posts(vec![make_post(1, "first")]);
        snapshot.append(vec![make_post(1, "duplicate")]);

        let found = snapshot.find(PostId::new(1)).unwrap();
        assert_eq!(found.title_html(), Some("first"));
    }

    #[test]
    fn find_missing_returns_none() {
        let snapshot = Snapshot::from_posts(vec![make_post(1, "a")]);
        assert!(snapshot.find(PostId::new(99)).is_none());
    }
}
