//! Identity and pagination types for feedsync.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A unique identifier for a post, assigned by the remote source.
///
/// Doubles as the cache key: upserting a post with an id that is already
/// cached overwrites the stored record.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostId(u64);

impl PostId {
    /// Create a PostId with the given value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the numeric value of this PostId.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostId({})", self.0)
    }
}

impl FromStr for PostId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A 1-based page number in the remote pagination scheme.
///
/// The remote API numbers pages from 1; there is no page 0.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Create a PageNumber with the given value, clamped to at least 1.
    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    /// Get the numeric value of this PageNumber.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The page after this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageNumber({})", self.0)
    }
}

/// A resume position for a forward scan over the cache.
///
/// Wraps the id of the last post a scan returned; the next scan picks up
/// strictly after it. Produced by the cache's paged read, so callers can
/// continue a walk without tracking ids themselves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanCursor(PostId);

impl ScanCursor {
    /// A cursor resuming after the given post.
    pub fn after(id: PostId) -> Self {
        Self(id)
    }

    /// The id of the last post seen before this cursor.
    pub fn last_seen(&self) -> PostId {
        self.0
    }
}

impl fmt::Display for ScanCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ScanCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScanCursor({})", self.0)
    }
}
