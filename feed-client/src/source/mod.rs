//! Remote post source abstraction.
//!
//! This module provides a pluggable source layer that abstracts where
//! pages of posts come from (WordPress REST over HTTP, mock for testing).
//!
//! # Design
//!
//! The source trait is async and stateless: callers pass the page number
//! explicitly on every call, and implementations hold no pagination
//! position of their own. An empty page is a valid success, not an error;
//! what it means for the overall load is decided upstream.
//!
//! # Example
//!
//! ```ignore
//! let source = WpSource::new("https://blog.vrid.in/wp-json")?;
//! let posts = source.fetch_page(PageNumber::FIRST, 10).await?;
//! ```

mod mock;
mod wordpress;

pub use mock::MockSource;
pub use wordpress::{WpSource, DEFAULT_BASE_URL};

use async_trait::async_trait;
use feed_types::{PageNumber, Post};
use thiserror::Error;

/// Errors from fetching a remote page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The server answered with a non-success status code.
    #[error("server returned status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not a valid post list.
    #[error("malformed response: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode {
                message: e.to_string(),
            }
        } else {
            Self::Transport {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode {
            message: e.to_string(),
        }
    }
}

/// A paginated source of posts.
///
/// Implementations translate one page request into typed posts
/// (WordPress REST, mock, etc). Pages are 1-based and fetched in
/// server order.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch one page of posts.
    ///
    /// Returns the posts in server order. An empty vec means the page
    /// exists but holds nothing (or the feed is exhausted).
    async fn fetch_page(&self, page: PageNumber, per_page: u32) -> Result<Vec<Post>, FetchError>;
}
