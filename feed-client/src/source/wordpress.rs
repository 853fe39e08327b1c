//! WordPress REST implementation of [`PostSource`].

use super::{FetchError, PostSource};
use async_trait::async_trait;
use feed_types::{PageNumber, Post};
use std::time::Duration;
use tracing::debug;

/// API root of the blog this reader was originally built against.
pub const DEFAULT_BASE_URL: &str = "https://blog.vrid.in/wp-json";

/// How long a page fetch may take before it counts as failed.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP post source backed by a WordPress REST API.
///
/// Fetches pages from `<base>/wp/v2/posts`. The base URL is the site's
/// API root (scheme, host, and the `/wp-json` prefix); trailing slashes
/// are tolerated.
pub struct WpSource {
    base_url: String,
    http: reqwest::Client,
}

impl WpSource {
    /// Create a source for the given API root with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a source with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The API root this source fetches from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts_url(&self, page: PageNumber, per_page: u32) -> String {
        format!(
            "{}/wp/v2/posts?per_page={}&page={}",
            self.base_url, per_page, page
        )
    }
}

#[async_trait]
impl PostSource for WpSource {
    async fn fetch_page(&self, page: PageNumber, per_page: u32) -> Result<Vec<Post>, FetchError> {
        let url = self.posts_url(page, per_page);
        debug!(%url, "fetching remote page");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let posts: Vec<Post> = response.json().await?;
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_pagination_params() {
        let source = WpSource::new("https://blog.example.com/wp-json").unwrap();
        assert_eq!(
            source.posts_url(PageNumber::new(3), 10),
            "https://blog.example.com/wp-json/wp/v2/posts?per_page=10&page=3"
        );
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let source = WpSource::new("https://blog.example.com/wp-json/").unwrap();
        assert_eq!(source.base_url(), "https://blog.example.com/wp-json");
        assert_eq!(
            source.posts_url(PageNumber::FIRST, 10),
            "https://blog.example.com/wp-json/wp/v2/posts?per_page=10&page=1"
        );
    }

    #[test]
    fn default_base_url_is_an_api_root() {
        assert!(DEFAULT_BASE_URL.ends_with("/wp-json"));
    }
}
