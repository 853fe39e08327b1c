//! Post records in the shape the remote WordPress API ships them.

use serde::{Deserialize, Serialize};

use crate::PostId;

/// The `{ "rendered": ... }` wrapper WordPress nests markup fields in.
///
/// The inner markup is optional because the API omits it for some post
/// types; an absent value and an empty string are both treated as "no
/// content" at display time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    /// Rendered HTML markup, if the server produced any.
    pub rendered: Option<String>,
}

impl Rendered {
    /// Wrap the given markup.
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            rendered: Some(markup.into()),
        }
    }
}

/// One post as returned by the remote API.
///
/// Only `id` is required; every other field tolerates absence so that
/// schema drift on the server never fails a whole page. Unknown fields
/// in the payload are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned post identifier.
    pub id: PostId,
    /// Publication timestamp in the site's local time.
    #[serde(default)]
    pub date: Option<String>,
    /// Publication timestamp in UTC.
    #[serde(default)]
    pub date_gmt: Option<String>,
    /// Globally unique permalink record.
    #[serde(default)]
    pub guid: Option<Rendered>,
    /// Last-modified timestamp in the site's local time.
    #[serde(default)]
    pub modified: Option<String>,
    /// Last-modified timestamp in UTC.
    #[serde(default)]
    pub modified_gmt: Option<String>,
    /// URL-friendly name.
    #[serde(default)]
    pub slug: Option<String>,
    /// Publication status, e.g. "publish".
    #[serde(default)]
    pub status: Option<String>,
    /// Post type. Named `type` on the wire, which is reserved in Rust.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Canonical URL of the post.
    #[serde(default)]
    pub link: Option<String>,
    /// Title markup.
    #[serde(default)]
    pub title: Option<Rendered>,
    /// Body markup.
    #[serde(default)]
    pub content: Option<Rendered>,
}

impl Post {
    /// Create a post with the given id and every other field absent.
    ///
    /// Remaining fields can be filled in afterwards; handy for fixtures.
    pub fn new(id: PostId) -> Self {
        Self {
            id,
            date: None,
            date_gmt: None,
            guid: None,
            modified: None,
            modified_gmt: None,
            slug: None,
            status: None,
            kind: None,
            link: None,
            title: None,
            content: None,
        }
    }

    /// The title markup, flattened through the [`Rendered`] wrapper.
    pub fn title_html(&self) -> Option<&str> {
        self.title.as_ref().and_then(|r| r.rendered.as_deref())
    }

    /// The body markup, flattened through the [`Rendered`] wrapper.
    pub fn content_html(&self) -> Option<&str> {
        self.content.as_ref().and_then(|r| r.rendered.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 4221,
        "date": "2024-03-18T09:30:00",
        "date_gmt": "2024-03-18T04:00:00",
        "guid": { "rendered": "https://blog.example.com/?p=4221" },
        "modified": "2024-03-19T11:00:00",
        "modified_gmt": "2024-03-19T05:30:00",
        "slug": "hello-world",
        "status": "publish",
        "type": "post",
        "link": "https://blog.example.com/hello-world/",
        "title": { "rendered": "Hello <b>World</b>" },
        "content": { "rendered": "<p>Hello <b>World</b></p>", "protected": false },
        "author": 3,
        "featured_media": 812,
        "categories": [12, 19]
    }"#;

    #[test]
    fn decodes_full_record() {
        let post: Post = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(post.id, PostId::new(4221));
        assert_eq!(post.slug.as_deref(), Some("hello-world"));
        assert_eq!(post.kind.as_deref(), Some("post"));
        assert_eq!(post.title_html(), Some("Hello <b>World</b>"));
        assert_eq!(post.content_html(), Some("<p>Hello <b>World</b></p>"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        // SAMPLE carries author/featured_media/categories, which the
        // model does not declare. Decoding must not fail on them.
        assert!(serde_json::from_str::<Post>(SAMPLE).is_ok());
    }

    #[test]
    fn minimal_record_decodes() {
        let post: Post = serde_json::from_str(r#"{ "id": 7 }"#).unwrap();
        assert_eq!(post.id, PostId::new(7));
        assert!(post.title.is_none());
        assert!(post.content.is_none());
        assert_eq!(post.title_html(), None);
    }

    #[test]
    fn missing_id_fails() {
        assert!(serde_json::from_str::<Post>(r#"{ "slug": "x" }"#).is_err());
    }

    #[test]
    fn null_rendered_markup_decodes() {
        let post: Post =
            serde_json::from_str(r#"{ "id": 7, "title": { "rendered": null } }"#).unwrap();
        assert!(post.title.is_some());
        assert_eq!(post.title_html(), None);
    }

    #[test]
    fn kind_maps_to_wire_type() {
        let post = Post {
            kind: Some("page".to_string()),
            ..Post::new(PostId::new(1))
        };
        let json = serde_json::to_string(&post).unwrap();
        assert!(json.contains(r#""type":"page""#));
        assert!(!json.contains("kind"));
    }

    #[test]
    fn roundtrips_through_json() {
        let original: Post = serde_json::from_str(SAMPLE).unwrap();
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: Post = serde_json::from_str(&encoded).unwrap();
        assert_eq!(original, decoded);
    }
}
