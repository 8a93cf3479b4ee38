//! Content records returned by the queries
//!
//! Records are deserialized leniently: every field is optional and any field
//! the store returns that is not modelled here is kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Post author, dereferenced from the post's author reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Image asset reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<Value>,
}

/// A blog post
///
/// `Post::default()` is the empty record returned when a lookup finds nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "_updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Current slug, projected from `slug.current`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Portable text body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// Fields not modelled above, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// True for the empty record (nothing matched).
    pub fn is_empty(&self) -> bool {
        *self == Post::default()
    }
}

/// Open Graph image settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OgImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Site-wide settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Portable text blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<Value>>,
    #[serde(rename = "ogImage", skip_serializing_if = "Option::is_none")]
    pub og_image: Option<OgImage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    pub fn is_empty(&self) -> bool {
        *self == Settings::default()
    }
}

/// The `{slug}` projection of a post, used to enumerate static paths
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostSlug {
    pub slug: String,
}

impl From<String> for PostSlug {
    fn from(slug: String) -> Self {
        Self { slug }
    }
}

/// A post together with the most recent other posts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostAndMoreStories {
    /// `None` when the slug matched nothing
    pub post: Option<Post>,
    #[serde(rename = "morePosts")]
    pub more_posts: Vec<Post>,
}
