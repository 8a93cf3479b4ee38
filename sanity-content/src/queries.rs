//! The fixed GROQ queries the facade can send
//!
//! The set is closed: callers pick one of the five [`ContentQuery`] variants
//! and never supply query text.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ContentError, Result};

/// Fields projected for every post
macro_rules! post_fields {
    () => {
        r#"
  _id,
  title,
  date,
  _updatedAt,
  excerpt,
  coverImage,
  "slug": slug.current,
  "author": author->{name, picture},
"#
    };
}

pub const SETTINGS_QUERY: &str = r#"*[_type == "settings"][0]"#;

pub const INDEX_QUERY: &str = concat!(
    r#"*[_type == "post"] | order(date desc, _updatedAt desc) {"#,
    post_fields!(),
    "}"
);

pub const POST_AND_MORE_STORIES_QUERY: &str = concat!(
    "{\n",
    r#"  "post": *[_type == "post" && slug.current == $slug] | order(_updatedAt desc) [0] {"#,
    "\n  content,",
    post_fields!(),
    "  },\n",
    r#"  "morePosts": *[_type == "post" && slug.current != $slug] | order(date desc, _updatedAt desc) [0...2] {"#,
    "\n  content,",
    post_fields!(),
    "  }\n",
    "}"
);

pub const POST_SLUGS_QUERY: &str = r#"*[_type == "post" && defined(slug.current)][].slug.current"#;

pub const POST_BY_SLUG_QUERY: &str = concat!(
    r#"*[_type == "post" && slug.current == $slug][0] {"#,
    post_fields!(),
    "}"
);

/// One of the named content queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentQuery {
    /// Site settings document
    Settings,
    /// All posts, newest first
    Index,
    /// Slug of every post that has one
    PostSlugs,
    /// Single post by `$slug`
    PostBySlug,
    /// Post by `$slug` plus the two newest other posts
    PostAndMoreStories,
}

impl ContentQuery {
    pub const ALL: [ContentQuery; 5] = [
        ContentQuery::Settings,
        ContentQuery::Index,
        ContentQuery::PostSlugs,
        ContentQuery::PostBySlug,
        ContentQuery::PostAndMoreStories,
    ];

    /// GROQ text sent to the store.
    pub fn groq(&self) -> &'static str {
        match self {
            ContentQuery::Settings => SETTINGS_QUERY,
            ContentQuery::Index => INDEX_QUERY,
            ContentQuery::PostSlugs => POST_SLUGS_QUERY,
            ContentQuery::PostBySlug => POST_BY_SLUG_QUERY,
            ContentQuery::PostAndMoreStories => POST_AND_MORE_STORIES_QUERY,
        }
    }

    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ContentQuery::Settings => "settings",
            ContentQuery::Index => "index",
            ContentQuery::PostSlugs => "post-slugs",
            ContentQuery::PostBySlug => "post-by-slug",
            ContentQuery::PostAndMoreStories => "post-and-more-stories",
        }
    }

    /// Parameters the query text references.
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            ContentQuery::Settings | ContentQuery::Index | ContentQuery::PostSlugs => &[],
            ContentQuery::PostBySlug | ContentQuery::PostAndMoreStories => &["slug"],
        }
    }

    /// Fail if a referenced parameter is missing.
    pub fn check_params(&self, params: &QueryParams) -> Result<()> {
        for name in self.required_params() {
            if !params.contains(name) {
                return Err(ContentError::MissingParam(name.to_string()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ContentQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Query parameters, bound as `$name` in the GROQ text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryParams(BTreeMap<String, Value>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Parameters for the by-slug queries.
    pub fn slug(slug: &str) -> Self {
        Self::new().with("slug", slug)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Encode as `$name=<json>` pairs for the HTTP query API.
    pub fn to_query_pairs(&self) -> Result<Vec<(String, String)>> {
        self.0
            .iter()
            .map(|(name, value)| Ok((format!("${}", name), serde_json::to_string(value)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_texts_reference_their_params() {
        for query in ContentQuery::ALL {
            let references_slug = query.groq().contains("$slug");
            assert_eq!(
                references_slug,
                query.required_params().contains(&"slug"),
                "{} params out of sync with text",
                query
            );
        }
    }

    #[test]
    fn test_post_queries_project_slug() {
        assert!(INDEX_QUERY.contains(r#""slug": slug.current"#));
        assert!(POST_BY_SLUG_QUERY.contains(r#""author": author->{name, picture}"#));
        assert!(POST_AND_MORE_STORIES_QUERY.contains("[0...2]"));
        assert!(POST_AND_MORE_STORIES_QUERY.contains(r#""morePosts""#));
    }

    #[test]
    fn test_check_params() {
        assert!(ContentQuery::Settings.check_params(&QueryParams::new()).is_ok());
        assert!(ContentQuery::PostBySlug.check_params(&QueryParams::slug("a")).is_ok());

        let err = ContentQuery::PostAndMoreStories
            .check_params(&QueryParams::new())
            .unwrap_err();
        assert!(matches!(err, ContentError::MissingParam(ref p) if p == "slug"));
    }

    #[test]
    fn test_params_encode_as_json() {
        let pairs = QueryParams::slug("hello-world").with("limit", 3).to_query_pairs().unwrap();
        assert_eq!(
            pairs,
            vec![
                ("$limit".to_string(), "3".to_string()),
                ("$slug".to_string(), "\"hello-world\"".to_string()),
            ]
        );
    }
}
