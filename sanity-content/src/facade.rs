//! ContentFacade - the query functions the site calls.
//!
//! The base client is resolved once when the facade is built. Without a
//! project id there is no client and every operation returns its fallback
//! without touching the network.

use std::sync::OnceLock;
use tracing::warn;

use crate::client::ContentClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::queries::{ContentQuery, QueryParams};
use crate::types::{Post, PostAndMoreStories, PostSlug, Settings};

static SHARED: OnceLock<ContentFacade> = OnceLock::new();

/// Read-only access to site content.
#[derive(Debug, Clone)]
pub struct ContentFacade {
    client: Option<ContentClient>,
}

impl ContentFacade {
    /// Build the facade from config.
    ///
    /// No client is created when `project_id` is missing. Any other failure
    /// to build the client is returned to the caller.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if !config.has_project_id() {
            warn!("No Sanity project id configured, content queries will return defaults");
            return Ok(Self::unconfigured());
        }

        Ok(Self::with_client(ContentClient::new(config)?))
    }

    /// Build the facade around an existing client.
    pub fn with_client(client: ContentClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A facade with no client.
    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    /// Build the facade from `SANITY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Process-wide facade, built from the environment on first use.
    ///
    /// An unreadable environment yields an unconfigured facade.
    pub fn shared() -> &'static ContentFacade {
        SHARED.get_or_init(|| {
            Self::from_env().unwrap_or_else(|e| {
                warn!("Invalid content configuration: {}", e);
                Self::unconfigured()
            })
        })
    }

    /// Whether a base client exists.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// The base client, if any.
    pub fn client(&self) -> Option<&ContentClient> {
        self.client.as_ref()
    }

    /// Site settings. Empty record when unconfigured or missing.
    pub async fn get_settings(&self, token: Option<&str>) -> Result<Settings> {
        let Some(base) = &self.client else {
            return Ok(Settings::default());
        };

        let client = base.for_token(token);
        Ok(client
            .fetch(ContentQuery::Settings, &QueryParams::new())
            .await?
            .unwrap_or_default())
    }

    /// All posts, newest first.
    pub async fn get_all_posts(&self, token: Option<&str>) -> Result<Vec<Post>> {
        let Some(base) = &self.client else {
            return Ok(Vec::new());
        };

        let client = base.for_token(token);
        Ok(client
            .fetch(ContentQuery::Index, &QueryParams::new())
            .await?
            .unwrap_or_default())
    }

    /// Slug of every post, each wrapped as `{slug}`.
    pub async fn get_all_posts_slugs(&self, token: Option<&str>) -> Result<Vec<PostSlug>> {
        let Some(base) = &self.client else {
            return Ok(Vec::new());
        };

        let client = base.for_token(token);
        let slugs: Vec<String> = client
            .fetch(ContentQuery::PostSlugs, &QueryParams::new())
            .await?
            .unwrap_or_default();

        Ok(slugs.into_iter().map(PostSlug::from).collect())
    }

    /// Single post by slug. Empty record when nothing matches.
    pub async fn get_post_by_slug(&self, slug: &str, token: Option<&str>) -> Result<Post> {
        let Some(base) = &self.client else {
            return Ok(Post::default());
        };

        let client = base.for_token(token);
        Ok(client
            .fetch(ContentQuery::PostBySlug, &QueryParams::slug(slug))
            .await?
            .unwrap_or_default())
    }

    /// Post by slug plus the newest other posts.
    ///
    /// Only available in preview: without a token this returns the empty
    /// pair even when a client exists.
    pub async fn get_post_and_more_stories(
        &self,
        slug: &str,
        token: Option<&str>,
    ) -> Result<PostAndMoreStories> {
        let (Some(base), Some(token)) = (&self.client, token.filter(|t| !t.is_empty())) else {
            return Ok(PostAndMoreStories::default());
        };

        let client = base.for_token(Some(token));
        Ok(client
            .fetch(ContentQuery::PostAndMoreStories, &QueryParams::slug(slug))
            .await?
            .unwrap_or_default())
    }
}
