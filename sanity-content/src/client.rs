//! Content store client handle
//!
//! A `ContentClient` is a config plus a shared transport. Re-scoping a client
//! (e.g. for a preview token) builds a new handle around a new config and the
//! same transport; the original handle never changes.

use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{ContentError, Result};
use crate::queries::{ContentQuery, QueryParams};
use crate::transport::{HttpTransport, QueryTransport};

/// Handle for running queries against one project/dataset.
#[derive(Clone)]
pub struct ContentClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn QueryTransport>,
}

impl fmt::Debug for ContentClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentClient")
            .field("project_id", &self.config.project_id)
            .field("dataset", &self.config.dataset)
            .field("api_version", &self.config.api_version)
            .field("scoped", &self.config.token.is_some())
            .finish()
    }
}

impl ContentClient {
    /// Create a client over HTTP.
    ///
    /// Fails when the config has no project id.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn QueryTransport>) -> Result<Self> {
        if !config.has_project_id() {
            return Err(ContentError::Config(
                "Configuration must contain `project_id`".into(),
            ));
        }

        info!(
            project_id = config.project_id.as_deref().unwrap_or_default(),
            dataset = %config.dataset,
            api_version = %config.api_version,
            use_cdn = config.use_cdn,
            "Content client created"
        );

        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// Get the client config.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// New handle over the same transport with a different config.
    pub fn with_config(&self, config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::clone(&self.transport),
        }
    }

    /// Client to use for a request carrying `token`.
    ///
    /// An empty or absent token yields this client; otherwise a fresh
    /// preview-scoped client that the caller drops after its one request.
    pub fn for_token(&self, token: Option<&str>) -> Self {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => self.with_config(self.config.with_preview_token(token)),
            None => self.clone(),
        }
    }

    /// Run a query and deserialize its result.
    ///
    /// `Ok(None)` means the store answered with no result.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: ContentQuery,
        params: &QueryParams,
    ) -> Result<Option<T>> {
        debug!(
            query = %query,
            preview = self.config.token.is_some(),
            "Fetching"
        );

        match self.transport.fetch(&self.config, query, params).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}
