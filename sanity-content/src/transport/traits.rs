//! Core trait for query transports.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::queries::{ContentQuery, QueryParams};

/// Sends one query to the content store.
///
/// The config is passed per call so a single transport (and its connection
/// pool) serves both the base client and every token-scoped client.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Run `query` with `params` under `config`.
    ///
    /// Returns `None` when the store answers with a null or missing result.
    async fn fetch(
        &self,
        config: &ClientConfig,
        query: ContentQuery,
        params: &QueryParams,
    ) -> Result<Option<Value>>;
}
