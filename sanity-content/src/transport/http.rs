//! HTTP transport for the hosted query API.
//!
//! `GET {host}/v{version}/data/query/{dataset}?query=...&$param=<json>`

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::traits::QueryTransport;
use crate::config::ClientConfig;
use crate::error::{ContentError, Result};
use crate::queries::{ContentQuery, QueryParams};

/// reqwest-backed transport.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a JSON `Accept` header.
    pub fn new() -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }
}

/// Successful query response body.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    ms: Option<u64>,
}

/// Error response body.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error }) => match (error.error_type, error.description) {
            (Some(kind), Some(description)) => format!("{}: {}", kind, description),
            (None, Some(description)) => description,
            (Some(kind), None) => kind,
            (None, None) => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    async fn fetch(
        &self,
        config: &ClientConfig,
        query: ContentQuery,
        params: &QueryParams,
    ) -> Result<Option<Value>> {
        query.check_params(params)?;

        let url = config.query_url()?;

        let mut pairs = vec![("query".to_string(), query.groq().to_string())];
        pairs.extend(params.to_query_pairs()?);
        if let Some(ref perspective) = config.perspective {
            pairs.push(("perspective".to_string(), perspective.clone()));
        }
        if config.encode_source_map {
            pairs.push(("resultSourceMap".to_string(), "true".to_string()));
        }

        let mut request = self
            .client
            .get(&url)
            .query(&pairs)
            .timeout(Duration::from_secs(config.timeout_secs));

        if let Some(ref token) = config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            let detail = match response.text().await {
                Ok(body) if !body.trim().is_empty() => error_message(&body),
                Ok(_) => reason.to_string(),
                Err(e) => {
                    warn!(query = %query, "Failed to read error body: {}", e);
                    reason.to_string()
                }
            };
            let message = if status == StatusCode::UNAUTHORIZED && config.token.is_some() {
                format!("preview token rejected: {}", detail)
            } else {
                detail
            };
            return Err(ContentError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body: QueryResponse = response.json().await?;
        debug!(
            query = %query,
            server_ms = body.ms.unwrap_or_default(),
            "Query answered"
        );

        Ok(body.result.filter(|v| !v.is_null()))
    }
}
