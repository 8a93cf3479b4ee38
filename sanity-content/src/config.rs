//! Client configuration
//!
//! Loaded from a TOML file (`[sanity]` table), from the environment, or both
//! with the environment taking precedence.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ContentError, Result};

/// Perspective used for token-scoped requests
pub const PREVIEW_PERSPECTIVE: &str = "previewDrafts";

/// API version used for token-scoped requests
pub const PREVIEW_API_VERSION: &str = "X";

/// Environment label that switches off result source maps
pub const PRODUCTION_ENV: &str = "production";

/// Connection settings for the content store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Sanity project identifier; no client is built without one
    #[serde(default)]
    pub project_id: Option<String>,

    /// Dataset name
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Dated API version, e.g. "2022-11-15"
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Read from the CDN instead of the live API
    #[serde(default)]
    pub use_cdn: bool,

    /// Base path the studio is mounted on
    #[serde(default = "default_studio_url")]
    pub studio_url: String,

    /// Ask the store for result source maps (diagnostics only)
    #[serde(default = "default_true")]
    pub encode_source_map: bool,

    /// Overrides `https://{project_id}.api.sanity.io`
    #[serde(default)]
    pub api_host: Option<String>,

    /// Bearer token attached to every request; set only by `with_preview_token`
    #[serde(skip)]
    pub token: Option<String>,

    /// Query perspective, e.g. "previewDrafts"; set only by `with_preview_token`
    #[serde(skip)]
    pub perspective: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// TOML document layout
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    sanity: Option<ClientConfig>,
}

// Defaults
fn default_dataset() -> String { "production".to_string() }
fn default_api_version() -> String { "2022-11-15".to_string() }
fn default_studio_url() -> String { "/studio".to_string() }
fn default_true() -> bool { true }
fn default_timeout_secs() -> u64 { 30 }

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: false,
            studio_url: default_studio_url(),
            encode_source_map: default_true(),
            api_host: None,
            token: None,
            perspective: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Create a config for a project with every other setting at its default.
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Default::default()
        }
    }

    /// Parse a TOML document. A document without a `[sanity]` table yields defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let config = file.sanity.unwrap_or_default();
        if config.timeout_secs == 0 {
            return Err(ContentError::Config("timeout_secs must be greater than zero".into()));
        }
        Ok(config)
    }

    /// Load a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Build from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (defaults plus overrides).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env_overrides(lookup)?;
        Ok(config)
    }

    /// Override fields with any non-empty `SANITY_*` values the lookup yields.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(project_id) = get("SANITY_PROJECT_ID") {
            self.project_id = Some(project_id);
        }
        if let Some(dataset) = get("SANITY_DATASET") {
            self.dataset = dataset;
        }
        if let Some(api_version) = get("SANITY_API_VERSION") {
            self.api_version = api_version;
        }
        if let Some(use_cdn) = get("SANITY_USE_CDN") {
            self.use_cdn = parse_bool("SANITY_USE_CDN", &use_cdn)?;
        }
        if let Some(studio_url) = get("SANITY_STUDIO_BASE_PATH") {
            self.studio_url = studio_url;
        }
        if let Some(env) = get("SANITY_ENV") {
            self.encode_source_map = env != PRODUCTION_ENV;
        }
        if let Some(api_host) = get("SANITY_API_HOST") {
            self.api_host = Some(api_host);
        }
        if let Some(timeout) = get("SANITY_TIMEOUT_SECS") {
            self.timeout_secs = match timeout.parse() {
                Ok(0) => {
                    return Err(ContentError::Config(
                        "SANITY_TIMEOUT_SECS must be greater than zero".into(),
                    ))
                }
                Ok(secs) => secs,
                Err(_) => {
                    return Err(ContentError::Config(format!(
                        "SANITY_TIMEOUT_SECS is not a number: {}",
                        timeout
                    )))
                }
            };
        }

        Ok(())
    }

    /// True when a usable project id is configured.
    pub fn has_project_id(&self) -> bool {
        self.project_id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }

    /// Derive the config for a single preview request.
    ///
    /// The base config is left untouched; each call returns a fresh value.
    pub fn with_preview_token(&self, token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            perspective: Some(PREVIEW_PERSPECTIVE.to_string()),
            api_version: PREVIEW_API_VERSION.to_string(),
            // Authenticated reads are never served from the CDN
            use_cdn: false,
            ..self.clone()
        }
    }

    /// Host serving queries for this config.
    pub fn api_base_url(&self) -> Result<String> {
        if let Some(ref host) = self.api_host {
            return Ok(host.trim_end_matches('/').to_string());
        }

        let project_id = self
            .project_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ContentError::Config("project_id is not set".into()))?;

        let subdomain = if self.use_cdn { "apicdn" } else { "api" };
        Ok(format!("https://{}.{}.sanity.io", project_id, subdomain))
    }

    /// Query endpoint: `{host}/v{api_version}/data/query/{dataset}`
    pub fn query_url(&self) -> Result<String> {
        Ok(format!(
            "{}/v{}/data/query/{}",
            self.api_base_url()?,
            self.api_version.trim_start_matches('v'),
            self.dataset
        ))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ContentError::Config(format!("{} is not a boolean: {}", key, other))),
    }
}
