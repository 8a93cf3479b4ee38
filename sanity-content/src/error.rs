//! Error types for the content facade

use thiserror::Error;

/// Result type for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Content facade error
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Content store returned an error
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Query parameter required by the query was not supplied
    #[error("Missing query parameter: ${0}")]
    MissingParam(String),

    /// Transport failed for a reason other than HTTP
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<toml::de::Error> for ContentError {
    fn from(err: toml::de::Error) -> Self {
        ContentError::Config(err.to_string())
    }
}

impl From<std::io::Error> for ContentError {
    fn from(err: std::io::Error) -> Self {
        ContentError::Config(err.to_string())
    }
}
