//! Sanity Content - typed query facade for the blog front end
//!
//! Forwards the five content queries the site needs (settings, post listing,
//! post slugs, single post, post with more stories) to the hosted Sanity
//! content store, optionally scoped by a preview token.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            ContentFacade                │
//! │  (fallbacks when no client is built)    │
//! └────────────────┬────────────────────────┘
//!                  │ base client / token-scoped client
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │            ContentClient                │
//! │  (ClientConfig + shared transport)      │
//! └────────────────┬────────────────────────┘
//!                  ▼
//! ┌─────────────┐       ┌─────────────┐
//! │HttpTransport│       │MockTransport│
//! │  (reqwest)  │       │  (tests)    │
//! └─────────────┘       └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sanity_content::{ClientConfig, ContentFacade};
//!
//! # async fn example() -> sanity_content::Result<()> {
//! let facade = ContentFacade::new(ClientConfig::from_env()?)?;
//!
//! let settings = facade.get_settings(None).await?;
//! let posts = facade.get_all_posts(None).await?;
//!
//! // Draft content needs a preview token
//! let preview = facade
//!     .get_post_and_more_stories("hello-world", Some("sk-preview"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod facade;
pub mod queries;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::ContentClient;
pub use config::ClientConfig;
pub use error::{ContentError, Result};
pub use facade::ContentFacade;
pub use queries::{ContentQuery, QueryParams};
pub use transport::{HttpTransport, MockTransport, QueryTransport};
pub use types::*;
