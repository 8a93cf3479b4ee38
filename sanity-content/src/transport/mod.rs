//! Query transport abstraction layer.
//!
//! Provides a trait-based seam between the client and the wire:
//! - HTTP query API of the hosted store (reqwest)
//! - Mock transport for testing

pub mod http;
pub mod mock;
pub mod traits;

pub use http::HttpTransport;
pub use mock::{MockTransport, RecordedCall};
pub use traits::QueryTransport;
