//! Mock transport for testing.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use super::traits::QueryTransport;
use crate::config::ClientConfig;
use crate::error::{ContentError, Result};
use crate::queries::{ContentQuery, QueryParams};

/// A call the mock received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub query: ContentQuery,
    pub params: QueryParams,
    /// Config snapshot the call was made under
    pub config: ClientConfig,
}

/// Mock transport for testing.
///
/// Answers each query with a configured result (null when none is set) and
/// records every call.
pub struct MockTransport {
    responses: Mutex<HashMap<ContentQuery, Value>>,
    calls: Mutex<Vec<RecordedCall>>,
    available: AtomicBool,
    call_count: AtomicU32,
}

impl MockTransport {
    /// Create a mock that answers null to everything.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            call_count: AtomicU32::new(0),
        }
    }

    /// Set the result for a query.
    pub fn with_response(self, query: ContentQuery, result: Value) -> Self {
        self.set_response(query, result);
        self
    }

    /// Set availability. An unavailable mock fails every call.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Replace the result for a query.
    pub fn set_response(&self, query: ContentQuery, result: Value) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(query, result);
    }

    /// Number of fetches received.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Most recent call.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryTransport for MockTransport {
    async fn fetch(
        &self,
        config: &ClientConfig,
        query: ContentQuery,
        params: &QueryParams,
    ) -> Result<Option<Value>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                query,
                params: params.clone(),
                config: config.clone(),
            });

        if !self.available.load(Ordering::SeqCst) {
            return Err(ContentError::Transport("Mock transport disabled".to_string()));
        }

        query.check_params(params)?;

        let result = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&query)
            .cloned();

        Ok(result.filter(|v| !v.is_null()))
    }
}
