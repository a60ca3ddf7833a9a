//! In-memory transport.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use docstore_client::{ClientError, ClientResult, Transport};
use docstore_core::BatchGetEntry;
use parking_lot::Mutex;
use serde_json::Value;

use crate::fixtures;

type Handler = dyn Fn(&str, &Value) -> ClientResult<Value> + Send + Sync;

/// A call received by a [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Route the call was sent to, e.g. `batchGet`.
    pub route: String,
    /// JSON body of the call.
    pub body: Value,
}

impl RecordedRequest {
    /// Requested document names, if the body carries a `documents` array.
    pub fn documents(&self) -> Vec<&str> {
        self.body
            .get("documents")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Field paths of the `mask`, or `None` when the body has no mask.
    pub fn mask(&self) -> Option<Vec<&str>> {
        self.body
            .get("mask")?
            .get("fieldPaths")?
            .as_array()
            .map(|paths| paths.iter().filter_map(Value::as_str).collect())
    }
}

/// Transport that answers from a closure and records every call.
///
/// Clones share the same handler and the same request log, so a test can
/// keep one clone for assertions after handing another to the client.
#[derive(Clone)]
pub struct MockTransport {
    handler: Arc<Handler>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Creates a mock that answers each call with `handler(route, body)`.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> ClientResult<Value> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock that always replies with `body`.
    pub fn respond_with(body: Value) -> Self {
        Self::new(move |_, _| Ok(body.clone()))
    }

    /// Creates a mock that always replies with the given entries.
    pub fn with_entries(entries: Vec<BatchGetEntry>) -> Self {
        Self::respond_with(fixtures::response(&entries))
    }

    /// Creates a mock that always fails with an upstream error.
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_, _| Err(ClientError::upstream(message.clone(), status)))
    }

    /// Creates a mock whose calls never reach the server.
    pub fn unreachable() -> Self {
        Self::new(|_, _| Err(ClientError::transport("connection refused")))
    }

    /// All recorded calls, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Number of recorded calls.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// The most recent call.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Forgets all recorded calls.
    pub fn clear(&self) {
        self.requests.lock().clear();
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("requests", &self.request_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(&self, route: &str, body: &Value) -> ClientResult<Value> {
        self.requests.lock().push(RecordedRequest {
            route: route.to_string(),
            body: body.clone(),
        });
        (self.handler)(route, body)
    }
}
