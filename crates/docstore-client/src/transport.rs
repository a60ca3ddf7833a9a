//! Transport abstraction.
//!
//! A [`Transport`] issues one POST against a named API route and returns the
//! JSON response body. Base URL, credentials, timeouts and TLS live inside
//! the implementation; callers only name the route.

use async_trait::async_trait;

use crate::error::ClientResult;

/// Executes API calls.
///
/// Implementations must turn a non-success HTTP status into an error; a
/// returned `Ok` body is always a success response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` to `route` and returns the decoded JSON response.
    async fn post(&self, route: &str, body: &serde_json::Value) -> ClientResult<serde_json::Value>;
}
