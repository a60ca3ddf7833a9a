//! HTTP transport backed by `reqwest`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use docstore_telemetry::metrics::{self, STATUS_TRANSPORT_ERROR};
use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{ApiErrorBody, ClientError, ClientResult};
use crate::transport::Transport;

/// Transport that POSTs JSON to `{base_url}:{route}`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client.
    client: Client,
    /// Documents base URL.
    base_url: String,
    /// Bearer token.
    auth_token: Option<String>,
    /// Request timeout.
    timeout: Duration,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ClientError::config(format!("failed to create client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            auth_token: config.auth_token.clone(),
            timeout: config.timeout,
        })
    }

    /// Full URL of a route.
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}:{route}", self.base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, route: &str, body: &serde_json::Value) -> ClientResult<serde_json::Value> {
        let url = self.endpoint(route);
        let started = Instant::now();

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(route = %route, url = %url, "Sending request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(request_failed(route, started, "Request failed", e)),
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return Err(request_failed(route, started, "Failed to read response body", e)),
        };

        let elapsed = started.elapsed();
        metrics::record_request(route, status.as_str(), elapsed);
        metrics::record_response_size(route, bytes.len());

        tracing::debug!(
            route = %route,
            http.status_code = status.as_u16(),
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "Response received"
        );

        if !status.is_success() {
            let message = ApiErrorBody::parse(&bytes).map_or_else(
                || String::from_utf8_lossy(&bytes).into_owned(),
                |body| body.to_string(),
            );
            tracing::warn!(
                route = %route,
                http.status_code = status.as_u16(),
                error = %message,
                "API returned an error"
            );
            return Err(ClientError::upstream(message, status.as_u16()));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::decode(format!("invalid JSON response: {e}")))
    }
}

/// Records and logs a call that ended without a complete response.
fn request_failed(route: &str, started: Instant, what: &str, error: reqwest::Error) -> ClientError {
    metrics::record_request(route, STATUS_TRANSPORT_ERROR, started.elapsed());
    tracing::warn!(route = %route, error = %error, "{what}");
    ClientError::Request(error)
}
