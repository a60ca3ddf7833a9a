//! Database client context.

use std::fmt;
use std::sync::Arc;

use docstore_core::{BatchGetEntry, BatchGetRequest, DocumentRoot, BATCH_GET_ROUTE};
use docstore_telemetry::metrics;

use crate::batch::GetBatch;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpTransport;
use crate::transport::Transport;

/// Handle to one database.
///
/// Owns the configuration and the transport and hands out [`GetBatch`]
/// accumulators. Cheap to share: batches borrow it, and it is `Send + Sync`.
#[derive(Clone)]
pub struct Docstore {
    config: ClientConfig,
    root: DocumentRoot,
    transport: Arc<dyn Transport>,
}

impl Docstore {
    /// Creates a client that talks HTTP to the configured API.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client from defaults plus `DOCSTORE_*` environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::default().with_env_overrides())
    }

    /// Creates a client on top of an existing transport.
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        let root = config.document_root();
        Self {
            config,
            root,
            transport: Arc::new(transport),
        }
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Prefix applied to relative document paths.
    pub fn document_root(&self) -> &DocumentRoot {
        &self.root
    }

    /// Absolute name of a relative document path.
    pub fn resolve_path(&self, path: &str) -> String {
        self.root.resolve(path)
    }

    /// Starts a new batch read.
    pub fn batch(&self) -> GetBatch<'_> {
        GetBatch::new(self)
    }

    /// Sends one batch-read call and decodes its entries.
    ///
    /// Transport errors are returned as produced by the transport.
    pub(crate) async fn batch_get(&self, request: &BatchGetRequest) -> ClientResult<Vec<BatchGetEntry>> {
        let body = serde_json::to_value(request)?;
        let response = self.transport.post(BATCH_GET_ROUTE, &body).await?;

        let entries: Vec<BatchGetEntry> = serde_json::from_value(response)
            .map_err(|e| ClientError::decode(format!("invalid {BATCH_GET_ROUTE} response: {e}")))?;

        let found = entries.iter().filter(|entry| entry.is_found()).count();
        metrics::record_batch_entries(found, entries.len() - found);

        Ok(entries)
    }
}

impl fmt::Debug for Docstore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Docstore")
            .field("base_url", &self.config.base_url())
            .field("root", &self.root.as_str())
            .finish_non_exhaustive()
    }
}
