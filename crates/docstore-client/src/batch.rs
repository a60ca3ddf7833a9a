//! Batched point reads.
//!
//! ```rust,ignore
//! let mut batch = client.batch();
//! batch.add("users/alice").add("users/bob");
//!
//! let docs = batch.get(Some(FieldMask::new(["name"]))).await?;
//! for doc in &docs {
//!     println!("{} read at {:?}", doc.path(), doc.read_time());
//! }
//! ```

use docstore_core::{reconcile, BatchGetRequest, Document, FieldMask};

use crate::client::Docstore;
use crate::error::ClientResult;

/// Accumulates document paths and reads them in one round trip.
///
/// Paths are kept in insertion order and are never validated, normalized or
/// deduplicated. A batch is owned by one task and is not synchronized; use
/// separate batches for concurrent reads.
///
/// `get` leaves the accumulated paths in place, so calling it again resends
/// the same request.
#[derive(Debug)]
pub struct GetBatch<'a> {
    client: &'a Docstore,
    paths: Vec<String>,
}

impl<'a> GetBatch<'a> {
    pub(crate) fn new(client: &'a Docstore) -> Self {
        Self {
            client,
            paths: Vec::new(),
        }
    }

    /// Appends a document path relative to the database root.
    pub fn add(&mut self, path: impl Into<String>) -> &mut Self {
        self.paths.push(path.into());
        self
    }

    /// Paths added so far.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Number of paths added so far.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if no path has been added.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Builds the request body without sending it.
    pub fn request(&self, mask: Option<FieldMask>) -> BatchGetRequest {
        let documents = self
            .paths
            .iter()
            .map(|path| self.client.resolve_path(path))
            .collect();
        BatchGetRequest::new(documents, mask)
    }

    /// Reads every accumulated document in one call.
    ///
    /// `mask` restricts the returned fields of every document. Only documents
    /// that exist are returned, in response order; absent documents are
    /// silently left out. Transport errors are returned unchanged.
    pub async fn get(&self, mask: Option<FieldMask>) -> ClientResult<Vec<Document>> {
        let request = self.request(mask);
        let entries = self.client.batch_get(&request).await?;
        Ok(reconcile(&entries))
    }
}
