//! # Docstore
//!
//! **Batched point reads for REST document databases**
//!
//! Docstore reads many documents by path in a single round trip:
//!
//! - **One request per batch** - paths accumulate locally and go out in one `batchGet` call
//! - **Existing documents only** - absent documents are dropped from the result
//! - **Field masks** - optionally restrict the fields returned for every document
//! - **Pluggable transport** - HTTP by default, in-memory for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docstore::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_telemetry(&TelemetryConfig::default())?;
//!
//!     let client = Docstore::from_env()?;
//!     let mut batch = client.batch();
//!     batch.add("users/alice").add("users/bob");
//!
//!     for doc in batch.get(Some(FieldMask::new(["name"]))).await? {
//!         println!("{} = {:?}", doc.path(), doc.get("name"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! GetBatch::add → GetBatch::get → Transport::post(batchGet) → reconcile → Vec<Document>
//! ```

#![doc(html_root_url = "https://docs.rs/docstore/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export document model and wire types
pub use docstore_core as core;

// Re-export client types
pub use docstore_client as client;

// Re-export logging and metrics setup
pub use docstore_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use docstore::prelude::*;
/// ```
pub mod prelude {
    pub use docstore_core::{Document, FieldMask, Fields, GeoPoint, Value};

    pub use docstore_client::{
        ClientConfig, ClientError, ClientResult, Docstore, GetBatch, Transport,
    };

    pub use docstore_telemetry::{init_telemetry, TelemetryConfig};
}
