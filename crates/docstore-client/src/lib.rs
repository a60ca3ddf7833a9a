//! Batched document reads against a REST document database.
//!
//! A [`Docstore`] holds the connection settings. Each read starts a
//! [`GetBatch`], collects relative document paths, and sends them in a
//! single `batchGet` call; the response is reduced to the documents that
//! exist.
//!
//! ```text
//!  GetBatch::add ──► GetBatch::get ──► BatchGetRequest ──► Transport::post
//!                                                              │
//!  Vec<Document> ◄── reconcile ◄── Vec<BatchGetEntry> ◄────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use docstore_client::{ClientConfig, Docstore};
//!
//! let config = ClientConfig::builder()
//!     .project_id("demo")
//!     .auth_token(token)
//!     .build()?;
//! let client = Docstore::new(config)?;
//!
//! let mut batch = client.batch();
//! batch.add("users/alice").add("users/bob");
//! let docs = batch.get(None).await?;
//! ```

#![doc(html_root_url = "https://docs.rs/docstore-client/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use batch::GetBatch;
pub use client::Docstore;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ClientError, ClientResult};
pub use http::HttpTransport;
pub use transport::Transport;

pub use docstore_core::{Document, FieldMask, Value};

/// Client version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
