//! # Docstore Test
//!
//! Test utilities for code built on `docstore-client`. Batch reads run
//! against an in-memory [`MockTransport`] instead of a live database, and
//! [`fixtures`] builds the response entries the mock replies with.
//!
//! ## Example
//!
//! ```ignore
//! use docstore_client::Docstore;
//! use docstore_test::{fixtures, MockTransport};
//!
//! #[tokio::test]
//! async fn test_reads_alice() {
//!     let mock = MockTransport::with_entries(vec![
//!         fixtures::found("users/alice", fixtures::read_time()),
//!         fixtures::missing("users/bob", fixtures::read_time()),
//!     ]);
//!     let client = Docstore::with_transport(fixtures::config(), mock.clone());
//!
//!     let mut batch = client.batch();
//!     batch.add("users/alice").add("users/bob");
//!     let docs = batch.get(None).await.unwrap();
//!
//!     assert_eq!(docs.len(), 1);
//!     assert_eq!(mock.request_count(), 1);
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/docstore-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod fixtures;
mod transport;

pub use transport::{MockTransport, RecordedRequest};
