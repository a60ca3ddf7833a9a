//! Core types for docstore batch reads.
//!
//! This crate holds everything that does not touch the network:
//!
//! - [`Value`] and [`Document`]: the decoded document model
//! - [`BatchGetRequest`] and [`BatchGetEntry`]: the batch-read wire format
//! - [`DocumentRoot`]: resolution of relative paths to absolute names
//! - [`reconcile`]: mapping of response entries to found documents
//!
//! # Example
//!
//! ```
//! use docstore_core::{reconcile, BatchGetEntry, RawDocument};
//!
//! let read_time = "2024-05-01T12:00:00Z".parse().ok();
//! let entries = vec![
//!     BatchGetEntry::found(
//!         RawDocument::new("projects/p/databases/d/documents/users/alice")
//!             .with_field("name", "Alice"),
//!         read_time,
//!     ),
//!     BatchGetEntry::missing("projects/p/databases/d/documents/users/bob", read_time),
//! ];
//!
//! let docs = reconcile(&entries);
//! assert_eq!(docs.len(), 1);
//! assert_eq!(docs[0].id(), "alice");
//! ```

#![doc(html_root_url = "https://docs.rs/docstore-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod path;
pub mod reconcile;
pub mod value;
pub mod wire;

pub use document::{Document, RawDocument};
pub use error::{CoreError, CoreResult};
pub use path::DocumentRoot;
pub use reconcile::reconcile;
pub use value::{Fields, GeoPoint, Value};
pub use wire::{BatchGetEntry, BatchGetRequest, FieldMask, BATCH_GET_ROUTE};
