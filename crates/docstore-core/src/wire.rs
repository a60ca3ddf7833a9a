//! Batch-read request and response wire types.
//!
//! # Request
//!
//! ```text
//! { "documents": ["projects/p/databases/d/documents/users/alice", ...],
//!   "mask": { "fieldPaths": ["name", "age"] } }
//! ```
//!
//! # Response
//!
//! An array with one entry per requested document, in an order chosen by the
//! server. An entry either carries `found` (the document) or `missing` (the
//! requested name):
//!
//! ```text
//! [ { "found": { "name": "...", "fields": {...} }, "readTime": "..." },
//!   { "missing": "projects/p/databases/d/documents/users/bob", "readTime": "..." } ]
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::RawDocument;

/// Route of the batch-read call, relative to the documents base URL.
pub const BATCH_GET_ROUTE: &str = "batchGet";

/// Set of field paths restricting which fields are returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMask {
    /// Dotted field paths.
    pub field_paths: Vec<String>,
}

impl FieldMask {
    /// Creates a mask from field paths.
    pub fn new<I, S>(field_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_paths: field_paths.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request body of a batch read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetRequest {
    /// Absolute names of the requested documents, in request order.
    pub documents: Vec<String>,
    /// Mask applied to every document in the batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<FieldMask>,
}

impl BatchGetRequest {
    /// Creates a request.
    pub fn new(documents: Vec<String>, mask: Option<FieldMask>) -> Self {
        Self { documents, mask }
    }
}

/// One entry of a batch-read response.
///
/// The wire format signals the outcome by the presence of the `found` key;
/// this type makes it an explicit variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBatchGetEntry", into = "RawBatchGetEntry")]
pub enum BatchGetEntry {
    /// The document exists.
    Found {
        /// Document payload.
        document: RawDocument,
        /// Time at which the document was read.
        read_time: Option<DateTime<Utc>>,
    },
    /// The document does not exist.
    Missing {
        /// Absolute name that was requested.
        path: Option<String>,
        /// Time at which the absence was observed.
        read_time: Option<DateTime<Utc>>,
    },
}

impl BatchGetEntry {
    /// Creates a found entry.
    pub fn found(document: RawDocument, read_time: Option<DateTime<Utc>>) -> Self {
        Self::Found {
            document,
            read_time,
        }
    }

    /// Creates a missing entry.
    pub fn missing(path: impl Into<String>, read_time: Option<DateTime<Utc>>) -> Self {
        Self::Missing {
            path: Some(path.into()),
            read_time,
        }
    }

    /// Returns true for [`BatchGetEntry::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The entry's read time.
    pub fn read_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Found { read_time, .. } | Self::Missing { read_time, .. } => *read_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBatchGetEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    found: Option<RawDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    missing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    read_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    #[allow(dead_code)]
    transaction: Option<String>,
}

impl From<RawBatchGetEntry> for BatchGetEntry {
    fn from(raw: RawBatchGetEntry) -> Self {
        match raw.found {
            Some(document) => Self::Found {
                document,
                read_time: raw.read_time,
            },
            None => Self::Missing {
                path: raw.missing,
                read_time: raw.read_time,
            },
        }
    }
}

impl From<BatchGetEntry> for RawBatchGetEntry {
    fn from(entry: BatchGetEntry) -> Self {
        match entry {
            BatchGetEntry::Found {
                document,
                read_time,
            } => Self {
                found: Some(document),
                missing: None,
                read_time,
                transaction: None,
            },
            BatchGetEntry::Missing { path, read_time } => Self {
                found: None,
                missing: path,
                read_time,
                transaction: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_with_mask() {
        let request = BatchGetRequest::new(
            vec!["projects/p/databases/d/documents/users/alice".to_string()],
            Some(FieldMask::new(["name", "age"])),
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "documents": ["projects/p/databases/d/documents/users/alice"],
                "mask": {"fieldPaths": ["name", "age"]}
            })
        );
    }

    #[test]
    fn test_request_without_mask_omits_key() {
        let request = BatchGetRequest::new(Vec::new(), None);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json, json!({"documents": []}));
        assert!(json.get("mask").is_none());
    }

    #[test]
    fn test_decode_found_entry() {
        let entry: BatchGetEntry = serde_json::from_value(json!({
            "found": {
                "name": "projects/p/databases/d/documents/users/alice",
                "fields": {"name": {"stringValue": "Alice"}}
            },
            "readTime": "2024-05-01T12:00:00Z"
        }))
        .unwrap();

        assert!(entry.is_found());
        assert_eq!(entry.read_time(), Some("2024-05-01T12:00:00Z".parse().unwrap()));
        match entry {
            BatchGetEntry::Found { document, .. } => {
                assert_eq!(document.fields["name"].as_str(), Some("Alice"));
            }
            BatchGetEntry::Missing { .. } => panic!("expected found entry"),
        }
    }

    #[test]
    fn test_decode_missing_entry() {
        let entry: BatchGetEntry = serde_json::from_value(json!({
            "missing": "projects/p/databases/d/documents/users/bob",
            "readTime": "2024-05-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(
            entry,
            BatchGetEntry::Missing {
                path: Some("projects/p/databases/d/documents/users/bob".to_string()),
                read_time: Some("2024-05-01T12:00:00Z".parse().unwrap()),
            }
        );
    }

    #[test]
    fn test_decode_entry_without_found_is_missing() {
        let entry: BatchGetEntry =
            serde_json::from_value(json!({"transaction": "dHg="})).unwrap();
        assert_eq!(
            entry,
            BatchGetEntry::Missing {
                path: None,
                read_time: None
            }
        );
    }

    #[test]
    fn test_decode_rejects_malformed_document() {
        let result = serde_json::from_value::<BatchGetEntry>(json!({
            "found": {
                "name": "projects/p/databases/d/documents/a/b",
                "fields": {"n": {"integerValue": "not-a-number"}}
            }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_entries_match_wire_shape() {
        let read_time = "2024-05-01T12:00:00Z".parse().unwrap();
        let missing = BatchGetEntry::missing("projects/p/databases/d/documents/x/y", Some(read_time));
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({
                "missing": "projects/p/databases/d/documents/x/y",
                "readTime": "2024-05-01T12:00:00Z"
            })
        );

        let found = BatchGetEntry::found(RawDocument::new("projects/p/databases/d/documents/x/z"), None);
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["found"]["name"], "projects/p/databases/d/documents/x/z");
        assert!(json.get("missing").is_none());
    }
}
