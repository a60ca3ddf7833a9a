//! Canned configuration and batch-read entries.
//!
//! Entry builders take paths relative to [`ROOT`], the document root of
//! [`config`].

use std::time::{Duration, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use docstore_client::ClientConfig;
use docstore_core::{BatchGetEntry, RawDocument};
use serde_json::Value;

/// Project of [`config`].
pub const PROJECT_ID: &str = "demo";

/// Document root of [`config`].
pub const ROOT: &str = "projects/demo/databases/(default)/documents/";

/// Seconds since the epoch of [`read_time`].
const READ_TIME_SECS: u64 = 1_714_564_800;

/// Client configuration pointing at project [`PROJECT_ID`] on the default
/// database.
pub fn config() -> ClientConfig {
    ClientConfig {
        project_id: PROJECT_ID.to_string(),
        ..ClientConfig::default()
    }
}

/// Fixed read time, `2024-05-01T12:00:00Z`.
pub fn read_time() -> DateTime<Utc> {
    DateTime::from(UNIX_EPOCH + Duration::from_secs(READ_TIME_SECS))
}

/// Read time `seconds` after [`read_time`].
pub fn read_time_plus(seconds: i64) -> DateTime<Utc> {
    read_time() + chrono::Duration::seconds(seconds)
}

/// Absolute name of a relative path.
pub fn name(path: &str) -> String {
    format!("{ROOT}{path}")
}

/// Empty document payload at `path`.
pub fn document(path: &str) -> RawDocument {
    RawDocument::new(name(path))
}

/// Found entry for an empty document at `path`.
pub fn found(path: &str, read_time: DateTime<Utc>) -> BatchGetEntry {
    BatchGetEntry::found(document(path), Some(read_time))
}

/// Found entry carrying `document` as is.
pub fn found_document(document: RawDocument, read_time: DateTime<Utc>) -> BatchGetEntry {
    BatchGetEntry::found(document, Some(read_time))
}

/// Missing entry for `path`.
pub fn missing(path: &str, read_time: DateTime<Utc>) -> BatchGetEntry {
    BatchGetEntry::missing(name(path), Some(read_time))
}

/// Wire JSON of a list of entries.
pub fn response(entries: &[BatchGetEntry]) -> Value {
    serde_json::to_value(entries).unwrap_or_else(|_| Value::Array(Vec::new()))
}
