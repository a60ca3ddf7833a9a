//! Mapping of batch-read responses to documents.

use crate::document::Document;
use crate::wire::BatchGetEntry;

/// Turns response entries into the documents that were found.
///
/// Entries are visited in the order given. Each found entry becomes a
/// [`Document`] tagged with the entry's read time; missing entries are
/// skipped without any signal. The output is a sub-sequence of the input
/// and bears no index relation to the requested paths.
pub fn reconcile(entries: &[BatchGetEntry]) -> Vec<Document> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            BatchGetEntry::Found {
                document,
                read_time,
            } => Some(Document::from_raw(document.clone(), *read_time)),
            BatchGetEntry::Missing { .. } => None,
        })
        .collect()
}
