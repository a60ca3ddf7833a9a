//! Documents as returned by the database.
//!
//! [`RawDocument`] is the wire payload of a found document. [`Document`] is
//! the domain object handed to callers: the decoded payload plus the read
//! time of the response that carried it.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::value::{fields_to_json, Fields, Value};

/// Marker separating the database prefix from the relative document path.
const DOCUMENTS_SEGMENT: &str = "/documents/";

/// Wire payload of a found document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// Absolute resource name.
    pub name: String,
    /// Field values.
    #[serde(default)]
    pub fields: Fields,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl RawDocument {
    /// Creates a payload with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Fields::new(),
            create_time: None,
            update_time: None,
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// A document read from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    name: String,
    fields: Fields,
    create_time: Option<DateTime<Utc>>,
    update_time: Option<DateTime<Utc>>,
    read_time: Option<DateTime<Utc>>,
}

impl Document {
    /// Builds a document from its wire payload and the read time reported
    /// alongside it.
    pub fn from_raw(raw: RawDocument, read_time: Option<DateTime<Utc>>) -> Self {
        Self {
            name: raw.name,
            fields: raw.fields,
            create_time: raw.create_time,
            update_time: raw.update_time,
            read_time,
        }
    }

    /// Absolute resource name, e.g.
    /// `projects/p/databases/(default)/documents/users/alice`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last segment of the name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Path relative to the database's document root, e.g. `users/alice`.
    ///
    /// Names without a documents segment are returned unchanged.
    pub fn path(&self) -> &str {
        self.name
            .split_once(DOCUMENTS_SEGMENT)
            .map_or(self.name.as_str(), |(_, path)| path)
    }

    /// All top-level fields.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Looks up a field by dotted path, descending into map values.
    ///
    /// ```
    /// # use docstore_core::{Document, RawDocument, Value, Fields};
    /// let mut address = Fields::new();
    /// address.insert("city".to_string(), Value::from("Oslo"));
    /// let raw = RawDocument::new("projects/p/databases/d/documents/users/alice")
    ///     .with_field("address", address);
    /// let doc = Document::from_raw(raw, None);
    ///
    /// assert_eq!(doc.get("address.city").and_then(Value::as_str), Some("Oslo"));
    /// assert!(doc.get("address.zip").is_none());
    /// ```
    pub fn get(&self, field_path: &str) -> Option<&Value> {
        let mut segments = field_path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    /// Creation time, if reported.
    pub fn create_time(&self) -> Option<DateTime<Utc>> {
        self.create_time
    }

    /// Last update time, if reported.
    pub fn update_time(&self) -> Option<DateTime<Utc>> {
        self.update_time
    }

    /// The point in the database's history at which this document was read.
    pub fn read_time(&self) -> Option<DateTime<Utc>> {
        self.read_time
    }

    /// Fields as a plain JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        fields_to_json(&self.fields)
    }

    /// Deserializes the fields into a caller-defined type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> CoreResult<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_time() -> DateTime<Utc> {
        "2024-05-01T12:00:00Z".parse().unwrap()
    }

    fn alice() -> Document {
        let raw: RawDocument = serde_json::from_value(json!({
            "name": "projects/demo/databases/(default)/documents/users/alice",
            "fields": {
                "name": {"stringValue": "Alice"},
                "age": {"integerValue": "30"},
                "address": {"mapValue": {"fields": {
                    "city": {"stringValue": "Oslo"}
                }}}
            },
            "createTime": "2024-01-01T00:00:00Z",
            "updateTime": "2024-04-01T00:00:00Z"
        }))
        .unwrap();
        Document::from_raw(raw, Some(read_time()))
    }

    #[test]
    fn test_from_raw_keeps_metadata() {
        let doc = alice();
        assert_eq!(doc.read_time(), Some(read_time()));
        assert_eq!(
            doc.create_time(),
            Some("2024-01-01T00:00:00Z".parse().unwrap())
        );
        assert!(doc.update_time().is_some());
    }

    #[test]
    fn test_name_id_path() {
        let doc = alice();
        assert_eq!(
            doc.name(),
            "projects/demo/databases/(default)/documents/users/alice"
        );
        assert_eq!(doc.id(), "alice");
        assert_eq!(doc.path(), "users/alice");
    }

    #[test]
    fn test_path_without_documents_segment() {
        let doc = Document::from_raw(RawDocument::new("users/alice"), None);
        assert_eq!(doc.path(), "users/alice");
        assert_eq!(doc.id(), "alice");
    }

    #[test]
    fn test_get_nested() {
        let doc = alice();
        assert_eq!(doc.get("age").and_then(Value::as_i64), Some(30));
        assert_eq!(doc.get("address.city").and_then(Value::as_str), Some("Oslo"));
        assert!(doc.get("name.first").is_none());
        assert!(doc.get("missing").is_none());
    }

    #[test]
    fn test_field_order_preserved() {
        let doc = alice();
        let names: Vec<&str> = doc.fields().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["name", "age", "address"]);
    }

    #[test]
    fn test_empty_fields_default() {
        let raw: RawDocument =
            serde_json::from_value(json!({"name": "projects/p/databases/d/documents/a/b"}))
                .unwrap();
        assert!(raw.fields.is_empty());
        assert!(raw.create_time.is_none());
    }

    #[test]
    fn test_deserialize_into_struct() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Address {
            city: String,
        }

        #[derive(Debug, Deserialize, PartialEq)]
        struct User {
            name: String,
            age: i64,
            address: Address,
        }

        let user: User = alice().deserialize().unwrap();
        assert_eq!(
            user,
            User {
                name: "Alice".to_string(),
                age: 30,
                address: Address {
                    city: "Oslo".to_string()
                },
            }
        );
    }

    #[test]
    fn test_deserialize_type_mismatch() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrong {
            name: i64,
        }

        assert!(alice().deserialize::<Wrong>().is_err());
    }
}
