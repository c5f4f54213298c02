//! Document Store Types
//!
//! Both collections (`events` and `users`) hold schemaless JSON objects keyed
//! by an id. This module defines the wire shape of such a document and the
//! conversions between typed records and raw field maps.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Raw top-level fields of a stored document
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Collection holding event documents
pub const EVENTS_COLLECTION: &str = "events";

/// Collection holding profile documents, keyed by auth user id
pub const USERS_COLLECTION: &str = "users";

/// A document as returned by a collection read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Backend-assigned (or caller-chosen, for `set`) document id
    pub id: String,
    /// Document body; never contains the id itself
    pub data: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Decode the body into a typed record
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, SharedError> {
        from_fields(self.data.clone())
    }
}

/// Serialize a record into a field map.
///
/// Fails if the record does not serialize to a JSON object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, SharedError> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(SharedError::serialization(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// Deserialize a field map into a typed record
pub fn from_fields<T: DeserializeOwned>(fields: Fields) -> Result<T, SharedError> {
    Ok(serde_json::from_value(serde_json::Value::Object(fields))?)
}

/// Shallow-merge `changes` into `target`, overwriting top-level keys.
pub fn merge_fields(target: &mut Fields, changes: Fields) {
    for (key, value) in changes {
        target.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        title: String,
        pinned: bool,
    }

    #[test]
    fn test_to_fields_rejects_non_objects() {
        let err = to_fields(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, SharedError::SerializationError { .. }));
    }

    #[test]
    fn test_document_decode() {
        let note = Note {
            title: "hello".to_string(),
            pinned: true,
        };
        let doc = Document::new("n1", to_fields(&note).unwrap());
        assert_eq!(doc.decode::<Note>().unwrap(), note);
    }

    #[test]
    fn test_merge_fields_overwrites_top_level_keys() {
        let mut target = to_fields(&json!({"name": "a", "description": "b"})).unwrap();
        let changes = to_fields(&json!({"name": "c", "email": "d@e"})).unwrap();
        merge_fields(&mut target, changes);

        assert_eq!(target["name"], "c");
        assert_eq!(target["description"], "b");
        assert_eq!(target["email"], "d@e");
    }
}
