//! To-do document DTO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use studyfind_core::error::{Result, StudyError};
use studyfind_core::store::{Document, Fields};
use studyfind_core::todo::{NewTodo, TodoId, TodoRecord};

/// Field layout of one document in `userData/{uid}/todoList`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDocumentDTO {
    #[serde(alias = "textTitle")]
    pub title: String,
    #[serde(alias = "textDetail")]
    pub detail: String,
    pub created_at: DateTime<Utc>,
}

impl TodoDocumentDTO {
    /// Parses a raw store document into a domain record.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Serialization` when a field is missing or has
    /// the wrong type.
    pub fn from_document(document: &Document) -> Result<TodoRecord> {
        let dto: Self = serde_json::from_value(Value::Object(document.fields.clone()))
            .map_err(|e| StudyError::Serialization {
                format: "document".to_string(),
                message: format!("{} ({})", e, document.id),
            })?;

        Ok(TodoRecord {
            id: TodoId::new(document.id.clone()),
            title: dto.title,
            detail: dto.detail,
            created_at: dto.created_at,
        })
    }

    /// Fields written on creation. `createdAt` is left to the store.
    pub fn new_fields(todo: &NewTodo) -> Fields {
        let mut fields = Fields::new();
        fields.insert("title".to_string(), Value::from(todo.title()));
        fields.insert("detail".to_string(), Value::from(todo.detail()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(fields: Value) -> Document {
        Document {
            id: "doc-1".to_string(),
            fields: fields.as_object().cloned().unwrap(),
        }
    }

    #[test]
    fn test_from_document() {
        let record = TodoDocumentDTO::from_document(&document(json!({
            "title": "Read",
            "detail": "Ch.1",
            "createdAt": "2024-05-01T10:00:00Z"
        })))
        .unwrap();

        assert_eq!(record.id.as_str(), "doc-1");
        assert_eq!(record.title, "Read");
        assert_eq!(record.detail, "Ch.1");
        assert_eq!(record.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_from_document_reads_legacy_names() {
        let record = TodoDocumentDTO::from_document(&document(json!({
            "textTitle": "Old",
            "textDetail": "written by the first client",
            "createdAt": "2023-01-01T00:00:00.123456Z"
        })))
        .unwrap();

        assert_eq!(record.title, "Old");
        assert_eq!(record.detail, "written by the first client");
    }

    #[test]
    fn test_from_document_rejects_missing_timestamp() {
        let err = TodoDocumentDTO::from_document(&document(json!({
            "title": "Read",
            "detail": "Ch.1"
        })))
        .unwrap_err();

        assert!(err.is_serialization());
        assert!(err.to_string().contains("doc-1"));
    }

    #[test]
    fn test_new_fields() {
        let todo = NewTodo::new("Read", "Ch.1").unwrap();
        let fields = TodoDocumentDTO::new_fields(&todo);

        assert_eq!(fields.get("title"), Some(&json!("Read")));
        assert_eq!(fields.get("detail"), Some(&json!("Ch.1")));
        assert_eq!(fields.len(), 2);
    }
}
