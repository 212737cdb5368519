//! File-backed DocumentStore implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

use studyfind_core::error::{Result, StudyError};
use studyfind_core::store::{CollectionPath, Document, DocumentStore, Fields};

use crate::server_clock::{format_timestamp, next_timestamp};
use crate::storage::AtomicTomlFile;

/// On-disk shape of one collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CollectionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    documents: Vec<Document>,
}

/// TOML-file document store.
///
/// Directory structure:
/// ```text
/// base_dir/
/// └── userData/
///     └── u1/
///         └── todoList.toml
/// ```
///
/// Each collection file is rewritten atomically on every mutation.
pub struct TomlDocumentStore {
    base_dir: PathBuf,
    /// Serializes read-modify-write cycles inside this process; the file lock
    /// covers other processes.
    write_guard: Mutex<()>,
}

impl TomlDocumentStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            write_guard: Mutex::new(()),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn collection_file(&self, collection: &CollectionPath) -> Result<AtomicTomlFile<CollectionFile>> {
        let mut path = self.base_dir.clone();
        let segments: Vec<&str> = collection.segments().collect();

        for (i, segment) in segments.iter().enumerate() {
            if segment.is_empty()
                || *segment == "."
                || *segment == ".."
                || segment.contains('\\')
            {
                return Err(StudyError::io(format!(
                    "invalid collection path '{}'",
                    collection
                )));
            }
            if i + 1 == segments.len() {
                path.push(format!("{segment}.toml"));
            } else {
                path.push(segment);
            }
        }

        Ok(AtomicTomlFile::new(path))
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StudyError::internal(format!("storage task failed: {}", e)))?
}

#[async_trait]
impl DocumentStore for TomlDocumentStore {
    async fn query_ordered(
        &self,
        collection: &CollectionPath,
        order_by: &str,
    ) -> Result<Vec<Document>> {
        let file = self.collection_file(collection)?;
        let loaded = blocking(move || file.load()).await?.unwrap_or_default();

        let mut keyed: Vec<(DateTime<Utc>, Document)> = loaded
            .documents
            .into_iter()
            .filter_map(|doc| doc.timestamp(order_by).map(|ts| (ts, doc)))
            .collect();
        keyed.sort_by_key(|(ts, _)| *ts);

        Ok(keyed.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn add_with_server_timestamp(
        &self,
        collection: &CollectionPath,
        fields: Fields,
        timestamp_field: &str,
    ) -> Result<String> {
        let file = self.collection_file(collection)?;
        let timestamp_field = timestamp_field.to_string();
        let _guard = self.write_guard.lock().await;

        blocking(move || {
            file.update(CollectionFile::default(), |data| {
                let ts = next_timestamp(data.last_timestamp);
                data.last_timestamp = Some(ts);

                let mut fields = fields;
                fields.insert(
                    timestamp_field,
                    serde_json::Value::String(format_timestamp(ts)),
                );

                let id = Uuid::new_v4().simple().to_string();
                data.documents.push(Document {
                    id: id.clone(),
                    fields,
                });
                Ok(id)
            })
        })
        .await
    }

    async fn delete(&self, collection: &CollectionPath, id: &str) -> Result<()> {
        let file = self.collection_file(collection)?;
        let id = id.to_string();
        let _guard = self.write_guard.lock().await;

        blocking(move || {
            if file.load()?.is_none() {
                return Err(StudyError::not_found("document", id));
            }
            file.update(CollectionFile::default(), |data| {
                let position = data
                    .documents
                    .iter()
                    .position(|doc| doc.id == id)
                    .ok_or_else(|| StudyError::not_found("document", id.clone()))?;
                data.documents.remove(position);
                Ok(())
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use studyfind_core::auth::UserId;
    use tempfile::TempDir;

    fn path(uid: &str) -> CollectionPath {
        CollectionPath::todo_list(&UserId::new(uid).unwrap())
    }

    fn fields(title: &str, detail: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert("title".to_string(), json!(title));
        fields.insert("detail".to_string(), json!(detail));
        fields
    }

    #[tokio::test]
    async fn test_add_query_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlDocumentStore::new(temp_dir.path());

        let first = store
            .add_with_server_timestamp(&path("u1"), fields("a", "1"), "createdAt")
            .await
            .unwrap();
        let second = store
            .add_with_server_timestamp(&path("u1"), fields("b", "2\nlines"), "createdAt")
            .await
            .unwrap();

        assert!(temp_dir.path().join("userData/u1/todoList.toml").exists());

        let docs = store.query_ordered(&path("u1"), "createdAt").await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
        assert_eq!(docs[1].fields["detail"], json!("2\nlines"));

        store.delete(&path("u1"), &first).await.unwrap();
        let docs = store.query_ordered(&path("u1"), "createdAt").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, second);
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let id = {
            let store = TomlDocumentStore::new(temp_dir.path());
            store
                .add_with_server_timestamp(&path("u1"), fields("a", "1"), "createdAt")
                .await
                .unwrap()
        };

        let reopened = TomlDocumentStore::new(temp_dir.path());
        let docs = reopened.query_ordered(&path("u1"), "createdAt").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);

        let later = reopened
            .add_with_server_timestamp(&path("u1"), fields("b", "2"), "createdAt")
            .await
            .unwrap();
        let docs = reopened.query_ordered(&path("u1"), "createdAt").await.unwrap();
        assert_eq!(docs[1].id, later);
    }

    #[tokio::test]
    async fn test_missing_collection() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlDocumentStore::new(temp_dir.path());

        assert!(store.query_ordered(&path("u1"), "createdAt").await.unwrap().is_empty());
        assert!(store.delete(&path("u1"), "x").await.unwrap_err().is_not_found());
        assert!(!temp_dir.path().join("userData").exists());
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlDocumentStore::new(temp_dir.path());
        let evil = CollectionPath::todo_list(&UserId::new("..").unwrap());

        let err = store
            .add_with_server_timestamp(&evil, fields("a", "1"), "createdAt")
            .await
            .unwrap_err();
        assert!(err.is_io());
    }
}
