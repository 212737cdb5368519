//! In-memory DocumentStore implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use studyfind_core::error::{Result, StudyError};
use studyfind_core::store::{CollectionPath, Document, DocumentStore, Fields};

use crate::server_clock::{format_timestamp, next_timestamp};

#[derive(Default)]
struct MemoryCollection {
    /// Insertion order; the tie-breaker when timestamps are equal.
    documents: Vec<Document>,
    last_timestamp: Option<DateTime<Utc>>,
}

/// Process-local document store.
///
/// Contents are lost when the process exits. Every trait call is counted,
/// which lets callers assert that an operation never reached the store.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<CollectionPath, MemoryCollection>>,
    operations: AtomicUsize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `DocumentStore` calls served so far.
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Number of documents currently held in `collection`.
    pub async fn document_count(&self, collection: &CollectionPath) -> usize {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .map(|c| c.documents.len())
            .unwrap_or(0)
    }

    /// Inserts a document verbatim, bypassing id and timestamp assignment.
    ///
    /// Meant for seeding fixtures such as documents written by older clients.
    pub async fn insert_raw(&self, collection: &CollectionPath, document: Document) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.clone())
            .or_default()
            .documents
            .push(document);
    }

    fn count_operation(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query_ordered(
        &self,
        collection: &CollectionPath,
        order_by: &str,
    ) -> Result<Vec<Document>> {
        self.count_operation();
        let collections = self.collections.read().await;
        let Some(stored) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut keyed: Vec<(DateTime<Utc>, &Document)> = stored
            .documents
            .iter()
            .filter_map(|doc| doc.timestamp(order_by).map(|ts| (ts, doc)))
            .collect();
        keyed.sort_by_key(|(ts, _)| *ts);

        Ok(keyed.into_iter().map(|(_, doc)| doc.clone()).collect())
    }

    async fn add_with_server_timestamp(
        &self,
        collection: &CollectionPath,
        mut fields: Fields,
        timestamp_field: &str,
    ) -> Result<String> {
        self.count_operation();
        let mut collections = self.collections.write().await;
        let stored = collections.entry(collection.clone()).or_default();

        let ts = next_timestamp(stored.last_timestamp);
        stored.last_timestamp = Some(ts);
        fields.insert(
            timestamp_field.to_string(),
            serde_json::Value::String(format_timestamp(ts)),
        );

        let id = Uuid::new_v4().simple().to_string();
        stored.documents.push(Document {
            id: id.clone(),
            fields,
        });

        Ok(id)
    }

    async fn delete(&self, collection: &CollectionPath, id: &str) -> Result<()> {
        self.count_operation();
        let mut collections = self.collections.write().await;
        let stored = collections
            .get_mut(collection)
            .ok_or_else(|| StudyError::not_found("document", id))?;

        let position = stored
            .documents
            .iter()
            .position(|doc| doc.id == id)
            .ok_or_else(|| StudyError::not_found("document", id))?;
        stored.documents.remove(position);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use studyfind_core::auth::UserId;

    fn path(uid: &str) -> CollectionPath {
        CollectionPath::todo_list(&UserId::new(uid).unwrap())
    }

    fn fields(title: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert("title".to_string(), json!(title));
        fields
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_timestamp() {
        let store = MemoryDocumentStore::new();
        let id = store
            .add_with_server_timestamp(&path("u1"), fields("a"), "createdAt")
            .await
            .unwrap();

        let docs = store.query_ordered(&path("u1"), "createdAt").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert!(docs[0].timestamp("createdAt").is_some());
        assert_eq!(store.operation_count(), 2);
    }

    #[tokio::test]
    async fn test_query_orders_ascending_and_skips_untimestamped() {
        let store = MemoryDocumentStore::new();
        let collection = path("u1");

        store
            .insert_raw(
                &collection,
                Document {
                    id: "late".to_string(),
                    fields: serde_json::from_value(
                        json!({"title": "late", "createdAt": "2030-01-01T00:00:00Z"}),
                    )
                    .unwrap(),
                },
            )
            .await;
        store
            .insert_raw(
                &collection,
                Document {
                    id: "untimed".to_string(),
                    fields: fields("untimed"),
                },
            )
            .await;
        store
            .add_with_server_timestamp(&collection, fields("now"), "createdAt")
            .await
            .unwrap();

        let ids: Vec<String> = store
            .query_ordered(&collection, "createdAt")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();

        assert_eq!(ids.len(), 2);
        assert_eq!(ids[1], "late");
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store
            .add_with_server_timestamp(&path("u1"), fields("mine"), "createdAt")
            .await
            .unwrap();

        assert!(store.query_ordered(&path("u2"), "createdAt").await.unwrap().is_empty());
        assert_eq!(store.document_count(&path("u1")).await, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = MemoryDocumentStore::new();
        let err = store.delete(&path("u1"), "nope").await.unwrap_err();
        assert!(err.is_not_found());

        let id = store
            .add_with_server_timestamp(&path("u1"), fields("a"), "createdAt")
            .await
            .unwrap();
        store.delete(&path("u1"), &id).await.unwrap();
        assert!(store.delete(&path("u1"), &id).await.unwrap_err().is_not_found());
    }
}
