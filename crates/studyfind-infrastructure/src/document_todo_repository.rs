//! DocumentStore-backed TodoRepository implementation

use async_trait::async_trait;
use std::sync::Arc;

use studyfind_core::auth::UserId;
use studyfind_core::error::{Result, StudyError};
use studyfind_core::store::{CREATED_AT_FIELD, CollectionPath, DocumentStore};
use studyfind_core::todo::{NewTodo, TodoId, TodoRecord, TodoRepository};

use crate::dto::TodoDocumentDTO;

/// A repository over `userData/{uid}/todoList` in any [`DocumentStore`].
///
/// Responsibilities:
/// - Refuse every call without an identity
/// - Validate new records before anything is sent
/// - Convert between store documents and domain records
/// - Fold store failures into `Fetch` / `Write`
///
/// Does NOT:
/// - Retry (failures go straight to the caller)
/// - Cache (every `list` reads the store)
pub struct DocumentTodoRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentTodoRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn collection(uid: Option<&UserId>) -> Result<CollectionPath> {
        uid.map(CollectionPath::todo_list)
            .ok_or(StudyError::NoSession)
    }
}

#[async_trait]
impl TodoRepository for DocumentTodoRepository {
    async fn list(&self, uid: Option<&UserId>) -> Result<Vec<TodoRecord>> {
        let collection = Self::collection(uid)?;

        let documents = self
            .store
            .query_ordered(&collection, CREATED_AT_FIELD)
            .await
            .map_err(StudyError::into_fetch)?;

        let mut records: Vec<TodoRecord> = documents
            .iter()
            .filter_map(|doc| match TodoDocumentDTO::from_document(doc) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed todo in {}: {}", collection, e);
                    None
                }
            })
            .collect();

        // Stores already order by createdAt; the stable sort keeps that
        // order for ties and guards against stores that don't.
        records.sort_by_key(|r| r.created_at);

        tracing::debug!("Listed {} todos from {}", records.len(), collection);
        Ok(records)
    }

    async fn create(&self, uid: Option<&UserId>, title: &str, detail: &str) -> Result<TodoId> {
        let collection = Self::collection(uid)?;
        let todo = NewTodo::new(title, detail)?;

        let id = self
            .store
            .add_with_server_timestamp(
                &collection,
                TodoDocumentDTO::new_fields(&todo),
                CREATED_AT_FIELD,
            )
            .await
            .map_err(StudyError::into_write)?;

        tracing::info!("Created todo {} in {}", id, collection);
        Ok(TodoId::new(id))
    }

    async fn delete(&self, uid: Option<&UserId>, id: &TodoId) -> Result<()> {
        let collection = Self::collection(uid)?;

        self.store
            .delete(&collection, id.as_str())
            .await
            .map_err(|e| match e {
                StudyError::NotFound { .. } => StudyError::not_found("todo", id.as_str()),
                other => other.into_write(),
            })?;

        tracing::info!("Deleted todo {} from {}", id, collection);
        Ok(())
    }
}
