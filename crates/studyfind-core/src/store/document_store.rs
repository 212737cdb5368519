use async_trait::async_trait;

use super::document::{CollectionPath, Document, Fields};
use crate::error::Result;

/// A document database client.
///
/// Errors are reported in store terms (`Unavailable`, `Io`,
/// `Serialization`, `NotFound`); the repository folds them into the to-do
/// taxonomy.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document in `collection` ordered ascending by the
    /// timestamp stored in `order_by`. Documents without that field are not
    /// returned.
    async fn query_ordered(&self, collection: &CollectionPath, order_by: &str)
        -> Result<Vec<Document>>;

    /// Adds a document with a store-assigned id and sets `timestamp_field`
    /// to the store's clock at write time.
    ///
    /// Store clocks are strictly increasing per collection, so a document
    /// written later always sorts after one written earlier.
    async fn add_with_server_timestamp(
        &self,
        collection: &CollectionPath,
        fields: Fields,
        timestamp_field: &str,
    ) -> Result<String>;

    /// Removes one document.
    ///
    /// # Errors
    ///
    /// `StudyError::NotFound` when no document has this id.
    async fn delete(&self, collection: &CollectionPath, id: &str) -> Result<()>;
}
