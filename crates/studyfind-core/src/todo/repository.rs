//! To-do repository trait.
//!
//! Defines the interface for per-user to-do persistence.

use async_trait::async_trait;

use super::model::{TodoId, TodoRecord};
use crate::auth::UserId;
use crate::error::Result;

/// An abstract repository over one user's to-do collection.
///
/// Every operation takes the caller's identity as an `Option`: with `None`
/// the operation fails with `StudyError::NoSession` before any store access.
/// Implementations never retry; failures propagate to the controllers.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Lists the user's records, ascending by `created_at`.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<TodoRecord>)`: all records, oldest first
    /// - `Err(StudyError::NoSession)`: no identity
    /// - `Err(StudyError::Fetch)`: transport or storage failure
    async fn list(&self, uid: Option<&UserId>) -> Result<Vec<TodoRecord>>;

    /// Creates a record and returns its store-assigned id.
    ///
    /// The creation timestamp is assigned by the store, not the client.
    ///
    /// # Returns
    ///
    /// - `Ok(TodoId)`: record persisted
    /// - `Err(StudyError::Validation)`: empty field, nothing was sent
    /// - `Err(StudyError::NoSession)`: no identity
    /// - `Err(StudyError::Write)`: transport or storage failure
    async fn create(&self, uid: Option<&UserId>, title: &str, detail: &str) -> Result<TodoId>;

    /// Deletes exactly one record.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: record removed
    /// - `Err(StudyError::NotFound)`: no record with that id
    /// - `Err(StudyError::NoSession)`: no identity
    /// - `Err(StudyError::Write)`: transport or storage failure
    async fn delete(&self, uid: Option<&UserId>, id: &TodoId) -> Result<()>;
}
