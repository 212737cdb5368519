//! Document store domain module.
//!
//! The to-do repository is written against a small document-database
//! surface (collections of JSON-shaped documents with store-assigned ids and
//! store-assigned timestamps). Concrete clients live in the infrastructure
//! crate and are injected into the repository constructor.

mod document;
mod document_store;

pub use document::{CollectionPath, Document, Fields};
pub use document_store::DocumentStore;

/// Top-level collection holding one document per user.
pub const USER_DATA_COLLECTION: &str = "userData";

/// Per-user sub-collection holding the to-do documents.
pub const TODO_LIST_COLLECTION: &str = "todoList";

/// Field carrying the store-assigned creation timestamp.
pub const CREATED_AT_FIELD: &str = "createdAt";
