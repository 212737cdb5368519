pub mod config_service;
pub mod document_todo_repository;
pub mod dto;
pub mod local_auth_provider;
pub mod memory_document_store;
pub mod paths;
pub mod rest_document_store;
pub mod storage;
pub mod toml_document_store;

mod firestore_codec;
mod server_clock;

pub use crate::config_service::ConfigService;
pub use crate::document_todo_repository::DocumentTodoRepository;
pub use crate::local_auth_provider::LocalAuthProvider;
pub use crate::memory_document_store::MemoryDocumentStore;
pub use crate::paths::StudyfindPaths;
pub use crate::rest_document_store::RestDocumentStore;
pub use crate::toml_document_store::TomlDocumentStore;
