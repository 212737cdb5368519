pub mod auth;
pub mod config;
pub mod error;
pub mod store;
pub mod todo;
pub mod ui;

// Re-export common error type
pub use error::{Result, StudyError};
