//! To-do domain module.
//!
//! This module contains the per-user to-do domain models and the repository
//! interface the screens talk to.
//!
//! # Module Structure
//!
//! - `model`: `TodoRecord`, `NewTodo` (validated input) and `DraftTodo`
//! - `repository`: `TodoRepository` trait
//!
//! # Usage
//!
//! ```ignore
//! use studyfind_core::todo::{DraftTodo, NewTodo, TodoId, TodoRecord, TodoRepository};
//! ```

mod model;
pub mod repository;

pub use model::{DraftTodo, NewTodo, TodoId, TodoRecord};
pub use repository::TodoRepository;
