//! Application layer for studyfind.
//!
//! This crate holds the screen controllers of the to-do feature and the
//! wiring that connects them to the infrastructure layer.

pub mod bootstrap;
pub mod ports;
pub mod session;
pub mod todo_creation;
pub mod todo_list;

#[cfg(test)]
mod test_support;

pub use bootstrap::AppServices;
pub use ports::ScreenPorts;
pub use session::SessionTracker;
pub use todo_creation::{CreationGate, CreationPhase, CreationView, TodoCreationController};
pub use todo_list::{ListStatus, ListView, TodoListController};
