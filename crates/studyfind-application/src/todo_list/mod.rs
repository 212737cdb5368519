//! The to-do list screen.

mod controller;
mod view;

pub use controller::TodoListController;
pub use view::{ListStatus, ListView};
