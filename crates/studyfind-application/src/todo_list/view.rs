use studyfind_core::todo::{TodoId, TodoRecord};

/// What the list screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// No fetch has completed for the current session yet.
    Loading,
    Populated,
    Empty,
    /// The last fetch failed. The previous projection is still shown.
    Error,
}

/// Immutable snapshot of the list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub status: ListStatus,
    /// Ascending by `created_at`.
    pub items: Vec<TodoRecord>,
    /// A fetch is outstanding; `items` may be stale until it lands.
    pub refreshing: bool,
    /// The record whose delete confirmation is currently open.
    pub pending_delete: Option<TodoId>,
    pub last_error: Option<String>,
}
