use studyfind_core::todo::DraftTodo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationPhase {
    Editing,
    /// The record was stored.
    Confirmed,
    /// The draft was thrown away.
    Discarded,
}

/// Which confirmation the screen is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationGate {
    Save,
    Discard,
}

/// Immutable snapshot of the creation screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationView {
    pub phase: CreationPhase,
    pub draft: DraftTodo,
    pub gate: Option<CreationGate>,
    pub saving: bool,
    pub intercepting_back: bool,
    pub last_error: Option<String>,
}
