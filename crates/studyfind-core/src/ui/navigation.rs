use serde::{Deserialize, Serialize};

/// Fire-and-forget transitions the screens ask the shell to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationDirective {
    /// Push the to-do creation screen.
    OpenCreationScreen,
    /// Go back to the to-do list, which re-reads on focus.
    ReturnToListScreen,
    /// Pop the current screen.
    ReturnToPreviousScreen,
}

/// The navigation shell.
///
/// Screens never depend on history depth; they only emit directives.
pub trait Navigator: Send + Sync {
    fn navigate(&self, directive: NavigationDirective);
}
