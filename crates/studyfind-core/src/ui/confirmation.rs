use serde::{Deserialize, Serialize};

/// What the shell should show in a yes/no dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub title: String,
    pub message: String,
    pub proceed_label: String,
    pub cancel_label: String,
}

/// The user's answer to a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationOutcome {
    Proceed,
    Cancel,
}

impl ConfirmationOutcome {
    pub fn is_proceed(self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Presents confirmation dialogs.
///
/// `present` only opens the dialog. The shell reports the answer later by
/// calling the owning screen's `resolve_confirmation`, so the screen sits in
/// an explicit "awaiting confirmation" state in between.
pub trait ConfirmationDialog: Send + Sync {
    fn present(&self, request: ConfirmationRequest);
}
