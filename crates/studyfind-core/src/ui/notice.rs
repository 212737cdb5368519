use serde::{Deserialize, Serialize};

use crate::error::StudyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    Info,
    Warning,
    Error,
}

/// A non-blocking, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Saved,
    Deleted,
    Validation(String),
    FetchFailed(String),
    WriteFailed(String),
}

impl Notice {
    /// Maps a controller-boundary error to the notice the user should see.
    ///
    /// Returns `None` for errors that are deliberately silent (`NoSession`)
    /// or benign (`NotFound`).
    pub fn from_error(err: &StudyError) -> Option<Self> {
        match err {
            StudyError::NoSession | StudyError::NotFound { .. } => None,
            StudyError::Validation { .. } => Some(Self::Validation(err.to_string())),
            StudyError::Fetch(message) => Some(Self::FetchFailed(message.clone())),
            StudyError::Write(message) => Some(Self::WriteFailed(message.clone())),
            other => Some(Self::WriteFailed(other.to_string())),
        }
    }

    pub fn severity(&self) -> NoticeSeverity {
        match self {
            Self::Saved | Self::Deleted => NoticeSeverity::Info,
            Self::Validation(_) => NoticeSeverity::Warning,
            Self::FetchFailed(_) | Self::WriteFailed(_) => NoticeSeverity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Saved => "Saved!".to_string(),
            Self::Deleted => "Deleted!".to_string(),
            Self::Validation(_) => "Please fill in both the title and the details.".to_string(),
            Self::FetchFailed(reason) => format!("Could not load your to-do list: {reason}"),
            Self::WriteFailed(reason) => format!("Could not save your change: {reason}"),
        }
    }
}

/// Receives notices for display.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
