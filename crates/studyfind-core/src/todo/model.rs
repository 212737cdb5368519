//! To-do domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError, TodoField};

/// Store-assigned identifier of a to-do document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted to-do entry, normalized from a raw store document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    pub id: TodoId,
    pub title: String,
    /// Free text, may span multiple lines.
    pub detail: String,
    /// Assigned by the store at write time; the only sort key.
    pub created_at: DateTime<Utc>,
}

/// A title/detail pair that has passed validation.
///
/// The only way to obtain one is [`NewTodo::new`], so every write path holds
/// proof that neither field is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    title: String,
    detail: String,
}

impl NewTodo {
    /// Validates the pair. Whitespace-only text counts as empty.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` naming the first empty field
    /// (title before detail).
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let detail = detail.into();

        if title.trim().is_empty() {
            return Err(StudyError::validation(TodoField::Title));
        }
        if detail.trim().is_empty() {
            return Err(StudyError::validation(TodoField::Detail));
        }

        Ok(Self { title, detail })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Unsaved, screen-local state for a record being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftTodo {
    pub title: String,
    pub detail: String,
}

impl DraftTodo {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the user has typed anything at all.
    pub fn is_dirty(&self) -> bool {
        !self.title.is_empty() || !self.detail.is_empty()
    }

    /// Validates the draft without consuming it.
    pub fn validate(&self) -> Result<NewTodo> {
        NewTodo::new(self.title.clone(), self.detail.clone())
    }
}
