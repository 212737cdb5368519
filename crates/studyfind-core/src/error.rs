//! Error types for the Studyfind application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The field of a to-do entry that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoField {
    Title,
    Detail,
}

impl std::fmt::Display for TodoField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TodoField::Title => write!(f, "title"),
            TodoField::Detail => write!(f, "detail"),
        }
    }
}

/// A shared error type for the entire Studyfind application.
///
/// The first group of variants is the to-do taxonomy surfaced by the
/// repository and handled at the controller boundary. The second group is
/// produced by the storage and configuration layers and gets folded into
/// `Fetch` / `Write` by the repository before a controller ever sees it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StudyError {
    /// No authenticated identity; repository calls are never attempted.
    #[error("No active session")]
    NoSession,

    /// A uid that cannot name a single path segment.
    #[error("Invalid user id '{0}'")]
    InvalidUserId(String),

    /// A required field was empty. Raised locally, before any store access.
    #[error("Validation error: {field} must not be empty")]
    Validation { field: TodoField },

    /// Reading the collection failed.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Creating or deleting a document failed.
    #[error("Write error: {0}")]
    Write(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The backing store could not be reached or rejected the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StudyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for the given field
    pub fn validation(field: TodoField) -> Self {
        Self::Validation { field }
    }

    /// Creates a Fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Creates a Write error
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NoSession error
    pub fn is_no_session(&self) -> bool {
        matches!(self, Self::NoSession)
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Fetch error
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Check if this is a Write error
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Folds a store-level failure into the read side of the taxonomy.
    ///
    /// `NoSession` and `Fetch` pass through unchanged.
    pub fn into_fetch(self) -> Self {
        match self {
            Self::NoSession | Self::Fetch(_) => self,
            other => Self::Fetch(other.to_string()),
        }
    }

    /// Folds a store-level failure into the write side of the taxonomy.
    ///
    /// `NoSession`, `Validation` and `Write` pass through unchanged. A store
    /// `NotFound` becomes `Write` too; callers that treat a missing record as
    /// benign must match it before folding.
    pub fn into_write(self) -> Self {
        match self {
            Self::NoSession | Self::Validation { .. } | Self::Write(_) => self,
            other => Self::Write(other.to_string()),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for StudyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for StudyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for StudyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for StudyError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for StudyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}

/// A type alias for `Result<T, StudyError>`.
pub type Result<T> = std::result::Result<T, StudyError>;
