use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TODO_LIST_COLLECTION, USER_DATA_COLLECTION};
use crate::auth::UserId;

/// Field map of a stored document.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Slash-separated path of a collection, e.g. `userData/u1/todoList`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// The to-do collection owned by `uid`.
    pub fn todo_list(uid: &UserId) -> Self {
        Self(format!(
            "{}/{}/{}",
            USER_DATA_COLLECTION,
            uid.as_str(),
            TODO_LIST_COLLECTION
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// The document path that owns this collection (`userData/u1`), if any.
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(parent, _)| parent)
    }

    /// The last path segment (`todoList`).
    pub fn collection_id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw document as returned by a store.
///
/// Timestamps inside `fields` are RFC 3339 strings in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    /// Reads a timestamp field, `None` if absent or unparsable.
    pub fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.fields
            .get(field)
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}
