//! Session identity domain model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError};

/// Opaque identifier of an authenticated principal.
///
/// Never empty; the empty string is what a missing identity looks like on
/// some providers and must not be mistaken for a real user. Never contains
/// `/`, since the uid is one segment of `userData/{uid}/todoList`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(uid: impl Into<String>) -> Result<Self> {
        let uid = uid.into();
        if uid.trim().is_empty() {
            return Err(StudyError::NoSession);
        }
        if uid.contains('/') {
            return Err(StudyError::InvalidUserId(uid));
        }
        Ok(Self(uid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = StudyError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The currently authenticated principal.
///
/// Absence of a session is modelled as `Option<SessionIdentity>::None`
/// everywhere in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub uid: UserId,
}

impl SessionIdentity {
    pub fn new(uid: UserId) -> Self {
        Self { uid }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_rejects_blank() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn test_user_id_rejects_slash() {
        assert_eq!(
            UserId::new("a/b").unwrap_err(),
            StudyError::InvalidUserId("a/b".to_string())
        );
        assert!(UserId::new("/").is_err());

        let parsed: std::result::Result<UserId, _> = serde_json::from_str("\"u1/todoList\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_user_id_roundtrips_through_json() {
        let uid = UserId::new("u1").unwrap();
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"u1\"");
        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, uid);
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }
}
