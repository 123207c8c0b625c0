//! Identifier newtypes for workspace entities.
//!
//! Identifiers are opaque strings supplied by the caller (or derived from a
//! category key for sections). Wrapping them prevents a member id from being
//! passed where a section id is expected.

use serde::{Deserialize, Serialize};

/// Identifier of a discovery section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a team member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_display() {
        let id = SectionId::new("problem");
        assert_eq!(id.to_string(), "problem");
        assert_eq!(id.as_str(), "problem");
    }

    #[test]
    fn test_ids_are_distinct_types() {
        let section = SectionId::from("alpha");
        let member = MemberId::from("alpha");
        assert_eq!(section.as_str(), member.as_str());
    }

    #[test]
    fn test_serde_transparent() {
        let id = MemberId::new("maria");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""maria""#);
        let back: MemberId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
