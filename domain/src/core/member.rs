//! Team member value object

use super::ids::MemberId;
use serde::{Deserialize, Serialize};

/// A member of the product team (Value Object)
///
/// Carries the display name used when attributing responses inside
/// analysis and consensus prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: String,
}

impl Member {
    /// Create a new member
    ///
    /// # Panics
    /// Panics if the display name is empty or only whitespace
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.trim().is_empty(), "Member name cannot be empty");
        Self { id: id.into(), name }
    }

    /// Try to create a new member, returning None if the name is invalid
    pub fn try_new(id: impl Into<MemberId>, name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self { id: id.into(), name })
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    /// Display name shown in prompts and reports
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_creation() {
        let member = Member::new(MemberId::new("maria"), "Maria");
        assert_eq!(member.id().as_str(), "maria");
        assert_eq!(member.name(), "Maria");
    }

    #[test]
    #[should_panic]
    fn test_empty_name_panics() {
        Member::new(MemberId::new("x"), "   ");
    }

    #[test]
    fn test_try_new() {
        assert!(Member::try_new(MemberId::new("x"), "").is_none());
        assert!(Member::try_new(MemberId::new("x"), "Jo").is_some());
    }

    #[test]
    fn test_display_uses_name() {
        let member = Member::new(MemberId::new("jo"), "Jo Smith");
        assert_eq!(member.to_string(), "Jo Smith");
    }
}
