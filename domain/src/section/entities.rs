//! Section entity

use super::category::SectionCategory;
use crate::core::{ProjectId, SectionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A discovery section within a project.
///
/// A section owns the team's responses for one category and at most one
/// consensus record. There is one section per category per project, so the
/// section id defaults to the category key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub project_id: ProjectId,
    pub category: SectionCategory,
    pub title: String,
    /// Display position in the discovery flow (0-indexed).
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

impl Section {
    pub fn new(project_id: ProjectId, category: SectionCategory, position: u32) -> Self {
        Self {
            id: SectionId::new(category.as_str()),
            project_id,
            category,
            title: category.title().to_string(),
            position,
            created_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_section_defaults() {
        let section = Section::new(ProjectId::new("p1"), SectionCategory::Vision, 2);
        assert_eq!(section.id.as_str(), "vision");
        assert_eq!(section.title, "Product Vision");
        assert_eq!(section.position, 2);
    }

    #[test]
    fn test_with_title_override() {
        let section = Section::new(ProjectId::new("p1"), SectionCategory::Problem, 0)
            .with_title("What hurts?");
        assert_eq!(section.title, "What hurts?");
        assert_eq!(section.category, SectionCategory::Problem);
    }
}
