//! Project-wide alignment summaries built from embeddings alone.

use crate::consensus::ConsensusStatus;
use crate::core::SectionId;
use crate::section::SectionCategory;
use serde::Serialize;

/// Snapshot of one section inside the project overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionAlignment {
    pub section_id: SectionId,
    pub category: SectionCategory,
    pub title: String,
    pub response_count: usize,
    pub embedded_count: usize,
    /// Minimum pairwise similarity across embedded responses, when at
    /// least two exist.
    pub alignment_score: Option<f32>,
    pub consensus_status: Option<ConsensusStatus>,
}

impl SectionAlignment {
    pub fn has_enough_data(&self) -> bool {
        self.embedded_count >= 2
    }
}

/// Alignment overview across every section of a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectAlignment {
    pub sections: Vec<SectionAlignment>,
    /// Mean of the section scores that exist. `None` when no section has
    /// enough data to score.
    pub mean_score: Option<f32>,
}

impl ProjectAlignment {
    pub fn from_sections(sections: Vec<SectionAlignment>) -> Self {
        let scores: Vec<f32> = sections
            .iter()
            .filter_map(|s| s.alignment_score)
            .collect();
        let mean_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f32>() / scores.len() as f32)
        };
        Self {
            sections,
            mean_score,
        }
    }

    pub fn scored_section_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.alignment_score.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(category: SectionCategory, score: Option<f32>) -> SectionAlignment {
        SectionAlignment {
            section_id: SectionId::new(category.as_str()),
            category,
            title: category.title().to_string(),
            response_count: 3,
            embedded_count: if score.is_some() { 3 } else { 1 },
            alignment_score: score,
            consensus_status: None,
        }
    }

    #[test]
    fn test_mean_over_present_scores() {
        let overview = ProjectAlignment::from_sections(vec![
            section(SectionCategory::Problem, Some(0.9)),
            section(SectionCategory::Vision, Some(0.7)),
            section(SectionCategory::Features, None),
        ]);
        assert_eq!(overview.mean_score, Some(0.8));
        assert_eq!(overview.scored_section_count(), 2);
    }

    #[test]
    fn test_no_scores_means_no_mean() {
        let overview = ProjectAlignment::from_sections(vec![
            section(SectionCategory::Problem, None),
        ]);
        assert_eq!(overview.mean_score, None);
        assert_eq!(overview.scored_section_count(), 0);
    }

    #[test]
    fn test_has_enough_data() {
        assert!(section(SectionCategory::Problem, Some(0.5)).has_enough_data());
        assert!(!section(SectionCategory::Problem, None).has_enough_data());
    }
}
