//! Conflict analysis results and alignment verdicts.

use crate::core::SectionId;
use crate::section::SectionCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a detected conflict, as judged by the model.
///
/// Independent of the similarity score: the score decides whether the
/// analysis call runs at all, severity describes the substance of the
/// disagreement once it does. The two are reported side by side and never
/// reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    Low,
    Medium,
    High,
}

impl ConflictSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictSeverity::Low => "low",
            ConflictSeverity::Medium => "medium",
            ConflictSeverity::High => "high",
        }
    }
}

impl std::fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured output of one conflict-analysis completion call.
///
/// Field names mirror the JSON contract in the analysis prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictAnalysis {
    pub has_conflict: bool,
    #[serde(rename = "conflict_severity")]
    pub severity: ConflictSeverity,
    pub differences: Vec<String>,
    pub areas_of_agreement: Vec<String>,
    pub suggested_merge: String,
    pub reasoning: String,
}

/// Outcome of running conflict detection over a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum AlignmentVerdict {
    /// Fewer than two embedded responses; nothing to compare yet.
    ///
    /// This is a normal state of a young section, not an error: it renders
    /// as "waiting for more responses".
    InsufficientData { found: usize, required: usize },
    /// Minimum pairwise similarity met the threshold. No analysis call made.
    Aligned { score: f32 },
    /// Similarity fell below the threshold and the analysis call ran.
    Conflicting {
        score: f32,
        analysis: ConflictAnalysis,
    },
}

impl AlignmentVerdict {
    pub fn insufficient(found: usize) -> Self {
        AlignmentVerdict::InsufficientData { found, required: 2 }
    }

    pub fn is_aligned(&self) -> bool {
        matches!(self, AlignmentVerdict::Aligned { .. })
    }

    pub fn is_conflicting(&self) -> bool {
        matches!(self, AlignmentVerdict::Conflicting { .. })
    }

    pub fn needs_more_responses(&self) -> bool {
        matches!(self, AlignmentVerdict::InsufficientData { .. })
    }

    /// Minimum pairwise similarity, when it was computed.
    pub fn score(&self) -> Option<f32> {
        match self {
            AlignmentVerdict::Aligned { score } => Some(*score),
            AlignmentVerdict::Conflicting { score, .. } => Some(*score),
            AlignmentVerdict::InsufficientData { .. } => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlignmentVerdict::InsufficientData { .. } => "insufficient data",
            AlignmentVerdict::Aligned { .. } => "aligned",
            AlignmentVerdict::Conflicting { .. } => "conflicting",
        }
    }
}

impl std::fmt::Display for AlignmentVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Full report for one detection run over a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentReport {
    pub section_id: SectionId,
    pub category: SectionCategory,
    pub verdict: AlignmentVerdict,
    /// All submitted (non-draft) responses in the section.
    pub response_count: usize,
    /// Submitted responses that carried an embedding.
    pub embedded_count: usize,
    /// Threshold the minimum pairwise similarity was compared against.
    pub threshold: f32,
    pub analyzed_at: DateTime<Utc>,
}

impl AlignmentReport {
    pub fn new(
        section_id: SectionId,
        category: SectionCategory,
        verdict: AlignmentVerdict,
        response_count: usize,
        embedded_count: usize,
        threshold: f32,
    ) -> Self {
        Self {
            section_id,
            category,
            verdict,
            response_count,
            embedded_count,
            threshold,
            analyzed_at: Utc::now(),
        }
    }
}
