//! Progress notification port
//!
//! Defines the interface for reporting progress during pipeline runs.

/// Phases a pipeline run can pass through.
///
/// Not every run touches every phase: an aligned section never reaches
/// `ConflictAnalysis`, and question generation has no similarity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Embedding,
    Similarity,
    ConflictAnalysis,
    Consensus,
    Questions,
    Document,
}

impl AnalysisPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisPhase::Embedding => "embedding",
            AnalysisPhase::Similarity => "similarity",
            AnalysisPhase::ConflictAnalysis => "conflict analysis",
            AnalysisPhase::Consensus => "consensus",
            AnalysisPhase::Questions => "questions",
            AnalysisPhase::Document => "document",
        }
    }
}

impl std::fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during pipeline runs
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &AnalysisPhase);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &AnalysisPhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &AnalysisPhase) {}
    fn on_phase_complete(&self, _phase: &AnalysisPhase) {}
}
