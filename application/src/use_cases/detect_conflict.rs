//! Detect Conflict use case
//!
//! Decides whether one section's responses agree, using the cheapest
//! signal that answers the question:
//!
//! 1. Fewer than two embedded responses → insufficient data, no model call
//! 2. Minimum pairwise similarity at or above the threshold → aligned,
//!    no model call
//! 3. Below the threshold → exactly one completion call explains the
//!    disagreement and suggests a merge

use crate::config::AnalysisParams;
use crate::ports::analysis_log::{AnalysisEvent, AnalysisLog, NoAnalysisLog};
use crate::ports::completion_gateway::{CompletionError, CompletionGateway, CompletionRequest};
use crate::ports::progress::{AnalysisPhase, NoProgress, ProgressNotifier};
use crate::ports::store::{ResponseStore, SectionStore, StoreError};
use align_domain::similarity::{SimilarityError, min_pairwise_similarity};
use align_domain::{
    AlignmentReport, AlignmentVerdict, AnalysisParseError, AnalysisPrompts, ConflictAnalysis,
    Response, SectionCategory, SectionId, parse_conflict_analysis,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Sampling temperature for the conflict-analysis call. Low, because the
/// output must stay inside a JSON contract.
const CONFLICT_TEMPERATURE: f32 = 0.3;

/// Errors that can occur during conflict detection
#[derive(Error, Debug)]
pub enum DetectConflictError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Parse(#[from] AnalysisParseError),
}

/// Input for the [`DetectConflictUseCase`].
#[derive(Debug, Clone)]
pub struct DetectConflictInput {
    pub section_id: SectionId,
    /// Overrides the configured similarity threshold for this run.
    pub threshold: Option<f32>,
}

impl DetectConflictInput {
    pub fn new(section_id: SectionId) -> Self {
        Self {
            section_id,
            threshold: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

/// Use case for detecting conflicts in a section.
pub struct DetectConflictUseCase {
    sections: Arc<dyn SectionStore>,
    responses: Arc<dyn ResponseStore>,
    completions: Arc<dyn CompletionGateway>,
    params: AnalysisParams,
    analysis_log: Arc<dyn AnalysisLog>,
}

impl DetectConflictUseCase {
    pub fn new(
        sections: Arc<dyn SectionStore>,
        responses: Arc<dyn ResponseStore>,
        completions: Arc<dyn CompletionGateway>,
        params: AnalysisParams,
    ) -> Self {
        Self {
            sections,
            responses,
            completions,
            params,
            analysis_log: Arc::new(NoAnalysisLog),
        }
    }

    pub fn with_analysis_log(mut self, log: Arc<dyn AnalysisLog>) -> Self {
        self.analysis_log = log;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: DetectConflictInput,
    ) -> Result<AlignmentReport, DetectConflictError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: DetectConflictInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<AlignmentReport, DetectConflictError> {
        let section = self.sections.section(&input.section_id).await?;
        let submitted = self.responses.submitted_responses(&input.section_id).await?;
        let threshold = input.threshold.unwrap_or(self.params.similarity_threshold);

        let embedded: Vec<&Response> = submitted.iter().filter(|r| r.has_embedding()).collect();

        info!(
            "Analyzing '{}': {} submitted, {} embedded, threshold {}",
            section.category,
            submitted.len(),
            embedded.len(),
            threshold
        );

        progress.on_phase_start(&AnalysisPhase::Similarity);
        let embeddings: Vec<&[f32]> = embedded
            .iter()
            .filter_map(|r| r.embedding.as_deref())
            .collect();
        let min_similarity = min_pairwise_similarity(&embeddings)?;
        progress.on_phase_complete(&AnalysisPhase::Similarity);

        let verdict = match min_similarity {
            None => {
                debug!("Not enough embedded responses to compare");
                AlignmentVerdict::insufficient(embedded.len())
            }
            Some(score) if score >= threshold => {
                debug!("Aligned at {:.3}, skipping analysis call", score);
                AlignmentVerdict::Aligned { score }
            }
            Some(score) => {
                info!(
                    "Similarity {:.3} below threshold {:.3}, requesting analysis",
                    score, threshold
                );
                let analysis = self
                    .analyze_conflict(section.category, &submitted, progress)
                    .await?;
                AlignmentVerdict::Conflicting { score, analysis }
            }
        };

        let report = AlignmentReport::new(
            section.id,
            section.category,
            verdict,
            submitted.len(),
            embedded.len(),
            threshold,
        );

        self.analysis_log.log(AnalysisEvent::new(
            "conflict_detected",
            serde_json::json!({
                "section_id": report.section_id.as_str(),
                "verdict": report.verdict.label(),
                "score": report.verdict.score(),
                "response_count": report.response_count,
                "embedded_count": report.embedded_count,
                "threshold": report.threshold,
            }),
        ));

        Ok(report)
    }

    /// One completion call over every submitted response, embedded or not.
    /// Similarity decided the escalation; the analysis should still see the
    /// whole team's text.
    async fn analyze_conflict(
        &self,
        category: SectionCategory,
        submitted: &[Response],
        progress: &dyn ProgressNotifier,
    ) -> Result<ConflictAnalysis, DetectConflictError> {
        progress.on_phase_start(&AnalysisPhase::ConflictAnalysis);

        let pairs: Vec<(String, String)> = submitted
            .iter()
            .map(|r| (r.author().to_string(), r.content.clone()))
            .collect();

        let request = CompletionRequest::new(
            AnalysisPrompts::conflict_system(),
            AnalysisPrompts::conflict_prompt(category, &pairs),
        )
        .with_temperature(CONFLICT_TEMPERATURE);

        let raw = self.completions.complete(&request).await?;
        let analysis = parse_conflict_analysis(&raw)?;

        progress.on_phase_complete(&AnalysisPhase::ConflictAnalysis);
        Ok(analysis)
    }
}
