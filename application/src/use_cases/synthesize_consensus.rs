//! Synthesize Consensus use case
//!
//! Merges one section's submitted responses into a single statement via a
//! facilitator completion call. The result is stored as a pending
//! [`Consensus`] record, replacing any previous record for the section.
//! Approval and rejection happen separately.

use crate::ports::analysis_log::{AnalysisEvent, AnalysisLog, NoAnalysisLog};
use crate::ports::completion_gateway::{CompletionError, CompletionGateway, CompletionRequest};
use crate::ports::progress::{AnalysisPhase, NoProgress, ProgressNotifier};
use crate::ports::store::{ConsensusStore, ResponseStore, SectionStore, StoreError};
use align_domain::{
    AnalysisParseError, AnalysisPrompts, Consensus, SectionId, parse_consensus_draft,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Sampling temperature for the consensus call. Some room to rephrase,
/// still anchored to the JSON contract.
const CONSENSUS_TEMPERATURE: f32 = 0.5;

/// Errors that can occur during consensus synthesis
#[derive(Error, Debug)]
pub enum SynthesizeConsensusError {
    /// Unlike conflict detection, synthesis over fewer than two responses
    /// is an error: there is nothing to merge.
    #[error("Need at least 2 submitted responses to synthesize, found {found}")]
    InsufficientData { found: usize },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Parse(#[from] AnalysisParseError),
}

/// Use case for synthesizing a consensus statement.
pub struct SynthesizeConsensusUseCase {
    sections: Arc<dyn SectionStore>,
    responses: Arc<dyn ResponseStore>,
    consensus: Arc<dyn ConsensusStore>,
    completions: Arc<dyn CompletionGateway>,
    analysis_log: Arc<dyn AnalysisLog>,
}

impl SynthesizeConsensusUseCase {
    pub fn new(
        sections: Arc<dyn SectionStore>,
        responses: Arc<dyn ResponseStore>,
        consensus: Arc<dyn ConsensusStore>,
        completions: Arc<dyn CompletionGateway>,
    ) -> Self {
        Self {
            sections,
            responses,
            consensus,
            completions,
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
        section_id: SectionId,
    ) -> Result<Consensus, SynthesizeConsensusError> {
        self.execute_with_progress(section_id, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        section_id: SectionId,
        progress: &dyn ProgressNotifier,
    ) -> Result<Consensus, SynthesizeConsensusError> {
        let section = self.sections.section(&section_id).await?;
        let submitted = self.responses.submitted_responses(&section_id).await?;

        if submitted.len() < 2 {
            return Err(SynthesizeConsensusError::InsufficientData {
                found: submitted.len(),
            });
        }

        info!(
            "Synthesizing consensus for '{}' from {} responses",
            section.category,
            submitted.len()
        );

        let pairs: Vec<(String, String)> = submitted
            .iter()
            .map(|r| (r.author().to_string(), r.content.clone()))
            .collect();

        progress.on_phase_start(&AnalysisPhase::Consensus);
        let request = CompletionRequest::new(
            AnalysisPrompts::consensus_system(),
            AnalysisPrompts::consensus_prompt(section.category, &pairs),
        )
        .with_temperature(CONSENSUS_TEMPERATURE);

        let raw = self.completions.complete(&request).await?;
        let draft = parse_consensus_draft(&raw)?;
        progress.on_phase_complete(&AnalysisPhase::Consensus);

        let consensus = Consensus::from_draft(section_id, draft);
        self.consensus.save_consensus(consensus.clone()).await?;

        self.analysis_log.log(AnalysisEvent::new(
            "consensus_synthesized",
            serde_json::json!({
                "section_id": consensus.section_id.as_str(),
                "confidence": consensus.confidence,
                "response_count": submitted.len(),
                "bytes": consensus.merged_content.len(),
            }),
        ));

        Ok(consensus)
    }
}
