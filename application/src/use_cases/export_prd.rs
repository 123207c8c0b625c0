//! Export PRD use case
//!
//! Turns the per-section consensus into a Product Requirement Document via
//! one long completion call. Sections without a usable consensus appear as
//! "Not specified" so the document always covers the full outline.
//! Rejected consensus records are treated as absent.

use crate::ports::analysis_log::{AnalysisEvent, AnalysisLog, NoAnalysisLog};
use crate::ports::completion_gateway::{
    CompletionError, CompletionGateway, CompletionRequest, StreamHandle,
};
use crate::ports::progress::{AnalysisPhase, NoProgress, ProgressNotifier};
use crate::ports::store::{ConsensusStore, SectionStore, StoreError};
use align_domain::{AnalysisPrompts, SectionCategory};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Sampling temperature for document generation. Higher than analysis
/// calls: prose, not JSON.
const PRD_TEMPERATURE: f32 = 0.6;

/// Documents run long; the analysis default would truncate them.
const PRD_MAX_TOKENS: u32 = 8192;

/// Errors that can occur during PRD export
#[derive(Error, Debug)]
pub enum ExportPrdError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),
}

/// Use case for exporting a PRD.
pub struct ExportPrdUseCase {
    sections: Arc<dyn SectionStore>,
    consensus: Arc<dyn ConsensusStore>,
    completions: Arc<dyn CompletionGateway>,
    analysis_log: Arc<dyn AnalysisLog>,
}

impl ExportPrdUseCase {
    pub fn new(
        sections: Arc<dyn SectionStore>,
        consensus: Arc<dyn ConsensusStore>,
        completions: Arc<dyn CompletionGateway>,
    ) -> Self {
        Self {
            sections,
            consensus,
            completions,
            analysis_log: Arc::new(NoAnalysisLog),
        }
    }

    pub fn with_analysis_log(mut self, log: Arc<dyn AnalysisLog>) -> Self {
        self.analysis_log = log;
        self
    }

    /// Generate the document and return the full text.
    pub async fn execute(&self) -> Result<String, ExportPrdError> {
        self.execute_with_progress(&NoProgress).await
    }

    /// Generate the document, reporting the completion call as one phase.
    pub async fn execute_with_progress(
        &self,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, ExportPrdError> {
        let request = self.build_request().await?;
        progress.on_phase_start(&AnalysisPhase::Document);
        let document = self.completions.complete(&request).await?;
        progress.on_phase_complete(&AnalysisPhase::Document);

        self.analysis_log.log(AnalysisEvent::new(
            "prd_exported",
            serde_json::json!({ "bytes": document.len() }),
        ));

        Ok(document)
    }

    /// Generate the document as a stream of text fragments.
    ///
    /// The caller consumes the [`StreamHandle`]; the export event is logged
    /// here when the request is accepted, not when the stream finishes.
    pub async fn execute_streaming(&self) -> Result<StreamHandle, ExportPrdError> {
        let request = self.build_request().await?;
        let handle = self.completions.complete_streaming(&request).await?;

        self.analysis_log.log(AnalysisEvent::new(
            "prd_export_started",
            serde_json::json!({ "streaming": true }),
        ));

        Ok(handle)
    }

    async fn build_request(&self) -> Result<CompletionRequest, ExportPrdError> {
        let sections = self.sections.sections().await?;

        let mut merged: HashMap<SectionCategory, String> = HashMap::new();
        for section in &sections {
            match self.consensus.consensus_for(&section.id).await? {
                Some(consensus) if !consensus.is_rejected() => {
                    merged.insert(section.category, consensus.merged_content);
                }
                Some(_) => {
                    debug!("Skipping rejected consensus for '{}'", section.category);
                }
                None => {}
            }
        }

        info!(
            "Exporting PRD: {} of {} sections have consensus",
            merged.len(),
            sections.len()
        );

        Ok(
            CompletionRequest::new(AnalysisPrompts::prd_system(), AnalysisPrompts::prd_prompt(&merged))
                .with_temperature(PRD_TEMPERATURE)
                .with_max_tokens(PRD_MAX_TOKENS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use align_domain::{
        Consensus, ConsensusDraft, ProjectId, Section, SectionId, StreamEvent,
    };
    use async_trait::async_trait;
    use std::collections::HashMap as StdHashMap;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockSectionStore {
        sections: Vec<Section>,
    }

    impl MockSectionStore {
        fn all_categories() -> Self {
            let project = ProjectId::new("proj");
            Self {
                sections: SectionCategory::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, c)| Section::new(project.clone(), *c, i as u32))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl SectionStore for MockSectionStore {
        async fn insert_section(&self, _section: Section) -> Result<(), StoreError> {
            Ok(())
        }

        async fn section(&self, id: &SectionId) -> Result<Section, StoreError> {
            self.sections
                .iter()
                .find(|s| &s.id == id)
                .cloned()
                .ok_or_else(|| StoreError::not_found("section", id.as_str()))
        }

        async fn sections(&self) -> Result<Vec<Section>, StoreError> {
            Ok(self.sections.clone())
        }
    }

    #[derive(Default)]
    struct MockConsensusStore {
        records: StdHashMap<String, Consensus>,
    }

    impl MockConsensusStore {
        fn with(mut self, section: &str, content: &str, rejected: bool) -> Self {
            let mut consensus = Consensus::from_draft(
                SectionId::new(section),
                ConsensusDraft {
                    merged_content: content.to_string(),
                    reasoning: String::new(),
                    confidence: 0.9,
                },
            );
            if rejected {
                consensus.reject();
            }
            self.records.insert(section.to_string(), consensus);
            self
        }
    }

    #[async_trait]
    impl ConsensusStore for MockConsensusStore {
        async fn save_consensus(&self, _consensus: Consensus) -> Result<(), StoreError> {
            Ok(())
        }

        async fn consensus_for(
            &self,
            section: &SectionId,
        ) -> Result<Option<Consensus>, StoreError> {
            Ok(self.records.get(section.as_str()).cloned())
        }
    }

    #[derive(Default)]
    struct MockCompletionGateway {
        requests: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl CompletionGateway for MockCompletionGateway {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok("# PRD\n\nGenerated document.".to_string())
        }

        fn model(&self) -> &str {
            "mock-completion"
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_export_fills_missing_sections() {
        let gateway = Arc::new(MockCompletionGateway::default());
        let use_case = ExportPrdUseCase::new(
            Arc::new(MockSectionStore::all_categories()),
            Arc::new(MockConsensusStore::default().with(
                "problem",
                "Scheduling is painful.",
                false,
            )),
            gateway.clone(),
        );

        let document = use_case.execute().await.unwrap();
        assert!(document.starts_with("# PRD"));

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("PROBLEM:\nScheduling is painful."));
        assert!(requests[0].prompt.contains("VISION & SOLUTION:\nNot specified"));
        assert_eq!(requests[0].temperature, Some(0.6));
        assert_eq!(requests[0].max_tokens, Some(8192));
    }

    #[tokio::test]
    async fn test_rejected_consensus_reads_as_not_specified() {
        let gateway = Arc::new(MockCompletionGateway::default());
        let use_case = ExportPrdUseCase::new(
            Arc::new(MockSectionStore::all_categories()),
            Arc::new(
                MockConsensusStore::default()
                    .with("problem", "Kept content", false)
                    .with("vision", "Rejected content", true),
            ),
            gateway.clone(),
        );

        use_case.execute().await.unwrap();

        let requests = gateway.requests.lock().unwrap();
        assert!(requests[0].prompt.contains("Kept content"));
        assert!(!requests[0].prompt.contains("Rejected content"));
        assert!(requests[0].prompt.contains("VISION & SOLUTION:\nNot specified"));
    }

    #[tokio::test]
    async fn test_streaming_export_delivers_document() {
        let gateway = Arc::new(MockCompletionGateway::default());
        let use_case = ExportPrdUseCase::new(
            Arc::new(MockSectionStore::all_categories()),
            Arc::new(MockConsensusStore::default()),
            gateway,
        );

        // Default streaming wraps complete() in one Completed event
        let mut handle = use_case.execute_streaming().await.unwrap();
        let event = handle.receiver.recv().await.unwrap();
        assert_eq!(
            event,
            StreamEvent::Completed("# PRD\n\nGenerated document.".to_string())
        );
    }
}
