//! Submit Response use case
//!
//! Records a member's answer for a section, embedding it on the way in.
//! Submissions are keyed by (section, member): a second submission from the
//! same member replaces the first and keeps its creation time.
//!
//! Embedding failure does not block the submission. The response is stored
//! without a vector and simply stays out of similarity analysis until it is
//! resubmitted.

use crate::ports::analysis_log::{AnalysisEvent, AnalysisLog, NoAnalysisLog};
use crate::ports::embedding_gateway::EmbeddingGateway;
use crate::ports::progress::{AnalysisPhase, NoProgress, ProgressNotifier};
use crate::ports::store::{ResponseStore, SectionStore, StoreError};
use align_domain::{Member, Response, SectionId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during response submission
#[derive(Error, Debug)]
pub enum SubmitResponseError {
    #[error("Response content is empty")]
    EmptyContent,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for the [`SubmitResponseUseCase`].
#[derive(Debug, Clone)]
pub struct SubmitResponseInput {
    pub section_id: SectionId,
    pub member: Member,
    pub content: String,
    pub draft: bool,
}

impl SubmitResponseInput {
    pub fn new(section_id: SectionId, member: Member, content: impl Into<String>) -> Self {
        Self {
            section_id,
            member,
            content: content.into(),
            draft: false,
        }
    }

    pub fn as_draft(mut self) -> Self {
        self.draft = true;
        self
    }
}

/// What happened to the submission.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub response: Response,
    /// `true` when an earlier response from the same member was replaced.
    pub updated: bool,
    /// `true` when the embedding provider failed and the response was
    /// stored without a vector.
    pub embedding_skipped: bool,
}

/// Use case for submitting a response.
pub struct SubmitResponseUseCase {
    sections: Arc<dyn SectionStore>,
    responses: Arc<dyn ResponseStore>,
    embeddings: Arc<dyn EmbeddingGateway>,
    analysis_log: Arc<dyn AnalysisLog>,
}

impl SubmitResponseUseCase {
    pub fn new(
        sections: Arc<dyn SectionStore>,
        responses: Arc<dyn ResponseStore>,
        embeddings: Arc<dyn EmbeddingGateway>,
    ) -> Self {
        Self {
            sections,
            responses,
            embeddings,
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
        input: SubmitResponseInput,
    ) -> Result<SubmitOutcome, SubmitResponseError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: SubmitResponseInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SubmitOutcome, SubmitResponseError> {
        let content = input.content.trim();
        if content.is_empty() {
            return Err(SubmitResponseError::EmptyContent);
        }

        // Fails with NotFound for an unknown section
        let section = self.sections.section(&input.section_id).await?;

        info!(
            "Submitting response for '{}' by {}{}",
            section.category,
            input.member.name(),
            if input.draft { " (draft)" } else { "" }
        );

        // Drafts are never embedded; submissions survive embedding failure
        let mut embedding_skipped = false;
        let embedding = if input.draft {
            None
        } else {
            progress.on_phase_start(&AnalysisPhase::Embedding);
            let embedded = match self.embeddings.embed(content).await {
                Ok(vector) => Some(vector),
                Err(e) => {
                    warn!("Embedding failed, storing response without vector: {}", e);
                    embedding_skipped = true;
                    self.analysis_log.log(AnalysisEvent::new(
                        "embedding_skipped",
                        serde_json::json!({
                            "section_id": input.section_id.as_str(),
                            "member_id": input.member.id().as_str(),
                            "error": e.to_string(),
                        }),
                    ));
                    None
                }
            };
            progress.on_phase_complete(&AnalysisPhase::Embedding);
            embedded
        };

        let existing = self
            .responses
            .response(&input.section_id, input.member.id())
            .await?;

        let response = match existing {
            Some(mut previous) => {
                debug!("Replacing previous response from {}", input.member.name());
                previous.resubmit(content, embedding, input.draft);
                previous
            }
            None => {
                let mut response = if input.draft {
                    Response::draft(input.section_id.clone(), input.member.clone(), content)
                } else {
                    Response::new(input.section_id.clone(), input.member.clone(), content)
                };
                if let Some(vector) = embedding {
                    response = response.with_embedding(vector);
                }
                response
            }
        };

        let updated = self.responses.upsert_response(response.clone()).await?;

        self.analysis_log.log(AnalysisEvent::new(
            "response_submitted",
            serde_json::json!({
                "section_id": response.section_id.as_str(),
                "member_id": response.member_id().as_str(),
                "draft": response.is_draft(),
                "updated": updated,
                "embedded": response.has_embedding(),
                "bytes": response.content.len(),
            }),
        ));

        Ok(SubmitOutcome {
            response,
            updated,
            embedding_skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::embedding_gateway::EmbeddingError;
    use align_domain::{MemberId, Section, SectionCategory};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    struct MockSectionStore {
        sections: Vec<Section>,
    }

    impl MockSectionStore {
        fn with_problem_section() -> Self {
            let project = align_domain::ProjectId::new("proj");
            Self {
                sections: vec![Section::new(project, SectionCategory::Problem, 0)],
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
    struct MockResponseStore {
        stored: Mutex<Vec<Response>>,
    }

    #[async_trait]
    impl ResponseStore for MockResponseStore {
        async fn upsert_response(&self, response: Response) -> Result<bool, StoreError> {
            let mut stored = self.stored.lock().unwrap();
            let key = (response.section_id.clone(), response.member_id().clone());
            if let Some(slot) = stored
                .iter_mut()
                .find(|r| r.section_id == key.0 && *r.member_id() == key.1)
            {
                *slot = response;
                Ok(true)
            } else {
                stored.push(response);
                Ok(false)
            }
        }

        async fn response(
            &self,
            section: &SectionId,
            member: &MemberId,
        ) -> Result<Option<Response>, StoreError> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .find(|r| &r.section_id == section && r.member_id() == member)
                .cloned())
        }

        async fn submitted_responses(
            &self,
            section: &SectionId,
        ) -> Result<Vec<Response>, StoreError> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.section_id == section && !r.is_draft())
                .cloned()
                .collect())
        }

        async fn all_responses(&self, section: &SectionId) -> Result<Vec<Response>, StoreError> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.section_id == section)
                .cloned()
                .collect())
        }

        async fn members(&self) -> Result<Vec<Member>, StoreError> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.member.clone())
                .collect())
        }
    }

    struct MockEmbeddingGateway {
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockEmbeddingGateway {
        fn working() -> Self {
            Self {
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EmbeddingGateway for MockEmbeddingGateway {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(EmbeddingError::Network("connection refused".to_string()))
            } else {
                Ok(vec![0.1, 0.2, 0.3])
            }
        }

        fn model(&self) -> &str {
            "mock-embedding"
        }
    }

    fn member() -> Member {
        Member::new(MemberId::new("maria"), "Maria")
    }

    fn use_case(
        embeddings: MockEmbeddingGateway,
    ) -> (SubmitResponseUseCase, Arc<MockResponseStore>) {
        let responses = Arc::new(MockResponseStore::default());
        let use_case = SubmitResponseUseCase::new(
            Arc::new(MockSectionStore::with_problem_section()),
            responses.clone(),
            Arc::new(embeddings),
        );
        (use_case, responses)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_submission_is_embedded_and_stored() {
        let (use_case, store) = use_case(MockEmbeddingGateway::working());
        let input =
            SubmitResponseInput::new(SectionId::new("problem"), member(), "Spreadsheets sprawl");

        let outcome = use_case.execute(input).await.unwrap();

        assert!(!outcome.updated);
        assert!(!outcome.embedding_skipped);
        assert!(outcome.response.has_embedding());
        assert_eq!(store.stored.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_content_is_rejected() {
        let (use_case, _) = use_case(MockEmbeddingGateway::working());
        let input = SubmitResponseInput::new(SectionId::new("problem"), member(), "   \n ");

        let result = use_case.execute(input).await;
        assert!(matches!(result, Err(SubmitResponseError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_unknown_section_is_rejected() {
        let (use_case, _) = use_case(MockEmbeddingGateway::working());
        let input = SubmitResponseInput::new(SectionId::new("no-such"), member(), "text");

        let result = use_case.execute(input).await;
        assert!(matches!(
            result,
            Err(SubmitResponseError::Store(StoreError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_draft_skips_embedding() {
        let embeddings = MockEmbeddingGateway::working();
        let responses = Arc::new(MockResponseStore::default());
        let embeddings = Arc::new(embeddings);
        let use_case = SubmitResponseUseCase::new(
            Arc::new(MockSectionStore::with_problem_section()),
            responses,
            embeddings.clone(),
        );

        let input =
            SubmitResponseInput::new(SectionId::new("problem"), member(), "half-formed idea")
                .as_draft();
        let outcome = use_case.execute(input).await.unwrap();

        assert!(outcome.response.is_draft());
        assert!(!outcome.response.has_embedding());
        assert_eq!(embeddings.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_embedding_failure_does_not_block_submission() {
        let (use_case, store) = use_case(MockEmbeddingGateway::failing());
        let input =
            SubmitResponseInput::new(SectionId::new("problem"), member(), "Still worth saving");

        let outcome = use_case.execute(input).await.unwrap();

        assert!(outcome.embedding_skipped);
        assert!(!outcome.response.has_embedding());
        assert!(!outcome.response.is_draft());
        assert_eq!(store.stored.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resubmission_replaces_and_keeps_created_at() {
        let (use_case, store) = use_case(MockEmbeddingGateway::working());

        let first =
            SubmitResponseInput::new(SectionId::new("problem"), member(), "first attempt");
        let first_outcome = use_case.execute(first).await.unwrap();
        let created = first_outcome.response.created_at;

        let second =
            SubmitResponseInput::new(SectionId::new("problem"), member(), "second attempt");
        let second_outcome = use_case.execute(second).await.unwrap();

        assert!(second_outcome.updated);
        assert_eq!(second_outcome.response.content, "second attempt");
        assert_eq!(second_outcome.response.created_at, created);
        assert_eq!(store.stored.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_content_is_trimmed() {
        let (use_case, _) = use_case(MockEmbeddingGateway::working());
        let input =
            SubmitResponseInput::new(SectionId::new("problem"), member(), "  padded answer \n");

        let outcome = use_case.execute(input).await.unwrap();
        assert_eq!(outcome.response.content, "padded answer");
    }
}
