//! Review Consensus use case
//!
//! Approval and rejection of a stored consensus record. These are the
//! externally triggered transitions out of `Pending`; approving twice from
//! the same member records one approval.

use crate::ports::analysis_log::{AnalysisEvent, AnalysisLog, NoAnalysisLog};
use crate::ports::store::{ConsensusStore, StoreError};
use align_domain::{Consensus, MemberId, SectionId};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during consensus review
#[derive(Error, Debug)]
pub enum ReviewConsensusError {
    #[error("No consensus exists for section '{section}'")]
    NoConsensus { section: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for approving or rejecting a consensus.
pub struct ReviewConsensusUseCase {
    consensus: Arc<dyn ConsensusStore>,
    analysis_log: Arc<dyn AnalysisLog>,
}

impl ReviewConsensusUseCase {
    pub fn new(consensus: Arc<dyn ConsensusStore>) -> Self {
        Self {
            consensus,
            analysis_log: Arc::new(NoAnalysisLog),
        }
    }

    pub fn with_analysis_log(mut self, log: Arc<dyn AnalysisLog>) -> Self {
        self.analysis_log = log;
        self
    }

    /// Record a member's approval and mark the record approved.
    pub async fn approve(
        &self,
        section_id: &SectionId,
        member: MemberId,
    ) -> Result<Consensus, ReviewConsensusError> {
        let mut consensus = self.load(section_id).await?;
        consensus.approve(member.clone());
        self.consensus.save_consensus(consensus.clone()).await?;

        info!(
            "Consensus for '{}' approved by {} ({} total approvals)",
            section_id,
            member,
            consensus.approved_by.len()
        );
        self.analysis_log.log(AnalysisEvent::new(
            "consensus_approved",
            serde_json::json!({
                "section_id": section_id.as_str(),
                "member_id": member.as_str(),
                "approvals": consensus.approved_by.len(),
            }),
        ));

        Ok(consensus)
    }

    /// Mark the record rejected.
    pub async fn reject(&self, section_id: &SectionId) -> Result<Consensus, ReviewConsensusError> {
        let mut consensus = self.load(section_id).await?;
        consensus.reject();
        self.consensus.save_consensus(consensus.clone()).await?;

        info!("Consensus for '{}' rejected", section_id);
        self.analysis_log.log(AnalysisEvent::new(
            "consensus_rejected",
            serde_json::json!({ "section_id": section_id.as_str() }),
        ));

        Ok(consensus)
    }

    async fn load(&self, section_id: &SectionId) -> Result<Consensus, ReviewConsensusError> {
        self.consensus
            .consensus_for(section_id)
            .await?
            .ok_or_else(|| ReviewConsensusError::NoConsensus {
                section: section_id.as_str().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use align_domain::{ConsensusDraft, ConsensusStatus};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockConsensusStore {
        records: Mutex<HashMap<String, Consensus>>,
    }

    impl MockConsensusStore {
        fn with_pending(section: &str) -> Self {
            let store = Self::default();
            let consensus = Consensus::from_draft(
                SectionId::new(section),
                ConsensusDraft {
                    merged_content: "merged".to_string(),
                    reasoning: "because".to_string(),
                    confidence: 0.8,
                },
            );
            store
                .records
                .lock()
                .unwrap()
                .insert(section.to_string(), consensus);
            store
        }
    }

    #[async_trait]
    impl ConsensusStore for MockConsensusStore {
        async fn save_consensus(&self, consensus: Consensus) -> Result<(), StoreError> {
            self.records
                .lock()
                .unwrap()
                .insert(consensus.section_id.as_str().to_string(), consensus);
            Ok(())
        }

        async fn consensus_for(
            &self,
            section: &SectionId,
        ) -> Result<Option<Consensus>, StoreError> {
            Ok(self.records.lock().unwrap().get(section.as_str()).cloned())
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_approve_records_member_and_status() {
        let store = Arc::new(MockConsensusStore::with_pending("vision"));
        let use_case = ReviewConsensusUseCase::new(store.clone());

        let consensus = use_case
            .approve(&SectionId::new("vision"), MemberId::new("maria"))
            .await
            .unwrap();

        assert_eq!(consensus.status, ConsensusStatus::Approved);
        assert_eq!(consensus.approved_by, vec![MemberId::new("maria")]);

        let stored = store.records.lock().unwrap();
        assert!(stored.get("vision").unwrap().is_approved());
    }

    #[tokio::test]
    async fn test_double_approval_is_idempotent() {
        let store = Arc::new(MockConsensusStore::with_pending("vision"));
        let use_case = ReviewConsensusUseCase::new(store);

        use_case
            .approve(&SectionId::new("vision"), MemberId::new("maria"))
            .await
            .unwrap();
        let consensus = use_case
            .approve(&SectionId::new("vision"), MemberId::new("maria"))
            .await
            .unwrap();

        assert_eq!(consensus.approved_by.len(), 1);
    }

    #[tokio::test]
    async fn test_reject_keeps_approvals_for_audit() {
        let store = Arc::new(MockConsensusStore::with_pending("vision"));
        let use_case = ReviewConsensusUseCase::new(store);

        use_case
            .approve(&SectionId::new("vision"), MemberId::new("maria"))
            .await
            .unwrap();
        let consensus = use_case.reject(&SectionId::new("vision")).await.unwrap();

        assert!(consensus.is_rejected());
        assert_eq!(consensus.approved_by.len(), 1);
    }

    #[tokio::test]
    async fn test_review_without_consensus_fails() {
        let use_case = ReviewConsensusUseCase::new(Arc::new(MockConsensusStore::default()));

        let err = use_case
            .approve(&SectionId::new("vision"), MemberId::new("maria"))
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewConsensusError::NoConsensus { .. }));
    }
}
