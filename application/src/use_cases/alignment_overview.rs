//! Alignment Overview use case
//!
//! Project-wide status from embeddings alone: per-section response counts,
//! minimum pairwise similarity, and consensus state. Never calls a
//! completion provider, so it is cheap enough to run on every status
//! request.

use crate::ports::store::{ConsensusStore, ResponseStore, SectionStore, StoreError};
use align_domain::similarity::{SimilarityError, min_pairwise_similarity};
use align_domain::{ProjectAlignment, SectionAlignment};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while building the overview
#[derive(Error, Debug)]
pub enum AlignmentOverviewError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),
}

/// Use case for the project alignment overview.
pub struct AlignmentOverviewUseCase {
    sections: Arc<dyn SectionStore>,
    responses: Arc<dyn ResponseStore>,
    consensus: Arc<dyn ConsensusStore>,
}

impl AlignmentOverviewUseCase {
    pub fn new(
        sections: Arc<dyn SectionStore>,
        responses: Arc<dyn ResponseStore>,
        consensus: Arc<dyn ConsensusStore>,
    ) -> Self {
        Self {
            sections,
            responses,
            consensus,
        }
    }

    pub async fn execute(&self) -> Result<ProjectAlignment, AlignmentOverviewError> {
        let sections = self.sections.sections().await?;
        let mut rows = Vec::with_capacity(sections.len());

        for section in sections {
            let submitted = self.responses.submitted_responses(&section.id).await?;
            let embeddings: Vec<&[f32]> = submitted
                .iter()
                .filter_map(|r| r.embedding.as_deref())
                .collect();

            let alignment_score = min_pairwise_similarity(&embeddings)?;
            let consensus_status = self
                .consensus
                .consensus_for(&section.id)
                .await?
                .map(|c| c.status);

            debug!(
                "Overview '{}': {} submitted, {} embedded, score {:?}",
                section.category,
                submitted.len(),
                embeddings.len(),
                alignment_score
            );

            rows.push(SectionAlignment {
                section_id: section.id,
                category: section.category,
                title: section.title,
                response_count: submitted.len(),
                embedded_count: embeddings.len(),
                alignment_score,
                consensus_status,
            });
        }

        Ok(ProjectAlignment::from_sections(rows))
    }
}
