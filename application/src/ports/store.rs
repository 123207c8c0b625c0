//! Workspace store ports
//!
//! One trait per aggregate. A single backend usually implements all of
//! them over the same underlying state, but use cases only name the
//! traits they touch.

use align_domain::{Consensus, Member, MemberId, Project, Response, Section, SectionId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Store for the single project of a workspace.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn save_project(&self, project: Project) -> Result<(), StoreError>;

    async fn project(&self) -> Result<Option<Project>, StoreError>;
}

/// Store for discovery sections.
#[async_trait]
pub trait SectionStore: Send + Sync {
    async fn insert_section(&self, section: Section) -> Result<(), StoreError>;

    /// Look up a section, failing with [`StoreError::NotFound`] when absent.
    async fn section(&self, id: &SectionId) -> Result<Section, StoreError>;

    /// All sections ordered by position.
    async fn sections(&self) -> Result<Vec<Section>, StoreError>;
}

/// Store for member responses, keyed by (section, member).
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Insert or replace the response for its (section, member) key in one
    /// atomic step. Returns `true` when an existing response was replaced.
    async fn upsert_response(&self, response: Response) -> Result<bool, StoreError>;

    async fn response(
        &self,
        section: &SectionId,
        member: &MemberId,
    ) -> Result<Option<Response>, StoreError>;

    /// Submitted (non-draft) responses for a section, oldest first.
    async fn submitted_responses(&self, section: &SectionId) -> Result<Vec<Response>, StoreError>;

    /// Every response for a section, drafts included, oldest first.
    async fn all_responses(&self, section: &SectionId) -> Result<Vec<Response>, StoreError>;

    /// Members who have responded anywhere in the workspace.
    async fn members(&self) -> Result<Vec<Member>, StoreError>;
}

/// Store for consensus records, one per section at most.
#[async_trait]
pub trait ConsensusStore: Send + Sync {
    /// Save the record for its section, replacing any previous one.
    async fn save_consensus(&self, consensus: Consensus) -> Result<(), StoreError>;

    async fn consensus_for(&self, section: &SectionId) -> Result<Option<Consensus>, StoreError>;
}
