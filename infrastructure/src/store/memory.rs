//! In-memory workspace store
//!
//! Backs all four store ports with a mutex-guarded snapshot. State
//! lives for the process only.

use super::snapshot::WorkspaceSnapshot;
use align_application::ports::store::{
    ConsensusStore, ProjectStore, ResponseStore, SectionStore, StoreError,
};
use align_domain::{Consensus, Member, MemberId, Project, Response, Section, SectionId};
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryWorkspaceStore {
    state: Mutex<WorkspaceSnapshot>,
}

impl InMemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for InMemoryWorkspaceStore {
    async fn save_project(&self, project: Project) -> Result<(), StoreError> {
        self.state.lock().await.project = Some(project);
        Ok(())
    }

    async fn project(&self) -> Result<Option<Project>, StoreError> {
        Ok(self.state.lock().await.project.clone())
    }
}

#[async_trait]
impl SectionStore for InMemoryWorkspaceStore {
    async fn insert_section(&self, section: Section) -> Result<(), StoreError> {
        self.state.lock().await.insert_section(section);
        Ok(())
    }

    async fn section(&self, id: &SectionId) -> Result<Section, StoreError> {
        self.state
            .lock()
            .await
            .section(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Section", id.as_str()))
    }

    async fn sections(&self) -> Result<Vec<Section>, StoreError> {
        Ok(self.state.lock().await.sections_by_position())
    }
}

#[async_trait]
impl ResponseStore for InMemoryWorkspaceStore {
    async fn upsert_response(&self, response: Response) -> Result<bool, StoreError> {
        Ok(self.state.lock().await.upsert_response(response))
    }

    async fn response(
        &self,
        section: &SectionId,
        member: &MemberId,
    ) -> Result<Option<Response>, StoreError> {
        Ok(self.state.lock().await.response(section, member).cloned())
    }

    async fn submitted_responses(&self, section: &SectionId) -> Result<Vec<Response>, StoreError> {
        Ok(self.state.lock().await.responses_for(section, false))
    }

    async fn all_responses(&self, section: &SectionId) -> Result<Vec<Response>, StoreError> {
        Ok(self.state.lock().await.responses_for(section, true))
    }

    async fn members(&self) -> Result<Vec<Member>, StoreError> {
        Ok(self.state.lock().await.members())
    }
}

#[async_trait]
impl ConsensusStore for InMemoryWorkspaceStore {
    async fn save_consensus(&self, consensus: Consensus) -> Result<(), StoreError> {
        self.state.lock().await.save_consensus(consensus);
        Ok(())
    }

    async fn consensus_for(&self, section: &SectionId) -> Result<Option<Consensus>, StoreError> {
        Ok(self.state.lock().await.consensus_for(section).cloned())
    }
}

// ==================== Tests ====================
