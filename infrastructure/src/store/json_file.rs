//! JSON file workspace store
//!
//! Loads the whole snapshot at open and rewrites the file after every
//! mutation. Workspaces are small (one team, seven sections), so a
//! full rewrite per change stays cheap and keeps the file readable.

use super::snapshot::WorkspaceSnapshot;
use align_application::ports::store::{
    ConsensusStore, ProjectStore, ResponseStore, SectionStore, StoreError,
};
use align_domain::{Consensus, Member, MemberId, Project, Response, Section, SectionId};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<WorkspaceSnapshot>,
}

impl JsonFileStore {
    /// Open a workspace file, or start an empty workspace when the file
    /// does not exist yet. A present but unreadable file is an error
    /// rather than a silent reset.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                StoreError::Backend(format!("Failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                StoreError::Backend(format!("Invalid workspace file {}: {e}", path.display()))
            })?
        } else {
            WorkspaceSnapshot::default()
        };

        debug!(path = %path.display(), "Opened workspace store");
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &WorkspaceSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Backend(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Backend(format!("Failed to serialize workspace: {e}")))?;
        fs::write(&self.path, json).map_err(|e| {
            StoreError::Backend(format!("Failed to write {}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl ProjectStore for JsonFileStore {
    async fn save_project(&self, project: Project) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.project = Some(project);
        self.persist(&state)
    }

    async fn project(&self) -> Result<Option<Project>, StoreError> {
        Ok(self.state.lock().await.project.clone())
    }
}

#[async_trait]
impl SectionStore for JsonFileStore {
    async fn insert_section(&self, section: Section) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.insert_section(section);
        self.persist(&state)
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
impl ResponseStore for JsonFileStore {
    async fn upsert_response(&self, response: Response) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        let replaced = state.upsert_response(response);
        self.persist(&state)?;
        Ok(replaced)
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
impl ConsensusStore for JsonFileStore {
    async fn save_consensus(&self, consensus: Consensus) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.save_consensus(consensus);
        self.persist(&state)
    }

    async fn consensus_for(&self, section: &SectionId) -> Result<Option<Consensus>, StoreError> {
        Ok(self.state.lock().await.consensus_for(section).cloned())
    }
}

// ==================== Tests ====================
