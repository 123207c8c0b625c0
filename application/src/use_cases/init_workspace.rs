//! Init Workspace use case
//!
//! Creates the project record plus one section per discovery category,
//! in catalog order. Running it against an already-initialized
//! workspace is an error rather than a silent reset.

use crate::ports::store::{ProjectStore, SectionStore, StoreError};
use align_domain::{Project, ProjectId, Section, SectionCategory};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during workspace initialization
#[derive(Error, Debug)]
pub enum InitWorkspaceError {
    #[error("Project name is empty")]
    EmptyName,

    #[error("Workspace already initialized with project '{name}'")]
    AlreadyInitialized { name: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for initializing a workspace.
pub struct InitWorkspaceUseCase {
    projects: Arc<dyn ProjectStore>,
    sections: Arc<dyn SectionStore>,
}

impl InitWorkspaceUseCase {
    pub fn new(projects: Arc<dyn ProjectStore>, sections: Arc<dyn SectionStore>) -> Self {
        Self { projects, sections }
    }

    pub async fn execute(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<(Project, Vec<Section>), InitWorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InitWorkspaceError::EmptyName);
        }

        if let Some(existing) = self.projects.project().await? {
            return Err(InitWorkspaceError::AlreadyInitialized {
                name: existing.name,
            });
        }

        let mut project = Project::new(ProjectId::new(slug(name)), name);
        if let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) {
            project = project.with_description(description);
        }

        let mut sections = Vec::with_capacity(SectionCategory::ALL.len());
        for (position, category) in SectionCategory::ALL.into_iter().enumerate() {
            let section = Section::new(project.id.clone(), category, position as u32);
            self.sections.insert_section(section.clone()).await?;
            sections.push(section);
        }

        self.projects.save_project(project.clone()).await?;

        info!(
            "Initialized workspace for '{}' with {} sections",
            project.name,
            sections.len()
        );
        Ok((project, sections))
    }
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockStore {
        project: Mutex<Option<Project>>,
        sections: Mutex<Vec<Section>>,
    }

    #[async_trait]
    impl ProjectStore for MockStore {
        async fn save_project(&self, project: Project) -> Result<(), StoreError> {
            *self.project.lock().unwrap() = Some(project);
            Ok(())
        }

        async fn project(&self) -> Result<Option<Project>, StoreError> {
            Ok(self.project.lock().unwrap().clone())
        }
    }

    #[async_trait]
    impl SectionStore for MockStore {
        async fn insert_section(&self, section: Section) -> Result<(), StoreError> {
            self.sections.lock().unwrap().push(section);
            Ok(())
        }

        async fn section(
            &self,
            id: &align_domain::SectionId,
        ) -> Result<Section, StoreError> {
            self.sections
                .lock()
                .unwrap()
                .iter()
                .find(|s| &s.id == id)
                .cloned()
                .ok_or_else(|| StoreError::not_found("Section", id.as_str()))
        }

        async fn sections(&self) -> Result<Vec<Section>, StoreError> {
            Ok(self.sections.lock().unwrap().clone())
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_init_creates_project_and_all_sections() {
        let store = Arc::new(MockStore::default());
        let use_case = InitWorkspaceUseCase::new(store.clone(), store.clone());

        let (project, sections) = use_case
            .execute("Birdsong", Some("identify birds by call"))
            .await
            .unwrap();

        assert_eq!(project.id.as_str(), "birdsong");
        assert_eq!(project.description, "identify birds by call");
        assert_eq!(sections.len(), SectionCategory::ALL.len());

        // Positions follow catalog order
        assert_eq!(sections[0].category, SectionCategory::Problem);
        assert_eq!(sections[0].position, 0);
        assert_eq!(sections[6].category, SectionCategory::TechStack);
        assert_eq!(sections[6].position, 6);

        assert!(store.project.lock().unwrap().is_some());
        assert_eq!(store.sections.lock().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_init_twice_is_an_error() {
        let store = Arc::new(MockStore::default());
        let use_case = InitWorkspaceUseCase::new(store.clone(), store.clone());

        use_case.execute("Birdsong", None).await.unwrap();
        let err = use_case.execute("Other", None).await.unwrap_err();

        match err {
            InitWorkspaceError::AlreadyInitialized { name } => assert_eq!(name, "Birdsong"),
            other => panic!("expected AlreadyInitialized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let store = Arc::new(MockStore::default());
        let use_case = InitWorkspaceUseCase::new(store.clone(), store.clone());

        let err = use_case.execute("   ", None).await.unwrap_err();
        assert!(matches!(err, InitWorkspaceError::EmptyName));
        assert!(store.sections.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_multi_word_name_slugged_for_id() {
        let store = Arc::new(MockStore::default());
        let use_case = InitWorkspaceUseCase::new(store.clone(), store.clone());

        let (project, _) = use_case.execute("Team Align Tool", None).await.unwrap();
        assert_eq!(project.id.as_str(), "team-align-tool");
    }
}
