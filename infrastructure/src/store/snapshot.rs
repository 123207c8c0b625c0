//! Snapshot of one workspace: the project, its sections, every member
//! response, and any consensus records.
//!
//! All store queries and mutations live here as plain synchronous
//! methods, so the in-memory and file-backed adapters share one
//! implementation and differ only in locking and persistence.

use align_domain::{Consensus, Member, MemberId, Project, Response, Section, SectionId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct WorkspaceSnapshot {
    pub project: Option<Project>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub responses: Vec<Response>,
    #[serde(default)]
    pub consensus: Vec<Consensus>,
}

impl WorkspaceSnapshot {
    /// Insert a section, replacing any existing one with the same id.
    /// Re-running workspace init stays idempotent this way.
    pub fn insert_section(&mut self, section: Section) {
        match self.sections.iter_mut().find(|s| s.id == section.id) {
            Some(existing) => *existing = section,
            None => self.sections.push(section),
        }
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn sections_by_position(&self) -> Vec<Section> {
        let mut sections = self.sections.clone();
        sections.sort_by_key(|s| s.position);
        sections
    }

    /// Replace the response for its (section, member) key, or append a
    /// new one. Returns `true` when a response was replaced.
    pub fn upsert_response(&mut self, response: Response) -> bool {
        let key = (response.section_id.clone(), response.member_id().clone());
        match self
            .responses
            .iter_mut()
            .find(|r| r.section_id == key.0 && r.member_id() == &key.1)
        {
            Some(existing) => {
                *existing = response;
                true
            }
            None => {
                self.responses.push(response);
                false
            }
        }
    }

    pub fn response(&self, section: &SectionId, member: &MemberId) -> Option<&Response> {
        self.responses
            .iter()
            .find(|r| &r.section_id == section && r.member_id() == member)
    }

    /// Responses for one section, oldest first. Drafts are filtered out
    /// unless asked for.
    pub fn responses_for(&self, section: &SectionId, include_drafts: bool) -> Vec<Response> {
        let mut responses: Vec<Response> = self
            .responses
            .iter()
            .filter(|r| &r.section_id == section && (include_drafts || !r.is_draft()))
            .cloned()
            .collect();
        responses.sort_by_key(|r| r.created_at);
        responses
    }

    /// Every member with at least one response, sorted by display name.
    pub fn members(&self) -> Vec<Member> {
        let mut seen: HashSet<MemberId> = HashSet::new();
        let mut members: Vec<Member> = self
            .responses
            .iter()
            .filter(|r| seen.insert(r.member_id().clone()))
            .map(|r| r.member.clone())
            .collect();
        members.sort_by(|a, b| a.name().cmp(b.name()));
        members
    }

    pub fn save_consensus(&mut self, consensus: Consensus) {
        match self
            .consensus
            .iter_mut()
            .find(|c| c.section_id == consensus.section_id)
        {
            Some(existing) => *existing = consensus,
            None => self.consensus.push(consensus),
        }
    }

    pub fn consensus_for(&self, section: &SectionId) -> Option<&Consensus> {
        self.consensus.iter().find(|c| &c.section_id == section)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use align_domain::{ConsensusDraft, ProjectId, SectionCategory};

    fn member(id: &str, name: &str) -> Member {
        Member::new(MemberId::new(id), name)
    }

    fn section(category: SectionCategory, position: u32) -> Section {
        Section::new(ProjectId::new("p1"), category, position)
    }

    fn consensus_for_section(id: &str, content: &str) -> Consensus {
        Consensus::from_draft(
            SectionId::new(id),
            ConsensusDraft {
                merged_content: content.to_string(),
                reasoning: "because".to_string(),
                confidence: 0.9,
            },
        )
    }

    #[test]
    fn test_insert_section_is_idempotent() {
        let mut snapshot = WorkspaceSnapshot::default();
        snapshot.insert_section(section(SectionCategory::Problem, 0));
        snapshot.insert_section(section(SectionCategory::Vision, 2));
        snapshot.insert_section(section(SectionCategory::Problem, 0));

        assert_eq!(snapshot.sections.len(), 2);
    }

    #[test]
    fn test_sections_come_back_position_ordered() {
        let mut snapshot = WorkspaceSnapshot::default();
        snapshot.insert_section(section(SectionCategory::Vision, 2));
        snapshot.insert_section(section(SectionCategory::Problem, 0));
        snapshot.insert_section(section(SectionCategory::TargetUsers, 1));

        let ordered = snapshot.sections_by_position();
        let categories: Vec<_> = ordered.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                SectionCategory::Problem,
                SectionCategory::TargetUsers,
                SectionCategory::Vision
            ]
        );
    }

    #[test]
    fn test_upsert_replaces_by_section_and_member() {
        let mut snapshot = WorkspaceSnapshot::default();
        let section_id = SectionId::new("problem");

        let first = Response::new(section_id.clone(), member("m1", "Ana"), "v1");
        assert!(!snapshot.upsert_response(first));

        let second = Response::new(section_id.clone(), member("m1", "Ana"), "v2");
        assert!(snapshot.upsert_response(second));

        assert_eq!(snapshot.responses.len(), 1);
        assert_eq!(snapshot.responses[0].content, "v2");

        // Same member in another section is a separate row
        let other = Response::new(SectionId::new("vision"), member("m1", "Ana"), "v3");
        assert!(!snapshot.upsert_response(other));
        assert_eq!(snapshot.responses.len(), 2);
    }

    #[test]
    fn test_responses_for_filters_drafts_and_orders_oldest_first() {
        let mut snapshot = WorkspaceSnapshot::default();
        let section_id = SectionId::new("problem");

        let mut early = Response::new(section_id.clone(), member("m1", "Ana"), "early");
        early.created_at = chrono::Utc::now() - chrono::Duration::minutes(5);
        let late = Response::new(section_id.clone(), member("m2", "Bea"), "late");
        let draft = Response::draft(section_id.clone(), member("m3", "Cal"), "wip");

        snapshot.upsert_response(late);
        snapshot.upsert_response(draft);
        snapshot.upsert_response(early);

        let submitted = snapshot.responses_for(&section_id, false);
        let contents: Vec<_> = submitted.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["early", "late"]);

        let all = snapshot.responses_for(&section_id, true);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_members_deduplicated_and_name_sorted() {
        let mut snapshot = WorkspaceSnapshot::default();
        snapshot.upsert_response(Response::new(
            SectionId::new("problem"),
            member("m2", "Bea"),
            "x",
        ));
        snapshot.upsert_response(Response::new(
            SectionId::new("vision"),
            member("m1", "Ana"),
            "y",
        ));
        snapshot.upsert_response(Response::new(
            SectionId::new("vision"),
            member("m2", "Bea"),
            "z",
        ));

        let members = snapshot.members();
        let names: Vec<_> = members.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Ana", "Bea"]);
    }

    #[test]
    fn test_save_consensus_replaces_per_section() {
        let mut snapshot = WorkspaceSnapshot::default();
        snapshot.save_consensus(consensus_for_section("problem", "first"));
        snapshot.save_consensus(consensus_for_section("problem", "second"));
        snapshot.save_consensus(consensus_for_section("vision", "other"));

        assert_eq!(snapshot.consensus.len(), 2);
        let stored = snapshot.consensus_for(&SectionId::new("problem")).unwrap();
        assert_eq!(stored.merged_content, "second");
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut snapshot = WorkspaceSnapshot::default();
        snapshot.project = Some(Project::new(ProjectId::new("p1"), "Birdsong"));
        snapshot.insert_section(section(SectionCategory::Problem, 0));
        snapshot.upsert_response(
            Response::new(SectionId::new("problem"), member("m1", "Ana"), "text")
                .with_embedding(vec![0.1, 0.2]),
        );

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let restored: WorkspaceSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.project.as_ref().unwrap().name, "Birdsong");
        assert_eq!(restored.sections.len(), 1);
        assert_eq!(restored.responses[0].embedding, Some(vec![0.1, 0.2]));
    }

    #[test]
    fn test_empty_object_deserializes_with_defaults() {
        let restored: WorkspaceSnapshot = serde_json::from_str("{}").unwrap();
        assert!(restored.project.is_none());
        assert!(restored.sections.is_empty());
    }
}
