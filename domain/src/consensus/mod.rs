//! Consensus records produced by the synthesizer.
//!
//! The synthesizer parses the model's output into a [`ConsensusDraft`],
//! which becomes a stored [`Consensus`] in `Pending` state. Approval and
//! rejection are separate, externally triggered transitions. Re-running the
//! synthesizer replaces the record for that section (last write wins).

use crate::core::{MemberId, SectionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review status of a consensus record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusStatus {
    /// Suggested by the synthesizer, awaiting team review.
    Pending,
    /// Accepted by at least one team member.
    Approved,
    /// Rejected by the team.
    Rejected,
}

impl ConsensusStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ConsensusStatus::Pending)
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ConsensusStatus::Approved)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ConsensusStatus::Rejected)
    }
}

impl std::fmt::Display for ConsensusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsensusStatus::Pending => write!(f, "Pending"),
            ConsensusStatus::Approved => write!(f, "Approved"),
            ConsensusStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Raw synthesizer output before it becomes a stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusDraft {
    pub merged_content: String,
    pub reasoning: String,
    /// Model-reported confidence, clamped into [0, 1] at parse time.
    pub confidence: f32,
}

/// An AI-suggested consensus for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consensus {
    pub section_id: SectionId,
    pub merged_content: String,
    pub reasoning: String,
    /// Display hint only: never used to gate a decision.
    pub confidence: f32,
    pub status: ConsensusStatus,
    /// Members who approved. Recording the same member twice keeps one entry.
    pub approved_by: Vec<MemberId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Consensus {
    /// Turn a parsed draft into a pending record for a section.
    pub fn from_draft(section_id: SectionId, draft: ConsensusDraft) -> Self {
        let now = Utc::now();
        Self {
            section_id,
            merged_content: draft.merged_content,
            reasoning: draft.reasoning,
            confidence: draft.confidence,
            status: ConsensusStatus::Pending,
            approved_by: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record an approval and mark the record approved.
    pub fn approve(&mut self, member: MemberId) {
        if !self.approved_by.contains(&member) {
            self.approved_by.push(member);
        }
        self.status = ConsensusStatus::Approved;
        self.updated_at = Utc::now();
    }

    /// Mark the record rejected. The approval list is kept for the audit
    /// trail.
    pub fn reject(&mut self) {
        self.status = ConsensusStatus::Rejected;
        self.updated_at = Utc::now();
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn is_approved(&self) -> bool {
        self.status.is_approved()
    }

    pub fn is_rejected(&self) -> bool {
        self.status.is_rejected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ConsensusDraft {
        ConsensusDraft {
            merged_content: "We build for small bakeries.".to_string(),
            reasoning: "Both answers centered on food retail.".to_string(),
            confidence: 0.8,
        }
    }

    #[test]
    fn test_from_draft_starts_pending() {
        let consensus = Consensus::from_draft(SectionId::new("target_users"), draft());
        assert!(consensus.is_pending());
        assert!(consensus.approved_by.is_empty());
        assert_eq!(consensus.merged_content, "We build for small bakeries.");
    }

    #[test]
    fn test_approve_records_member_once() {
        let mut consensus = Consensus::from_draft(SectionId::new("vision"), draft());

        consensus.approve(MemberId::new("maria"));
        consensus.approve(MemberId::new("maria"));
        consensus.approve(MemberId::new("jo"));

        assert!(consensus.is_approved());
        assert_eq!(consensus.approved_by.len(), 2);
    }

    #[test]
    fn test_reject_keeps_approvals() {
        let mut consensus = Consensus::from_draft(SectionId::new("vision"), draft());
        consensus.approve(MemberId::new("maria"));

        consensus.reject();

        assert!(consensus.is_rejected());
        assert_eq!(consensus.approved_by.len(), 1);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ConsensusStatus::Pending.to_string(), "Pending");
        assert_eq!(ConsensusStatus::Approved.to_string(), "Approved");
        assert_eq!(ConsensusStatus::Rejected.to_string(), "Rejected");
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&ConsensusStatus::Approved).unwrap();
        assert_eq!(json, r#""approved""#);
    }
}
