//! Team member responses to section questions.
//!
//! A [`Response`] is keyed by (section, member): resubmitting replaces the
//! content and embedding in place rather than adding a second row. Drafts
//! are never embedded and never participate in analysis.

use crate::core::{Member, MemberId, SectionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A team member's answer for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub section_id: SectionId,
    pub member: Member,
    pub content: String,
    /// Embedding of `content`. `None` for drafts and when the embedding
    /// provider failed at submission time.
    pub embedding: Option<Vec<f32>>,
    pub draft: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Response {
    /// Create a submitted response (no embedding attached yet).
    pub fn new(section_id: SectionId, member: Member, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            section_id,
            member,
            content: content.into(),
            embedding: None,
            draft: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a draft response. Drafts skip embedding and analysis.
    pub fn draft(section_id: SectionId, member: Member, content: impl Into<String>) -> Self {
        let mut response = Self::new(section_id, member, content);
        response.draft = true;
        response
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn is_draft(&self) -> bool {
        self.draft
    }

    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }

    pub fn member_id(&self) -> &MemberId {
        self.member.id()
    }

    /// Display name of the author, as used in analysis prompts.
    pub fn author(&self) -> &str {
        self.member.name()
    }

    /// Replace the answer after a resubmission.
    ///
    /// The previous embedding is discarded along with the content it
    /// described. `created_at` survives the rewrite; only `updated_at`
    /// moves. The draft flag takes whatever the new submission carries,
    /// so a member can park a submitted answer back into draft.
    pub fn resubmit(&mut self, content: impl Into<String>, embedding: Option<Vec<f32>>, draft: bool) {
        self.content = content.into();
        self.embedding = embedding;
        self.draft = draft;
        self.updated_at = Utc::now();
    }
}
