//! Domain layer for team-align
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Sections and Responses
//!
//! A project is split into seven discovery **sections** (problem, target
//! users, vision, ...). Every team member submits one **response** per
//! section; resubmitting replaces the previous answer in place.
//!
//! ## Alignment Analysis
//!
//! Submitted responses are embedded and compared pairwise with cosine
//! similarity. The weakest pair decides the verdict:
//!
//! - **Aligned**: minimum similarity meets the threshold, no model call
//! - **Conflicting**: similarity fell short, a single analysis call explains
//!   the disagreement
//! - **InsufficientData**: fewer than two embedded responses to compare
//!
//! ## Consensus
//!
//! A facilitator call merges the responses of a section into a pending
//! **consensus** statement that team members approve or reject.

pub mod analysis;
pub mod consensus;
pub mod core;
pub mod prompt;
pub mod response;
pub mod section;
pub mod similarity;
pub mod stream;
pub mod util;

// Re-export commonly used types
pub use analysis::{
    AlignmentReport, AlignmentVerdict, AnalysisParseError, ConflictAnalysis, ConflictSeverity,
    ProjectAlignment, SectionAlignment, extract_json_object, parse_conflict_analysis,
    parse_consensus_draft, parse_question_lines,
};
pub use consensus::{Consensus, ConsensusDraft, ConsensusStatus};
pub use core::{Member, MemberId, Project, ProjectId, SectionId};
pub use prompt::{AnalysisPrompts, SectionPromptTemplate, catalog};
pub use response::Response;
pub use section::{Section, SectionCategory, UnknownCategoryError};
pub use similarity::{
    DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K, SimilarityError, SimilarityMatch,
    cosine_similarity, min_pairwise_similarity, rank_most_similar,
};
pub use stream::StreamEvent;
