//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod alignment_overview;
pub mod detect_conflict;
pub mod export_prd;
pub mod generate_questions;
pub mod init_workspace;
pub mod review_consensus;
pub mod submit_response;
pub mod synthesize_consensus;
