//! Prompt domain
//!
//! The static discovery catalog for each section, plus builders that turn
//! stored responses into analysis, consensus, and document prompts.

mod builders;
mod catalog;

pub use builders::AnalysisPrompts;
pub use catalog::{DISCOVERY_GUIDE, SectionPromptTemplate, catalog};
