//! Alignment analysis: verdicts, LLM output parsing, and overview rows.

pub mod overview;
pub mod parsing;
pub mod verdict;

pub use overview::{ProjectAlignment, SectionAlignment};
pub use parsing::{
    AnalysisParseError, extract_json_object, parse_conflict_analysis, parse_consensus_draft,
    parse_question_lines,
};
pub use verdict::{AlignmentReport, AlignmentVerdict, ConflictAnalysis, ConflictSeverity};
