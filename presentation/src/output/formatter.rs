//! Output formatter trait

use align_application::QuestionSet;
use align_domain::{AlignmentReport, Consensus, Member, Project, ProjectAlignment};

/// Trait for formatting pipeline results
pub trait OutputFormatter {
    /// Format an alignment report
    fn format_report(&self, report: &AlignmentReport) -> String;

    /// Format an alignment report as JSON
    fn format_report_json(&self, report: &AlignmentReport) -> String;

    /// Format a consensus record
    fn format_consensus(&self, consensus: &Consensus) -> String;

    /// Format the project-wide alignment overview
    fn format_overview(
        &self,
        project: Option<&Project>,
        overview: &ProjectAlignment,
        members: &[Member],
    ) -> String;

    /// Format a set of discovery questions
    fn format_questions(&self, set: &QuestionSet) -> String;
}
