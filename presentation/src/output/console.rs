//! Console output formatter for pipeline results

use crate::output::formatter::OutputFormatter;
use align_application::QuestionSet;
use align_domain::{
    AlignmentReport, AlignmentVerdict, Consensus, ConsensusStatus, ConflictSeverity, Member,
    Project, ProjectAlignment,
};
use colored::Colorize;

/// Formats pipeline results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an alignment report, one block per verdict kind.
    pub fn format_report(report: &AlignmentReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header(&format!(
            "Alignment: {}",
            report.category.title()
        )));
        output.push_str(&format!(
            "Responses: {} submitted, {} embedded\n",
            report.response_count, report.embedded_count
        ));
        output.push_str(&format!("Threshold: {:.2}\n", report.threshold));

        match &report.verdict {
            AlignmentVerdict::InsufficientData { found, required } => {
                output.push_str(&format!(
                    "\n{}\n",
                    format!(
                        "Not enough responses yet: {} of {} needed.",
                        found, required
                    )
                    .yellow()
                    .bold()
                ));
                output.push_str("Ask more of the team to submit before analyzing.\n");
            }
            AlignmentVerdict::Aligned { score } => {
                output.push_str(&format!(
                    "\n{} (score {:.2})\n",
                    "Aligned".green().bold(),
                    score
                ));
                output.push_str("The team is on the same page for this section.\n");
            }
            AlignmentVerdict::Conflicting { score, analysis } => {
                output.push_str(&format!(
                    "\n{} (score {:.2}, severity {})\n",
                    "Conflict detected".red().bold(),
                    score,
                    Self::severity_label(analysis.severity)
                ));

                if !analysis.differences.is_empty() {
                    output.push_str(&format!("\n{}\n", "Differences:".yellow().bold()));
                    for difference in &analysis.differences {
                        output.push_str(&format!("  * {}\n", difference));
                    }
                }

                if !analysis.areas_of_agreement.is_empty() {
                    output.push_str(&format!("\n{}\n", "Areas of agreement:".green().bold()));
                    for area in &analysis.areas_of_agreement {
                        output.push_str(&format!("  * {}\n", area));
                    }
                }

                if !analysis.suggested_merge.is_empty() {
                    output.push_str(&format!("\n{}\n", "Suggested merge:".cyan().bold()));
                    output.push_str(&Self::indent(&analysis.suggested_merge, "  "));
                    output.push('\n');
                }

                if !analysis.reasoning.is_empty() {
                    output.push_str(&format!("\n{}\n", analysis.reasoning.dimmed()));
                }
            }
        }

        output
    }

    /// Format an alignment report as JSON
    pub fn format_report_json(report: &AlignmentReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a consensus record with its approval state.
    pub fn format_consensus(consensus: &Consensus) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Consensus"));
        output.push_str(&format!(
            "Status: {}   Confidence: {:.0}%\n",
            Self::status_label(consensus.status),
            consensus.confidence * 100.0
        ));

        if !consensus.approved_by.is_empty() {
            let approvers: Vec<&str> = consensus.approved_by.iter().map(|m| m.as_str()).collect();
            output.push_str(&format!("Approved by: {}\n", approvers.join(", ")));
        }

        output.push('\n');
        output.push_str(&Self::indent(&consensus.merged_content, "  "));
        output.push('\n');

        if !consensus.reasoning.is_empty() {
            output.push_str(&format!("\n{}\n", consensus.reasoning.dimmed()));
        }

        output
    }

    /// Format the project-wide alignment overview as a table.
    pub fn format_overview(
        project: Option<&Project>,
        overview: &ProjectAlignment,
        members: &[Member],
    ) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Team Alignment Status"));
        output.push('\n');

        if let Some(project) = project {
            if project.description.is_empty() {
                output.push_str(&format!("{} {}\n", "Project:".cyan().bold(), project.name));
            } else {
                output.push_str(&format!(
                    "{} {} ({})\n",
                    "Project:".cyan().bold(),
                    project.name,
                    project.description
                ));
            }
        }

        if !members.is_empty() {
            let names: Vec<&str> = members.iter().map(|m| m.name()).collect();
            output.push_str(&format!("{} {}\n", "Members:".cyan().bold(), names.join(", ")));
        }

        output.push_str(&format!(
            "\n{:<22} {:>9} {:>9} {:>6}  {}\n",
            "Section", "Responses", "Embedded", "Score", "Consensus"
        ));
        output.push_str(&format!("{}\n", "-".repeat(60)));

        for section in &overview.sections {
            let score = section
                .alignment_score
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "-".to_string());
            let consensus = section
                .consensus_status
                .map(|s| s.to_string().to_lowercase())
                .unwrap_or_else(|| "-".to_string());

            output.push_str(&format!(
                "{:<22} {:>9} {:>9} {:>6}  {}\n",
                section.title, section.response_count, section.embedded_count, score, consensus
            ));
        }

        match overview.mean_score {
            Some(mean) => {
                output.push_str(&format!(
                    "\n{} {:.2} (over {} sections)\n",
                    "Mean alignment:".cyan().bold(),
                    mean,
                    overview.scored_section_count()
                ));
            }
            None => {
                output.push_str(&format!(
                    "\n{}\n",
                    "No section has enough embedded responses to score yet.".dimmed()
                ));
            }
        }

        output
    }

    /// Format a question set as a numbered list.
    pub fn format_questions(set: &QuestionSet) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header(&format!(
            "Questions: {}",
            set.category.title()
        )));

        for (i, question) in set.questions.iter().enumerate() {
            output.push_str(&format!("{:>3}. {}\n", i + 1, question));
        }

        let source = if set.personalized {
            "personalized for this project"
        } else {
            "catalog defaults"
        };
        output.push_str(&format!("\n{}\n", format!("({})", source).dimmed()));

        output
    }

    /// Format a provider failure with a retry hint.
    pub fn format_provider_error(context: &str, error: &str) -> String {
        format!(
            "{} {}\n{}\n",
            "Provider error:".red().bold(),
            error,
            format!("{} failed; the workspace is unchanged. Try again.", context).dimmed()
        )
    }

    fn severity_label(severity: ConflictSeverity) -> String {
        match severity {
            ConflictSeverity::Low => severity.to_string().green().to_string(),
            ConflictSeverity::Medium => severity.to_string().yellow().to_string(),
            ConflictSeverity::High => severity.to_string().red().bold().to_string(),
        }
    }

    fn status_label(status: ConsensusStatus) -> String {
        match status {
            ConsensusStatus::Pending => status.to_string().yellow().to_string(),
            ConsensusStatus::Approved => status.to_string().green().to_string(),
            ConsensusStatus::Rejected => status.to_string().red().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}\n", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AlignmentReport) -> String {
        Self::format_report(report)
    }

    fn format_report_json(&self, report: &AlignmentReport) -> String {
        Self::format_report_json(report)
    }

    fn format_consensus(&self, consensus: &Consensus) -> String {
        Self::format_consensus(consensus)
    }

    fn format_overview(
        &self,
        project: Option<&Project>,
        overview: &ProjectAlignment,
        members: &[Member],
    ) -> String {
        Self::format_overview(project, overview, members)
    }

    fn format_questions(&self, set: &QuestionSet) -> String {
        Self::format_questions(set)
    }
}
