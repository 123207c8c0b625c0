//! Prompt builders for analysis, consensus, follow-up, and document calls.

use crate::prompt::catalog::SectionPromptTemplate;
use crate::section::SectionCategory;
use std::collections::HashMap;

/// Builders for every model call the pipeline makes.
///
/// Responses are passed as `(author, content)` pairs so builders never need
/// a member lookup.
pub struct AnalysisPrompts;

impl AnalysisPrompts {
    /// System prompt for conflict analysis
    pub fn conflict_system() -> &'static str {
        "You are an expert at analyzing team alignment and identifying conflicts."
    }

    /// User prompt for conflict analysis over one section's responses
    pub fn conflict_prompt(category: SectionCategory, responses: &[(String, String)]) -> String {
        let responses_text = responses
            .iter()
            .enumerate()
            .map(|(i, (author, content))| {
                format!("Response {} ({}):\n\"{}\"", i + 1, author, content)
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"Analyze these team members' responses for the "{}" section and identify any conflicts or misalignments.

{}

Provide your analysis in the following JSON format:
{{
  "has_conflict": true/false,
  "conflict_severity": "low" | "medium" | "high",
  "differences": ["list of specific differences"],
  "areas_of_agreement": ["list of areas where team agrees"],
  "suggested_merge": "A synthesized version that reconciles differences",
  "reasoning": "Explanation of the conflicts and how the merge addresses them"
}}"#,
            category.as_str(),
            responses_text
        )
    }

    /// System prompt for consensus synthesis
    pub fn consensus_system() -> &'static str {
        "You are a skilled facilitator helping teams reach consensus."
    }

    /// User prompt for consensus synthesis over one section's responses
    pub fn consensus_prompt(category: SectionCategory, responses: &[(String, String)]) -> String {
        let responses_text = responses
            .iter()
            .map(|(author, content)| format!("{}:\n\"{}\"", author, content))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"Create a consensus statement for the "{}" section based on these team members' inputs.

{}

Your goal is to synthesize these perspectives into a single, clear statement that:
1. Captures the core ideas from all responses
2. Resolves any contradictions by finding common ground
3. Preserves important nuances and specific details
4. Is concise and actionable

Provide your response in this JSON format:
{{
  "merged_content": "The consensus statement",
  "reasoning": "Explanation of how you synthesized the responses",
  "confidence": 0.0-1.0 (how confident you are in this consensus)
}}"#,
            category.as_str(),
            responses_text
        )
    }

    /// User prompt for personalized follow-up questions
    pub fn followup_prompt(template: &SectionPromptTemplate, project_context: &str) -> String {
        format!(
            "{}\n\nProject context: {}\n\nGenerate 4-5 specific, thoughtful questions that will help the team think deeply about this aspect of their product. Return only the questions, one per line, starting with a bullet point.",
            template.follow_up, project_context
        )
    }

    /// System prompt for document generation
    pub fn prd_system() -> &'static str {
        "You are an experienced product manager creating Product Requirement Documents."
    }

    /// User prompt for generating a PRD from per-section consensus text.
    ///
    /// Sections without consensus render as "Not specified" so the document
    /// always covers the full outline.
    pub fn prd_prompt(consensus: &HashMap<SectionCategory, String>) -> String {
        const LABELS: [(SectionCategory, &str); 7] = [
            (SectionCategory::Problem, "PROBLEM"),
            (SectionCategory::TargetUsers, "TARGET USERS"),
            (SectionCategory::Vision, "VISION & SOLUTION"),
            (SectionCategory::Features, "KEY FEATURES"),
            (SectionCategory::Competitors, "COMPETITORS"),
            (SectionCategory::Differentiation, "DIFFERENTIATION"),
            (SectionCategory::TechStack, "TECH STACK"),
        ];

        let mut prompt = String::from(
            "Generate a professional Product Requirement Document based on this team's consensus.\n",
        );
        for (category, label) in LABELS {
            let content = consensus
                .get(&category)
                .map(String::as_str)
                .unwrap_or("Not specified");
            prompt.push_str(&format!("\n{}:\n{}\n", label, content));
        }

        prompt.push_str(
            r#"
Create a comprehensive PRD in markdown format with the following sections:
1. Executive Summary
2. Problem Statement
3. Target Users
4. Product Vision
5. Key Features
6. Competitive Analysis
7. Unique Value Proposition
8. Technical Approach
9. Success Metrics (suggest relevant metrics)
10. Risks and Mitigations (identify potential risks)

Make it professional, specific, and actionable for a development team."#,
        );

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::catalog;

    fn responses() -> Vec<(String, String)> {
        vec![
            ("Alice".to_string(), "We should target freelancers.".to_string()),
            ("Bob".to_string(), "Enterprise teams are the market.".to_string()),
        ]
    }

    #[test]
    fn test_conflict_prompt_format() {
        let prompt = AnalysisPrompts::conflict_prompt(SectionCategory::TargetUsers, &responses());
        assert!(prompt.contains(r#"the "target_users" section"#));
        assert!(prompt.contains("Response 1 (Alice):"));
        assert!(prompt.contains("Response 2 (Bob):"));
        assert!(prompt.contains(r#""conflict_severity": "low" | "medium" | "high""#));
    }

    #[test]
    fn test_consensus_prompt_format() {
        let prompt = AnalysisPrompts::consensus_prompt(SectionCategory::Vision, &responses());
        assert!(prompt.contains(r#"the "vision" section"#));
        assert!(prompt.contains("Alice:\n\"We should target freelancers.\""));
        assert!(prompt.contains(r#""merged_content""#));
        // No numbered "Response N" prefix in the consensus variant
        assert!(!prompt.contains("Response 1"));
    }

    #[test]
    fn test_followup_prompt_embeds_context() {
        let template = catalog(SectionCategory::Problem);
        let prompt = AnalysisPrompts::followup_prompt(template, "Name: a todo app");
        assert!(prompt.starts_with(template.follow_up));
        assert!(prompt.contains("Project context: Name: a todo app"));
        assert!(prompt.contains("one per line, starting with a bullet point"));
    }

    #[test]
    fn test_prd_prompt_fills_missing_sections() {
        let mut consensus = HashMap::new();
        consensus.insert(
            SectionCategory::Problem,
            "Scheduling is painful for small teams.".to_string(),
        );
        let prompt = AnalysisPrompts::prd_prompt(&consensus);
        assert!(prompt.contains("PROBLEM:\nScheduling is painful for small teams."));
        assert!(prompt.contains("TECH STACK:\nNot specified"));
        assert!(prompt.contains("10. Risks and Mitigations"));
    }

    #[test]
    fn test_prd_prompt_section_order_is_fixed() {
        let prompt = AnalysisPrompts::prd_prompt(&HashMap::new());
        let problem = prompt.find("PROBLEM:").unwrap();
        let users = prompt.find("TARGET USERS:").unwrap();
        let tech = prompt.find("TECH STACK:").unwrap();
        assert!(problem < users && users < tech);
    }
}
