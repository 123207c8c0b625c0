//! Generate Questions use case
//!
//! Produces the discovery questions for a section. With project context
//! available, a completion call personalizes them; without it, or whenever
//! the provider fails or returns nothing parsable, the static catalog
//! questions are used instead. This fallback is part of the contract: the
//! discovery flow keeps working through provider outages, so the use case
//! never fails.

use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest};
use crate::ports::progress::{AnalysisPhase, NoProgress, ProgressNotifier};
use align_domain::{AnalysisPrompts, SectionCategory, catalog, parse_question_lines};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sampling temperature for follow-up questions. High, variety is the point.
const QUESTIONS_TEMPERATURE: f32 = 0.8;

/// Input for the [`GenerateQuestionsUseCase`].
#[derive(Debug, Clone)]
pub struct GenerateQuestionsInput {
    pub category: SectionCategory,
    /// Free-text project context used to personalize the questions.
    /// `None` or blank skips the completion call entirely.
    pub project_context: Option<String>,
}

impl GenerateQuestionsInput {
    pub fn new(category: SectionCategory) -> Self {
        Self {
            category,
            project_context: None,
        }
    }

    pub fn with_project_context(mut self, context: impl Into<String>) -> Self {
        self.project_context = Some(context.into());
        self
    }
}

/// Questions for one section, with their provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    pub category: SectionCategory,
    pub questions: Vec<String>,
    /// `true` when the questions came from a personalization call rather
    /// than the static catalog.
    pub personalized: bool,
}

/// Use case for generating discovery questions.
pub struct GenerateQuestionsUseCase {
    completions: Arc<dyn CompletionGateway>,
}

impl GenerateQuestionsUseCase {
    pub fn new(completions: Arc<dyn CompletionGateway>) -> Self {
        Self { completions }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: GenerateQuestionsInput) -> QuestionSet {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: GenerateQuestionsInput,
        progress: &dyn ProgressNotifier,
    ) -> QuestionSet {
        let template = catalog(input.category);

        let context = input
            .project_context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let Some(context) = context else {
            debug!("No project context, using catalog questions");
            return QuestionSet {
                category: input.category,
                questions: template.default_questions(),
                personalized: false,
            };
        };

        progress.on_phase_start(&AnalysisPhase::Questions);
        let request = CompletionRequest::new(
            template.system_prompt,
            AnalysisPrompts::followup_prompt(template, context),
        )
        .with_temperature(QUESTIONS_TEMPERATURE);

        let result = match self.completions.complete(&request).await {
            Ok(raw) => {
                let questions = parse_question_lines(&raw);
                if questions.is_empty() {
                    warn!("Personalization returned no parsable questions, using catalog");
                    QuestionSet {
                        category: input.category,
                        questions: template.default_questions(),
                        personalized: false,
                    }
                } else {
                    QuestionSet {
                        category: input.category,
                        questions,
                        personalized: true,
                    }
                }
            }
            Err(e) => {
                warn!("Personalization call failed, using catalog: {}", e);
                QuestionSet {
                    category: input.category,
                    questions: template.default_questions(),
                    personalized: false,
                }
            }
        };
        progress.on_phase_complete(&AnalysisPhase::Questions);

        result
    }
}
