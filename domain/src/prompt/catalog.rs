//! Static discovery prompt catalog.
//!
//! One template per section: the shared mentor system prompt, the default
//! question set shown without any model call, and the follow-up seed used
//! to personalize questions against project context.

use crate::section::SectionCategory;

/// System prompt shared by every discovery section.
pub const DISCOVERY_GUIDE: &str = "You are an expert product mentor helping teams define their product vision.
Your role is to ask insightful questions that help teams think deeply about their users, problems, and solutions.
Be concise, friendly, and constructive. Help teams avoid common pitfalls like building solutions without understanding the problem.";

/// Discovery template for one section.
#[derive(Debug, Clone, Copy)]
pub struct SectionPromptTemplate {
    pub category: SectionCategory,
    pub system_prompt: &'static str,
    pub questions: &'static [&'static str],
    pub follow_up: &'static str,
}

impl SectionPromptTemplate {
    /// Default questions as owned strings, for callers that return them
    /// directly without a model call.
    pub fn default_questions(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.to_string()).collect()
    }
}

static PROBLEM: SectionPromptTemplate = SectionPromptTemplate {
    category: SectionCategory::Problem,
    system_prompt: DISCOVERY_GUIDE,
    questions: &[
        "What specific problem are you trying to solve?",
        "Who experiences this problem most acutely?",
        "How do people currently deal with this problem?",
        "What makes this problem worth solving now?",
        "What happens if this problem isn't solved?",
    ],
    follow_up: "Based on the problem described, what follow-up questions would help the team\nclarify and validate their problem statement? Provide 2-3 specific questions.",
};

static TARGET_USERS: SectionPromptTemplate = SectionPromptTemplate {
    category: SectionCategory::TargetUsers,
    system_prompt: DISCOVERY_GUIDE,
    questions: &[
        "Who exactly will use your product? Be specific about demographics, roles, or characteristics.",
        "What are the key pain points or needs of these users?",
        "How do these users currently spend their time related to this problem?",
        "What motivates these users to seek a solution?",
        "Are there different user segments with different needs?",
    ],
    follow_up: "Based on the target users described, what additional questions would help\nthe team develop clearer user personas? Provide 2-3 specific questions.",
};

static VISION: SectionPromptTemplate = SectionPromptTemplate {
    category: SectionCategory::Vision,
    system_prompt: DISCOVERY_GUIDE,
    questions: &[
        "What is your product vision in one sentence?",
        "How will your product solve the problem you identified?",
        "What does success look like for your users?",
        "What's the core value proposition?",
        "How will users' lives be different after using your product?",
    ],
    follow_up: "Based on the vision described, what questions would help the team\narticulate a clearer, more compelling product vision? Provide 2-3 specific questions.",
};

static FEATURES: SectionPromptTemplate = SectionPromptTemplate {
    category: SectionCategory::Features,
    system_prompt: DISCOVERY_GUIDE,
    questions: &[
        "What are the essential features needed to solve the core problem? (List 3-5)",
        "Which single feature would provide the most value to users?",
        "What features are nice-to-have but not critical for MVP?",
        "Are there features that differentiate you from alternatives?",
        "What's the minimum set of features needed to test your hypothesis?",
    ],
    follow_up: "Based on the features described, what questions would help the team\nprioritize features and identify the true MVP? Provide 2-3 specific questions.",
};

static COMPETITORS: SectionPromptTemplate = SectionPromptTemplate {
    category: SectionCategory::Competitors,
    system_prompt: DISCOVERY_GUIDE,
    questions: &[
        "Who are your main competitors or alternatives?",
        "How do users currently solve this problem without your product?",
        "What do existing solutions do well?",
        "What are the gaps or weaknesses in current solutions?",
        "Why would someone choose your product over alternatives?",
    ],
    follow_up: "Based on the competitive landscape described, what questions would help\nthe team better understand their competitive position? Provide 2-3 specific questions.",
};

static DIFFERENTIATION: SectionPromptTemplate = SectionPromptTemplate {
    category: SectionCategory::Differentiation,
    system_prompt: DISCOVERY_GUIDE,
    questions: &[
        "What makes your product unique?",
        "What can you do that competitors can't or won't do?",
        "What's your unfair advantage?",
        "Why would users switch from their current solution to yours?",
        "What would users lose if your product didn't exist?",
    ],
    follow_up: "Based on the differentiation described, what questions would help the team\nsharpen their unique value proposition? Provide 2-3 specific questions.",
};

static TECH_STACK: SectionPromptTemplate = SectionPromptTemplate {
    category: SectionCategory::TechStack,
    system_prompt: DISCOVERY_GUIDE,
    questions: &[
        "What technologies or platforms are you considering?",
        "What are the key technical requirements or constraints?",
        "What's your team's technical expertise?",
        "Do you need to integrate with existing systems?",
        "What are your performance, scale, or security requirements?",
    ],
    follow_up: "Based on the technical approach described, what questions would help the team\nmake better technology decisions? Provide 2-3 specific questions.",
};

/// Returns the discovery template for a section.
pub fn catalog(category: SectionCategory) -> &'static SectionPromptTemplate {
    match category {
        SectionCategory::Problem => &PROBLEM,
        SectionCategory::TargetUsers => &TARGET_USERS,
        SectionCategory::Vision => &VISION,
        SectionCategory::Features => &FEATURES,
        SectionCategory::Competitors => &COMPETITORS,
        SectionCategory::Differentiation => &DIFFERENTIATION,
        SectionCategory::TechStack => &TECH_STACK,
    }
}
