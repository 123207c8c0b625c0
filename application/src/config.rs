//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the similarity threshold and API timeouts.

use align_domain::similarity::DEFAULT_SIMILARITY_THRESHOLD;
use std::time::Duration;

/// Tuning knobs for the analysis pipeline.
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    /// Minimum pairwise similarity at or above which a section is aligned
    /// without a model call.
    pub similarity_threshold: f32,
    /// Maximum time to wait for a provider response.
    pub request_timeout_secs: u64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            request_timeout_secs: 60,
        }
    }
}

impl AnalysisParams {
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_request_timeout_secs(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
