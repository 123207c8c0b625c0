//! Analysis configuration from TOML (`[analysis]` section)

use align_application::AnalysisParams;
use serde::{Deserialize, Serialize};

/// Tuning knobs for alignment analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalysisConfig {
    /// Cosine similarity at or above which a section counts as aligned.
    pub similarity_threshold: f32,
    /// Timeout for provider requests, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for FileAnalysisConfig {
    fn default() -> Self {
        let params = AnalysisParams::default();
        Self {
            similarity_threshold: params.similarity_threshold,
            request_timeout_secs: params.request_timeout_secs,
        }
    }
}

impl FileAnalysisConfig {
    pub fn to_params(&self) -> AnalysisParams {
        AnalysisParams::default()
            .with_similarity_threshold(self.similarity_threshold)
            .with_request_timeout_secs(self.request_timeout_secs)
    }
}
