//! Model configuration from TOML (`[models]` section)

use serde::{Deserialize, Serialize};

/// Model selection for the two provider calls.
///
/// # Example
///
/// ```toml
/// [models]
/// completion = "claude-3-5-sonnet-20241022"   # Analysis, consensus, questions, PRD
/// embedding = "text-embedding-3-small"        # Response embeddings
/// embedding_dimensions = 512                  # Optional, model native when unset
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model for completion calls
    pub completion: String,
    /// Model for embedding calls
    pub embedding: String,
    /// Requested embedding width. The text-embedding-3 family can shorten
    /// vectors server-side; unset means the model's native dimension.
    pub embedding_dimensions: Option<u32>,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            completion: "claude-3-5-sonnet-20241022".to_string(),
            embedding: "text-embedding-3-small".to_string(),
            embedding_dimensions: None,
        }
    }
}
