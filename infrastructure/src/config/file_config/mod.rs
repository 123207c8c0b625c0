//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types
//! where needed.

mod analysis;
mod models;
mod providers;
mod workspace;

pub use analysis::FileAnalysisConfig;
pub use models::FileModelsConfig;
pub use providers::{FileAnthropicConfig, FileOpenAiConfig, FileProvidersConfig};
pub use workspace::FileWorkspaceConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model selection for completions and embeddings
    pub models: FileModelsConfig,
    /// Similarity and timeout tuning
    pub analysis: FileAnalysisConfig,
    /// Workspace file locations
    pub workspace: FileWorkspaceConfig,
    /// Provider settings (API keys, base URLs)
    pub providers: FileProvidersConfig,
}
