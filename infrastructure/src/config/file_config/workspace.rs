//! Workspace configuration from TOML (`[workspace]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the workspace file and optional analysis log live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkspaceConfig {
    /// Path of the JSON workspace file.
    pub store_path: PathBuf,
    /// JSONL analysis log path. Unset means no log is written.
    pub analysis_log: Option<PathBuf>,
}

impl Default for FileWorkspaceConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(".team-align/workspace.json"),
            analysis_log: None,
        }
    }
}
