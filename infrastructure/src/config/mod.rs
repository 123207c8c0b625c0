//! Configuration file loading for team-align
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ALIGN_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./align.toml` or `./.align.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/team-align/config.toml`
//! 5. Fallback: `~/.config/team-align/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAnalysisConfig, FileAnthropicConfig, FileConfig, FileModelsConfig, FileOpenAiConfig,
    FileProvidersConfig, FileWorkspaceConfig,
};
pub use loader::ConfigLoader;
