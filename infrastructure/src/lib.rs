//! Infrastructure layer for team-align
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading,
//! provider HTTP clients, and workspace persistence.

pub mod config;
pub mod logging;
pub mod providers;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileAnalysisConfig, FileAnthropicConfig, FileConfig, FileModelsConfig,
    FileOpenAiConfig, FileProvidersConfig, FileWorkspaceConfig,
};
pub use logging::JsonlAnalysisLogger;
pub use providers::{AnthropicCompletionGateway, OpenAiEmbeddingGateway};
pub use store::{InMemoryWorkspaceStore, JsonFileStore};
