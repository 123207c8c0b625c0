//! Provider HTTP adapters
//!
//! Implements the application-layer gateway ports against the real
//! provider APIs: OpenAI for embeddings, Anthropic for completions.

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicCompletionGateway;
pub use openai::OpenAiEmbeddingGateway;
