//! Embedding gateway port
//!
//! Defines the interface for turning response text into embedding vectors.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during embedding operations
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Nothing to embed")]
    EmptyInput,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after_secs: Option<u64>,
    },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Gateway for embedding providers
///
/// This port defines how the application layer obtains embeddings.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait EmbeddingGateway: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed a batch of texts, preserving order.
    ///
    /// Default implementation embeds one at a time; providers with a batch
    /// endpoint override this with a single request.
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Name of the embedding model in use.
    fn model(&self) -> &str;
}
