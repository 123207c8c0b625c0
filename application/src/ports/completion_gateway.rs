//! Completion gateway port
//!
//! Defines the interface for chat-completion providers. Every analysis,
//! consensus, question, and document call goes through this port.

use align_domain::StreamEvent;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during completion operations
#[derive(Error, Debug)]
pub enum CompletionError {
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

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One completion call: system prompt, user prompt, and sampling overrides.
///
/// `temperature` and `max_tokens` left at `None` fall back to the
/// gateway's configured defaults.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Handle for receiving streaming events from a completion call.
///
/// Wraps an `mpsc::Receiver<StreamEvent>` and provides convenience methods
/// for consuming the stream.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Consume the stream and collect all text into a single string.
    ///
    /// Useful when you want streaming at the transport level but only need
    /// the final text.
    pub async fn collect_text(mut self) -> Result<String, CompletionError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(CompletionError::Network(e));
                }
            }
        }
        // Channel closed without a Completed event; return what we have
        Ok(full_text)
    }
}

/// Gateway for completion providers
///
/// This port defines how the application layer calls a chat model.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Run a completion and return the full response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;

    /// Run a completion and stream the response.
    ///
    /// Default implementation calls `complete()` and wraps the result in a
    /// single `Completed` event, so non-streaming implementations work
    /// without changes.
    async fn complete_streaming(
        &self,
        request: &CompletionRequest,
    ) -> Result<StreamHandle, CompletionError> {
        let result = self.complete(request).await?;
        let (tx, rx) = mpsc::channel(1);
        // A dropped receiver is not an error here
        let _ = tx.send(StreamEvent::Completed(result)).await;
        Ok(StreamHandle::new(rx))
    }

    /// Name of the completion model in use.
    fn model(&self) -> &str;
}
