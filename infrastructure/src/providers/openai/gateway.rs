//! OpenAI embedding gateway
//!
//! Implements `EmbeddingGateway` against the OpenAI `/v1/embeddings`
//! endpoint. Construction never fails: a missing API key surfaces as
//! an `Authentication` error on the first request instead, so callers
//! that treat embeddings as optional can degrade gracefully.

use super::types::{ApiErrorResponse, EmbeddingsRequest, EmbeddingsResponse};
use crate::config::FileOpenAiConfig;
use align_application::ports::embedding_gateway::{EmbeddingError, EmbeddingGateway};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;

pub struct OpenAiEmbeddingGateway {
    http: reqwest::Client,
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
    model: String,
    dimensions: Option<u32>,
}

impl OpenAiEmbeddingGateway {
    pub fn new(config: &FileOpenAiConfig, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            dimensions: None,
        }
    }

    /// Request shortened vectors (text-embedding-3 family only).
    pub fn with_dimensions(mut self, dimensions: Option<u32>) -> Self {
        self.dimensions = dimensions;
        self
    }

    fn headers(&self) -> Result<HeaderMap, EmbeddingError> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            EmbeddingError::Authentication(format!(
                "No OpenAI API key found (set {} or providers.openai.api_key)",
                self.api_key_env
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| EmbeddingError::Authentication("Invalid API key format".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// One batched request for all inputs. Vectors come back keyed by
    /// `index`, so they are reordered to match the input order.
    async fn request_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() || texts.iter().any(|t| t.trim().is_empty()) {
            return Err(EmbeddingError::EmptyInput);
        }

        let url = format!("{}/v1/embeddings", self.base_url);
        let body = EmbeddingsRequest {
            model: &self.model,
            input: texts,
            dimensions: self.dimensions,
        };

        debug!(model = %self.model, inputs = texts.len(), "Requesting embeddings");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status, response).await);
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        let mut rows = parsed.data;
        rows.sort_by_key(|row| row.index);
        Ok(rows.into_iter().map(|row| row.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingGateway for OpenAiEmbeddingGateway {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.request_embeddings(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidResponse("Empty embedding list".into()))
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.request_embeddings(texts).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn map_transport_error(err: reqwest::Error) -> EmbeddingError {
    if err.is_timeout() {
        EmbeddingError::Timeout
    } else {
        EmbeddingError::Network(err.to_string())
    }
}

async fn map_status_error(status: StatusCode, response: reqwest::Response) -> EmbeddingError {
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => EmbeddingError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => EmbeddingError::RateLimited {
            message,
            retry_after_secs: retry_after,
        },
        _ => EmbeddingError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

// ==================== Tests ====================
