//! Anthropic completion gateway
//!
//! Implements `CompletionGateway` against the Messages API. Buffered
//! calls return the concatenated text blocks; streaming calls pump
//! decoded SSE events into a `StreamHandle` from a background task.
//!
//! Construction never fails. A missing API key becomes an
//! `Authentication` error when a request is attempted.

use super::sse::{SseLineBuffer, SsePayload, parse_event_line};
use super::types::{ApiErrorResponse, MessageParam, MessagesRequest, MessagesResponse};
use crate::config::FileAnthropicConfig;
use align_application::ports::completion_gateway::{
    CompletionError, CompletionGateway, CompletionRequest, StreamHandle,
};
use align_domain::StreamEvent;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Streams run far longer than buffered calls, so the per-request
/// timeout for them is fixed rather than taken from the client default.
const STREAM_TIMEOUT_SECS: u64 = 300;

const STREAM_CHANNEL_CAPACITY: usize = 32;

pub struct AnthropicCompletionGateway {
    http: reqwest::Client,
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
    api_version: String,
    model: String,
    default_max_tokens: u32,
}

impl AnthropicCompletionGateway {
    pub fn new(config: &FileAnthropicConfig, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            model: model.into(),
            default_max_tokens: config.max_tokens,
        }
    }

    fn headers(&self) -> Result<HeaderMap, CompletionError> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            CompletionError::Authentication(format!(
                "No Anthropic API key found (set {} or providers.anthropic.api_key)",
                self.api_key_env
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(key)
                .map_err(|_| CompletionError::Authentication("Invalid API key format".into()))?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(&self.api_version).map_err(|_| {
                CompletionError::InvalidResponse(format!(
                    "Invalid API version: {}",
                    self.api_version
                ))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn request_body<'a>(&'a self, request: &'a CompletionRequest, stream: bool) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens.unwrap_or(self.default_max_tokens),
            system: &request.system,
            messages: vec![MessageParam {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            stream: stream.then_some(true),
        }
    }

    async fn send(
        &self,
        request: &CompletionRequest,
        stream: bool,
    ) -> Result<reqwest::Response, CompletionError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.request_body(request, stream);

        debug!(
            model = %self.model,
            max_tokens = body.max_tokens,
            temperature = ?body.temperature,
            stream,
            "Sending completion request"
        );

        let mut builder = self.http.post(&url).headers(self.headers()?).json(&body);
        if stream {
            builder = builder.timeout(Duration::from_secs(STREAM_TIMEOUT_SECS));
        }

        let response = builder.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status, response).await);
        }
        Ok(response)
    }
}

#[async_trait]
impl CompletionGateway for AnthropicCompletionGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let response = self.send(request, false).await?;

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let text = parsed.text();
        if text.is_empty() {
            return Err(CompletionError::EmptyResponse);
        }
        Ok(text)
    }

    async fn complete_streaming(
        &self,
        request: &CompletionRequest,
    ) -> Result<StreamHandle, CompletionError> {
        let response = self.send(request, true).await?;

        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        tokio::spawn(pump_stream(response, tx));
        Ok(StreamHandle::new(rx))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Read the SSE body and forward decoded events until the message stops,
/// the body ends, or the receiver goes away.
async fn pump_stream(response: reqwest::Response, tx: mpsc::Sender<StreamEvent>) {
    let mut body = response.bytes_stream();
    let mut buffer = SseLineBuffer::new();
    let mut full_text = String::new();

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        };

        for line in buffer.push(&chunk) {
            match parse_event_line(&line) {
                Some(SsePayload::TextDelta(text)) => {
                    full_text.push_str(&text);
                    if tx.send(StreamEvent::Delta(text)).await.is_err() {
                        return;
                    }
                }
                Some(SsePayload::MessageStop) => {
                    let _ = tx.send(StreamEvent::Completed(full_text)).await;
                    return;
                }
                Some(SsePayload::Error(message)) => {
                    warn!("Completion stream reported an error: {message}");
                    let _ = tx.send(StreamEvent::Error(message)).await;
                    return;
                }
                None => {}
            }
        }
    }

    // Body ended without a message_stop event. Deliver what arrived.
    let _ = tx.send(StreamEvent::Completed(full_text)).await;
}

fn map_transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Network(err.to_string())
    }
}

async fn map_status_error(status: StatusCode, response: reqwest::Response) -> CompletionError {
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
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CompletionError::Authentication(message)
        }
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited {
            message,
            retry_after_secs: retry_after,
        },
        _ => CompletionError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway_without_key() -> AnthropicCompletionGateway {
        let config = FileAnthropicConfig {
            api_key_env: "TEAM_ALIGN_TEST_MISSING_KEY".to_string(),
            api_key: None,
            ..FileAnthropicConfig::default()
        };
        AnthropicCompletionGateway::new(
            &config,
            "claude-3-5-sonnet-20241022",
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_complete_without_key_is_authentication_error() {
        let gateway = gateway_without_key();
        let request = CompletionRequest::new("system", "prompt");

        let err = gateway.complete(&request).await.unwrap_err();
        match err {
            CompletionError::Authentication(message) => {
                assert!(message.contains("TEAM_ALIGN_TEST_MISSING_KEY"));
            }
            other => panic!("expected Authentication, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_streaming_without_key_fails_before_spawning() {
        let gateway = gateway_without_key();
        let request = CompletionRequest::new("system", "prompt");

        let result = gateway.complete_streaming(&request).await;
        assert!(matches!(result, Err(CompletionError::Authentication(_))));
    }

    #[test]
    fn test_request_body_applies_defaults_and_overrides() {
        let config = FileAnthropicConfig {
            api_key: Some("sk-ant-test".to_string()),
            max_tokens: 4096,
            ..FileAnthropicConfig::default()
        };
        let gateway = AnthropicCompletionGateway::new(&config, "m", Duration::from_secs(5));

        let plain = CompletionRequest::new("sys", "hello");
        let body = gateway.request_body(&plain, false);
        assert_eq!(body.max_tokens, 4096);
        assert_eq!(body.temperature, None);
        assert_eq!(body.stream, None);
        assert_eq!(body.messages.len(), 1);

        let tuned = CompletionRequest::new("sys", "hello")
            .with_temperature(0.3)
            .with_max_tokens(8192);
        let body = gateway.request_body(&tuned, true);
        assert_eq!(body.max_tokens, 8192);
        assert_eq!(body.temperature, Some(0.3));
        assert_eq!(body.stream, Some(true));
    }

    #[test]
    fn test_model_accessor() {
        let gateway = gateway_without_key();
        assert_eq!(gateway.model(), "claude-3-5-sonnet-20241022");
    }
}
