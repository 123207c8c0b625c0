//! Anthropic completions provider
//!
//! Talks to the Messages API with `x-api-key` authentication, in both
//! buffered and server-sent-event streaming modes.

mod gateway;
mod sse;
mod types;

pub use gateway::AnthropicCompletionGateway;
