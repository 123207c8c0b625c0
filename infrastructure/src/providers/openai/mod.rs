//! OpenAI embeddings provider
//!
//! Talks to the `/v1/embeddings` endpoint with bearer authentication.

mod gateway;
mod types;

pub use gateway::OpenAiEmbeddingGateway;
