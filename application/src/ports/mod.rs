//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod analysis_log;
pub mod completion_gateway;
pub mod embedding_gateway;
pub mod progress;
pub mod store;
