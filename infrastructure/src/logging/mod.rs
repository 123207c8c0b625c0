//! Logging infrastructure for analysis events.
//!
//! Provides [`JsonlAnalysisLogger`], a JSONL file writer that implements
//! the [`AnalysisLog`](align_application::AnalysisLog) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlAnalysisLogger;
