//! Port for structured analysis logging.
//!
//! Defines the [`AnalysisLog`] trait for recording pipeline events
//! (submissions, similarity scores, verdicts, consensus results) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! pipeline's decisions in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured analysis event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields; the logger adds the timestamp.
pub struct AnalysisEvent {
    /// Event type identifier (e.g., "response_submitted", "conflict_analyzed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AnalysisEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging analysis events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// `log` is synchronous and infallible; implementations swallow their own
/// I/O errors rather than disturbing the pipeline.
pub trait AnalysisLog: Send + Sync {
    /// Record an analysis event.
    fn log(&self, event: AnalysisEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoAnalysisLog;

impl AnalysisLog for NoAnalysisLog {
    fn log(&self, _event: AnalysisEvent) {}
}
