//! Streaming completion events.

/// One event in a streamed completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Incremental text chunk.
    Delta(String),
    /// Stream finished; carries the full accumulated text.
    Completed(String),
    /// Stream failed mid-flight.
    Error(String),
}

impl StreamEvent {
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(text) | StreamEvent::Completed(text) => Some(text),
            StreamEvent::Error(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_access() {
        assert_eq!(StreamEvent::Delta("hi".to_string()).text(), Some("hi"));
        assert_eq!(StreamEvent::Completed("all".to_string()).text(), Some("all"));
        assert_eq!(StreamEvent::Error("boom".to_string()).text(), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!StreamEvent::Delta("x".to_string()).is_terminal());
        assert!(StreamEvent::Completed(String::new()).is_terminal());
        assert!(StreamEvent::Error("e".to_string()).is_terminal());
    }
}
