//! Parsing of model-produced analysis text.
//!
//! Completion output is untrusted: models wrap JSON in prose or code fences,
//! nest braces inside string values, and sometimes return nothing usable.
//! Extraction scans for the first balanced JSON object instead of trusting
//! the whole response body.

use crate::analysis::verdict::ConflictAnalysis;
use crate::consensus::ConsensusDraft;

/// A completion response that could not be turned into a structured result.
#[derive(Debug, thiserror::Error)]
#[error("Failed to parse analysis response: {reason}")]
pub struct AnalysisParseError {
    pub reason: String,
    /// The raw model output, kept for logging and debugging.
    pub raw: String,
}

impl AnalysisParseError {
    fn new(reason: impl Into<String>, raw: &str) -> Self {
        Self {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

/// Returns the first balanced `{...}` object in `text`, if any.
///
/// Tracks string state so braces inside JSON string values do not affect
/// the depth count. Returns `None` when no opening brace exists or the
/// braces never balance.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parses the JSON contract of the conflict-analysis prompt.
pub fn parse_conflict_analysis(raw: &str) -> Result<ConflictAnalysis, AnalysisParseError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| AnalysisParseError::new("no JSON object found in response", raw))?;
    serde_json::from_str(json).map_err(|e| AnalysisParseError::new(e.to_string(), raw))
}

/// Parses the JSON contract of the consensus prompt.
///
/// Confidence is clamped into `[0.0, 1.0]`; models occasionally report
/// values just outside the requested range.
pub fn parse_consensus_draft(raw: &str) -> Result<ConsensusDraft, AnalysisParseError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| AnalysisParseError::new("no JSON object found in response", raw))?;
    let mut draft: ConsensusDraft =
        serde_json::from_str(json).map_err(|e| AnalysisParseError::new(e.to_string(), raw))?;
    draft.confidence = draft.confidence.clamp(0.0, 1.0);
    Ok(draft)
}

/// Extracts bullet-point question lines from follow-up completion text.
///
/// Accepts `•` and `-` prefixes; other lines are ignored. An empty result
/// is not an error here, callers decide whether to fall back.
pub fn parse_question_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .filter_map(|line| {
            let line = line.trim();
            line.strip_prefix('•')
                .or_else(|| line.strip_prefix('-'))
                .map(|rest| rest.trim().to_string())
        })
        .filter(|q| !q.is_empty())
        .collect()
}
