//! Shared utility functions.

/// Shorten a string to at most `max_chars` characters for display.
///
/// Appends an ellipsis when anything was cut. Counts characters rather than
/// bytes so multibyte text never splits mid-character.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let mut out: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
