//! Output formatting utilities

/// Truncate a string to at most `max_len` characters, ending in "..." when
/// cut.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len < 3 {
        return "...".to_string();
    }
    let trimmed: String = s.chars().take(max_len - 3).collect();
    format!("{trimmed}...")
}

/// Ranked scores span many orders of magnitude; show them compactly.
#[must_use]
pub fn format_score(score: f64) -> String {
    if score >= 0.001 {
        format!("{score:.3}")
    } else {
        format!("{score:.1e}")
    }
}
