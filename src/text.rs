// src/text.rs
//! Small text helpers shared by scoring, lead building and summaries.
//! Lengths are counted in Unicode scalar values, never bytes.

/// Return the first `max` characters of `s` as a borrowed slice.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Lowercase + whitespace split. No punctuation stripping.
pub fn lowercase_words(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
