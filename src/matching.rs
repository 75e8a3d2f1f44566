//! Case-insensitive substring matching with char-offset ranges.
//!
//! All ranges produced here count Unicode scalar values (Rust `char`s), not bytes,
//! so they stay meaningful to callers that index text differently.

use std::fmt;

/// Half-open `[start, end)` span of chars inside a candidate's display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "match range start must not exceed end");
        Self { start, end }
    }

    /// Range covering every char of `text`.
    pub fn full(text: &str) -> Self {
        Self::new(0, text.chars().count())
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Split `text` into the parts before, inside and after this range.
    ///
    /// Offsets past the end of `text` are clamped.
    pub fn split<'a>(&self, text: &'a str) -> (&'a str, &'a str, &'a str) {
        let start = char_to_byte(text, self.start);
        let end = char_to_byte(text, self.end).max(start);
        (&text[..start], &text[start..end], &text[end..])
    }
}

impl fmt::Display for MatchRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Find the first case-insensitive occurrence of `needle` in `haystack`.
///
/// Returns `None` for an empty needle.
pub fn find_match(haystack: &str, needle: &str) -> Option<MatchRange> {
    if needle.is_empty() {
        return None;
    }

    let hay: Vec<char> = haystack.chars().collect();
    let pat: Vec<char> = needle.chars().collect();
    if pat.len() > hay.len() {
        return None;
    }

    (0..=hay.len() - pat.len())
        .find(|&start| {
            hay[start..start + pat.len()]
                .iter()
                .zip(&pat)
                .all(|(h, p)| chars_eq_ignore_case(*h, *p))
        })
        .map(|start| MatchRange::new(start, start + pat.len()))
}

/// Case-insensitive whole-string equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| chars_eq_ignore_case(x, y))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod matching_tests;
