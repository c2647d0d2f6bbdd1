//! Splits display text into matched and unmatched runs for rendering.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Marks every case-insensitive occurrence of any of `terms` in `text`.
///
/// Scanning is left to right; at each position the longest matching term
/// wins. Concatenating the segments gives back `text` unchanged.
pub fn highlight<'a, S: AsRef<str>>(text: &'a str, terms: &[S]) -> Vec<Segment<'a>> {
    let terms: Vec<String> = terms
        .iter()
        .map(|t| t.as_ref().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let longest = terms.iter().filter_map(|t| match_len(rest, t)).max();
        match longest {
            Some(len) if len > 0 => {
                if plain_start < pos {
                    segments.push(Segment { text: &text[plain_start..pos], matched: false });
                }
                segments.push(Segment { text: &rest[..len], matched: true });
                pos += len;
                plain_start = pos;
            }
            _ => pos += rest.chars().next().map_or(1, char::len_utf8),
        }
    }
    if plain_start < text.len() {
        segments.push(Segment { text: &text[plain_start..], matched: false });
    }
    segments
}

/// Byte length of the prefix of `haystack` that lowercases to `needle`.
fn match_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut expected = needle.chars().peekable();
    for (idx, c) in haystack.char_indices() {
        if expected.peek().is_none() {
            return Some(idx);
        }
        for lower in c.to_lowercase() {
            if expected.next() != Some(lower) {
                return None;
            }
        }
    }
    expected.peek().is_none().then_some(haystack.len())
}
