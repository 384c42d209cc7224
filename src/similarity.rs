//! String similarity primitives used by clustering and excision.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C\x1D\x1E\u{85}\u{2028}\u{2029}]").expect("line break pattern")
});

/// Split text into lines on every Unicode line boundary.
/// A trailing terminator does not produce an extra empty line, and empty text has no lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = LINE_BREAK.split(text).collect();
    if matches!(lines.last(), Some(last) if last.is_empty()) {
        lines.pop();
    }
    lines
}

/// Length of the longest common subsequence of two char slices.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];
    for &lc in long {
        for (j, &sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}

/// Insertion/deletion edit distance: substitutions cost two operations.
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    a.len() + b.len() - 2 * lcs_len(&a, &b)
}

/// Normalized similarity score in `0..=100` (100 = identical).
///
/// Computed as `100 * (1 - indel / (len(a) + len(b)))`, rounded half-to-even.
/// Two empty strings are identical; an empty string against a non-empty one scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let total = a.chars().count() + b.chars().count();
    let distance = indel_distance(a, b);
    let score = 100.0 * (1.0 - distance as f64 / total as f64);
    score.round_ties_even().clamp(0.0, 100.0) as u8
}

/// Whitespace as stripped from page text, including the information separators `\x1c`-`\x1f`.
pub(crate) fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Split `text` after its first `n` characters.
pub(crate) fn split_at_char(text: &str, n: usize) -> (&str, &str) {
    match text.char_indices().nth(n) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    }
}

/// Split `text` before its last `n` characters.
pub(crate) fn split_at_char_from_end(text: &str, n: usize) -> (&str, &str) {
    let total = text.chars().count();
    if n >= total {
        ("", text)
    } else {
        split_at_char(text, total - n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcs_handles_empty_and_disjoint() {
        assert_eq!(lcs_len(&[], &['a']), 0);
        assert_eq!(lcs_len(&['a', 'b'], &['c', 'd']), 0);
        let a: Vec<char> = "kitten".chars().collect();
        let b: Vec<char> = "sitting".chars().collect();
        assert_eq!(lcs_len(&a, &b), 4);
    }

    #[test]
    fn char_splits_respect_multibyte_text() {
        assert_eq!(split_at_char("héllo", 2), ("hé", "llo"));
        assert_eq!(split_at_char("ab", 5), ("ab", ""));
        assert_eq!(split_at_char_from_end("héllo", 3), ("hé", "llo"));
        assert_eq!(split_at_char_from_end("ab", 5), ("", "ab"));
    }
}
