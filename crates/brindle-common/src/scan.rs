//! Byte-level search over markup source.
//!
//! The tree builder never tokenizes character by character; it jumps between
//! delimiters with the helpers in this module. Every delimiter recognized here
//! is ASCII, so each index returned lands on a UTF-8 character boundary of the
//! `str` the bytes came from and can be used to slice it directly.
//!
//! # Quote and bracket awareness
//!
//! [`find_unquoted`] and [`find_unquoted_str`] skip over `'…'` and `"…"` runs
//! so that a target inside a quoted string is never reported. With
//! [`ScanMode::nested`] set they also track `<>`, `()`, `[]` and `{}` pairs
//! and only report a target found at nesting depth zero. That is what lets a
//! declaration such as `<!DOCTYPE x [<!ENTITY a "b">]>` end at the final `>`.
//!
//! A quote that is never closed, or a closing bracket that does not match the
//! innermost open one, ends the scan with no result.

use crate::case::byte_eq;

/// How [`find_unquoted`] treats the bytes it walks over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanMode {
    /// Fold ASCII case when comparing against the target.
    pub ignore_case: bool,
    /// Track bracket nesting and only match at depth zero.
    pub nested: bool,
}

impl ScanMode {
    /// Quote-aware scan without bracket tracking.
    pub const FLAT: Self = Self {
        ignore_case: false,
        nested: false,
    };

    /// Quote-aware scan that also balances brackets.
    pub const NESTED: Self = Self {
        ignore_case: false,
        nested: true,
    };

    /// Return this mode with case folding switched on or off.
    #[must_use]
    pub const fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

/// Whitespace as the markup grammar sees it: space, tab, LF and CR.
#[must_use]
pub const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Name characters for tags and attributes.
///
/// Letters, digits, `_`, `-`, `:` and `.` are word characters, and so is any
/// byte not listed as a delimiter (non-ASCII bytes included). Whitespace,
/// `=`, `<`, `>`, `!`, `/`, `?`, both quote characters and all brackets end a
/// word.
#[must_use]
pub const fn is_word_byte(b: u8) -> bool {
    !matches!(
        b,
        b' ' | b'\t'
            | b'\n'
            | b'\r'
            | b'='
            | b'<'
            | b'>'
            | b'!'
            | b'/'
            | b'?'
            | b'"'
            | b'\''
            | b'('
            | b')'
            | b'['
            | b']'
            | b'{'
            | b'}'
    )
}

/// Index of the first non-whitespace byte in `start..end`.
#[must_use]
pub fn next_non_space(bytes: &[u8], start: usize, end: usize) -> Option<usize> {
    let end = end.min(bytes.len());
    (start..end).find(|&i| !is_space(bytes[i]))
}

/// End of the word run starting at `start`, or `end` if the run reaches it.
#[must_use]
pub fn word_end(bytes: &[u8], start: usize, end: usize) -> usize {
    let end = end.min(bytes.len());
    (start..end).find(|&i| !is_word_byte(bytes[i])).unwrap_or(end)
}

/// Plain search for `target` in `start..end`, ignoring quotes and brackets.
#[must_use]
pub fn find_byte(bytes: &[u8], target: u8, start: usize, end: usize) -> Option<usize> {
    let end = end.min(bytes.len());
    if start >= end {
        return None;
    }
    bytes[start..end]
        .iter()
        .position(|&b| b == target)
        .map(|offset| start + offset)
}

/// Plain search for `needle` wholly inside `start..end`.
#[must_use]
pub fn find_str(bytes: &[u8], needle: &[u8], start: usize, end: usize) -> Option<usize> {
    let end = end.min(bytes.len());
    if needle.is_empty() || start >= end || end - start < needle.len() {
        return None;
    }
    bytes[start..end]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| start + offset)
}

/// Find `target` in `start..end`, skipping quoted runs and, in nested mode,
/// anything inside an open bracket.
#[must_use]
pub fn find_unquoted(
    bytes: &[u8],
    target: u8,
    start: usize,
    end: usize,
    mode: ScanMode,
) -> Option<usize> {
    let end = end.min(bytes.len());
    let mut stack: Vec<u8> = Vec::new();
    let mut i = start;

    while i < end {
        let b = bytes[i];
        if byte_eq(b, target, mode.ignore_case) && (!mode.nested || stack.is_empty()) {
            return Some(i);
        }
        match b {
            b'"' | b'\'' => {
                let close = find_byte(bytes, b, i + 1, end)?;
                i = close + 1;
                continue;
            }
            b'<' | b'(' | b'[' | b'{' if mode.nested => stack.push(b),
            b'>' | b')' | b']' | b'}' if mode.nested => {
                if stack.pop() != Some(opening_bracket(b)) {
                    return None;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Multi-byte variant of [`find_unquoted`]: the first byte of `needle` is
/// located with the quote/bracket rules, the rest is compared in place.
/// The whole needle must fit before `end`.
#[must_use]
pub fn find_unquoted_str(
    bytes: &[u8],
    needle: &[u8],
    start: usize,
    end: usize,
    mode: ScanMode,
) -> Option<usize> {
    let (&first, rest) = needle.split_first()?;
    let end = end.min(bytes.len());
    let limit = end.checked_sub(needle.len())? + 1;

    let mut from = start;
    while let Some(i) = find_unquoted(bytes, first, from, limit, mode) {
        let tail_matches = rest
            .iter()
            .enumerate()
            .all(|(k, &expected)| byte_eq(bytes[i + 1 + k], expected, mode.ignore_case));
        if tail_matches {
            return Some(i);
        }
        from = i + 1;
    }
    None
}

const fn opening_bracket(closing: u8) -> u8 {
    match closing {
        b'>' => b'<',
        b')' => b'(',
        b']' => b'[',
        _ => b'{',
    }
}
