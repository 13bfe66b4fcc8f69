//! Selector string to token stream.
//!
//! There is no grammar-level tokenizer here, only a splitter: runs of
//! non-delimiter characters become words, each delimiter other than
//! whitespace becomes a token of its own, and whitespace only separates.

use std::fmt;

/// Characters that end a word. Whitespace among them is dropped; the rest
/// are emitted as [`SelectorToken::Delim`].
pub const DELIMITERS: &[char] = &[
    ' ', '\t', '\r', '\n', '#', '.', '*', ':', '^', '$', '|', '>', '+', '~', '=', '[', ']',
];

/// One unit of a selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorToken {
    /// A name, value or pseudo-class (with any `(…)` argument attached),
    /// or the inside of a quoted string.
    Word(String),
    /// A single delimiter character.
    Delim(char),
}

impl SelectorToken {
    /// The word text, if this is a word.
    #[must_use]
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(word) => Some(word),
            Self::Delim(_) => None,
        }
    }

    /// Whether this is the delimiter `c`.
    #[must_use]
    pub fn is_delim(&self, c: char) -> bool {
        matches!(self, Self::Delim(d) if *d == c)
    }
}

impl fmt::Display for SelectorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(word) => f.write_str(word),
            Self::Delim(c) => write!(f, "{c}"),
        }
    }
}

/// Split `selector` into tokens.
///
/// - `'…'` and `"…"` become one word holding the text between the quotes.
/// - `(` up to the next `)` is appended to the current word as written, so
///   `nth-child(2)` is a single word.
/// - An unterminated quote or parenthesis ends tokenization; the tokens
///   collected so far are kept.
#[must_use]
pub fn tokenize(selector: &str) -> Vec<SelectorToken> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut rest = selector;

    while let Some(c) = rest.chars().next() {
        let after = &rest[c.len_utf8()..];
        match c {
            '"' | '\'' => {
                let Some(close) = after.find(c) else {
                    break;
                };
                flush(&mut word, &mut tokens);
                tokens.push(SelectorToken::Word(after[..close].to_string()));
                rest = &after[close + 1..];
            }
            '(' => {
                let Some(close) = after.find(')') else {
                    break;
                };
                word.push_str(&rest[..close + 2]);
                rest = &after[close + 1..];
            }
            c if DELIMITERS.contains(&c) => {
                flush(&mut word, &mut tokens);
                if !c.is_ascii_whitespace() {
                    tokens.push(SelectorToken::Delim(c));
                }
                rest = after;
            }
            c => {
                word.push(c);
                rest = after;
            }
        }
    }
    flush(&mut word, &mut tokens);
    tokens
}

fn flush(word: &mut String, tokens: &mut Vec<SelectorToken>) {
    if !word.is_empty() {
        tokens.push(SelectorToken::Word(std::mem::take(word)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokens: &[SelectorToken]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_compound_selector() {
        assert_eq!(words(&tokenize("a#y")), vec!["a", "#", "y"]);
        assert_eq!(words(&tokenize("ul > li.x")), vec!["ul", ">", "li", ".", "x"]);
    }

    #[test]
    fn test_parenthesized_argument_joins_word() {
        assert_eq!(
            words(&tokenize("li:nth-child( 2 ) b")),
            vec!["li", ":", "nth-child( 2 )", "b"]
        );
    }

    #[test]
    fn test_unterminated_quote_stops() {
        assert_eq!(words(&tokenize("a[title=\"x")), vec!["a", "[", "title", "="]);
    }
}
