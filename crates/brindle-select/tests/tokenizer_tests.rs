//! Integration tests for selector tokenization.

use brindle_select::{SelectorToken, tokenize};

fn word(s: &str) -> SelectorToken {
    SelectorToken::Word(s.to_string())
}

fn delim(c: char) -> SelectorToken {
    SelectorToken::Delim(c)
}

#[test]
fn test_whitespace_is_dropped() {
    assert_eq!(
        tokenize("  ul \t li\r\n"),
        vec![word("ul"), word("li")]
    );
}

#[test]
fn test_every_delimiter_is_a_token() {
    assert_eq!(
        tokenize("#.*:^$|>+~=[]"),
        "#.*:^$|>+~=[]".chars().map(delim).collect::<Vec<_>>()
    );
}

#[test]
fn test_non_delimiters_stay_in_words() {
    assert_eq!(
        tokenize("data-x_y/z caf\u{e9}"),
        vec![word("data-x_y/z"), word("caf\u{e9}")]
    );
}

#[test]
fn test_quoted_strings_are_single_words() {
    assert_eq!(
        tokenize(r#"a[href^="/x y"]"#),
        vec![
            word("a"),
            delim('['),
            word("href"),
            delim('^'),
            delim('='),
            word("/x y"),
            delim(']'),
        ]
    );
    assert_eq!(tokenize("[t='#.']"), vec![delim('['), word("t"), delim('='), word("#."), delim(']')]);
}

#[test]
fn test_quote_flushes_pending_word() {
    assert_eq!(tokenize(r#"ab"cd"ef"#), vec![word("ab"), word("cd"), word("ef")]);
}

#[test]
fn test_empty_quotes_yield_empty_word() {
    assert_eq!(tokenize(r#"[a=""]"#)[3], word(""));
}

#[test]
fn test_parentheses_copied_verbatim() {
    assert_eq!(
        tokenize("li:nth-child(2)"),
        vec![word("li"), delim(':'), word("nth-child(2)")]
    );
    assert_eq!(tokenize("x:nth-of-type(a b)"), vec![word("x"), delim(':'), word("nth-of-type(a b)")]);
}

#[test]
fn test_unterminated_parenthesis_stops() {
    assert_eq!(
        tokenize("li:nth-child(2"),
        vec![word("li"), delim(':'), word("nth-child")]
    );
}

#[test]
fn test_empty_selector() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   ").is_empty());
}
