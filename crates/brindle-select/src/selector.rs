//! Selector compilation.
//!
//! A selector compiles to a flat list of [`Step`]s applied left to right.
//! There is no compound grouping: `a#x` is two steps, "descendants named
//! `a`" and then "those, or their descendants, with id `x`".

use std::str::FromStr;

use brindle_common::warning::warn_once;
use brindle_dom::ElementData;
use strum_macros::EnumString;

use crate::tokenizer::{SelectorToken, tokenize};

/// Which element names a step accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTest {
    /// `*`
    Any,
    /// A tag name, compared ignoring ASCII case.
    Named(String),
}

impl NameTest {
    fn from_token(token: &SelectorToken) -> Option<Self> {
        match token {
            SelectorToken::Word(word) if word == "*" => Some(Self::Any),
            SelectorToken::Word(word) => Some(Self::Named(word.clone())),
            SelectorToken::Delim('*') => Some(Self::Any),
            SelectorToken::Delim(_) => None,
        }
    }

    /// Whether `element` passes this test.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Any => true,
            Self::Named(name) => element.has_name(name, true),
        }
    }
}

/// Structural pseudo-classes.
///
/// `nth-*` indices count from zero: `:nth-child(0)` is the first element
/// child and `:nth-last-child(0)` the last. There is no `an+b` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    /// `:root`, the outermost element ancestor (or the element itself).
    Root,
    /// `:nth-child(n)`
    NthChild(usize),
    /// `:nth-last-child(n)`
    NthLastChild(usize),
    /// `:nth-of-type(n)`
    NthOfType(usize),
    /// `:nth-last-of-type(n)`
    NthLastOfType(usize),
    /// `:first-child`
    FirstChild,
    /// `:last-child`
    LastChild,
    /// `:first-of-type`
    FirstOfType,
    /// `:last-of-type`
    LastOfType,
    /// `:only-child`
    OnlyChild,
    /// `:only-of-type`
    OnlyOfType,
    /// `:empty`, no child nodes of any kind.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
enum PseudoName {
    Root,
    NthChild,
    NthLastChild,
    NthOfType,
    NthLastOfType,
    FirstChild,
    LastChild,
    FirstOfType,
    LastOfType,
    OnlyChild,
    OnlyOfType,
    Empty,
}

impl PseudoClass {
    /// Parse the word after `:`, e.g. `first-child` or `nth-of-type(2)`.
    /// The name is matched ignoring ASCII case. Returns `None` for unknown
    /// names and for `nth-*` arguments that are not non-negative integers.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        let word = word.to_ascii_lowercase();
        let (name, argument) = match word.split_once('(') {
            Some((name, rest)) => (name, Some(rest.split(')').next().unwrap_or_default())),
            None => (word.as_str(), None),
        };
        let index = || argument.and_then(|arg| arg.trim().parse::<usize>().ok());

        Some(match PseudoName::from_str(name).ok()? {
            PseudoName::Root => Self::Root,
            PseudoName::NthChild => Self::NthChild(index()?),
            PseudoName::NthLastChild => Self::NthLastChild(index()?),
            PseudoName::NthOfType => Self::NthOfType(index()?),
            PseudoName::NthLastOfType => Self::NthLastOfType(index()?),
            PseudoName::FirstChild => Self::FirstChild,
            PseudoName::LastChild => Self::LastChild,
            PseudoName::FirstOfType => Self::FirstOfType,
            PseudoName::LastOfType => Self::LastOfType,
            PseudoName::OnlyChild => Self::OnlyChild,
            PseudoName::OnlyOfType => Self::OnlyOfType,
            PseudoName::Empty => Self::Empty,
        })
    }
}

/// Attribute predicates. Names are looked up ignoring ASCII case; values
/// are compared exactly. A bare attribute (no value) only satisfies
/// [`AttributeSelector::Exists`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]`
    Exists(String),
    /// `[attr=value]`
    Equals(String, String),
    /// `[attr~=value]`: one of the whitespace-separated words is `value`.
    Includes(String, String),
    /// `[attr|=value]`: the `-`-separated parts of `value` are a prefix of
    /// the attribute's parts, so `en` matches `en` and `en-US`.
    DashMatch(String, String),
    /// `[attr^=value]`
    PrefixMatch(String, String),
    /// `[attr$=value]`
    SuffixMatch(String, String),
    /// `[attr*=value]`
    SubstringMatch(String, String),
}

impl AttributeSelector {
    fn with_operator(op: char, name: String, value: String) -> Option<Self> {
        Some(match op {
            '~' => Self::Includes(name, value),
            '|' => Self::DashMatch(name, value),
            '^' => Self::PrefixMatch(name, value),
            '$' => Self::SuffixMatch(name, value),
            '*' => Self::SubstringMatch(name, value),
            _ => return None,
        })
    }

    /// Check if this predicate holds for `element`.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Exists(name) => element.has_attr(name),
            Self::Equals(name, val) => attr_is(element, name, |v| v == val.as_str()),
            Self::Includes(name, val) => attr_is(element, name, |v| {
                v.split_ascii_whitespace().any(|w| w == val.as_str())
            }),
            Self::DashMatch(name, val) => attr_is(element, name, |v| {
                let mut parts = v.split('-');
                val.split('-').all(|want| parts.next() == Some(want))
            }),
            Self::PrefixMatch(name, val) => attr_is(element, name, |v| v.starts_with(val.as_str())),
            Self::SuffixMatch(name, val) => attr_is(element, name, |v| v.ends_with(val.as_str())),
            Self::SubstringMatch(name, val) => attr_is(element, name, |v| v.contains(val.as_str())),
        }
    }
}

fn attr_is(element: &ElementData, name: &str, test: impl FnOnce(&str) -> bool) -> bool {
    element.attr_value(name).is_some_and(test)
}

/// One operation over the working set of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A bare name or `*`: elements strictly below each context node.
    Descendants(NameTest),
    /// `#id`: the context nodes and their descendants whose `id` equals
    /// the word, ignoring ASCII case.
    Id(String),
    /// `.class`: the context nodes and their descendants whose class list
    /// contains the word, ignoring ASCII case.
    Class(String),
    /// `> name`: element children.
    Children(NameTest),
    /// `+ name`: the next element sibling, if it passes the name test.
    Adjacent(NameTest),
    /// `~ name`: every following element sibling that passes the name test.
    Siblings(NameTest),
    /// `:pseudo`: the context nodes and their descendants that match.
    Pseudo(PseudoClass),
    /// `[…]`: the context nodes and their descendants that match.
    Attribute(AttributeSelector),
    /// A step that could not be understood; it selects nothing.
    NeverMatch,
}

/// A compiled selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Steps in application order.
    pub steps: Vec<Step>,
}

impl Selector {
    /// Compile `selector`. Compilation never fails: parts that cannot be
    /// understood become [`Step::NeverMatch`], and an unclosed `[` drops
    /// itself and everything after it.
    #[must_use]
    pub fn parse(selector: &str) -> Self {
        Self::from_tokens(&tokenize(selector))
    }

    /// Compile an already tokenized selector.
    #[must_use]
    pub fn from_tokens(tokens: &[SelectorToken]) -> Self {
        let mut steps = Vec::new();
        let mut index = 0;

        while let Some(token) = tokens.get(index) {
            let operand = tokens.get(index + 1);
            let step = match token {
                SelectorToken::Delim(op @ ('#' | '.' | ':')) => {
                    index += 1;
                    operand
                        .and_then(SelectorToken::as_word)
                        .and_then(|word| match op {
                            '#' => Some(Step::Id(word.to_string())),
                            '.' => Some(Step::Class(word.to_string())),
                            _ => pseudo_step(word),
                        })
                        .unwrap_or(Step::NeverMatch)
                }
                SelectorToken::Delim(op @ ('>' | '+' | '~')) => {
                    index += 1;
                    operand
                        .and_then(NameTest::from_token)
                        .map_or(Step::NeverMatch, |test| match op {
                            '>' => Step::Children(test),
                            '+' => Step::Adjacent(test),
                            _ => Step::Siblings(test),
                        })
                }
                SelectorToken::Delim('[') => {
                    let Some(offset) = tokens[index..].iter().position(|t| t.is_delim(']'))
                    else {
                        break;
                    };
                    let close = index + offset;
                    let step = attribute_step(&tokens[index + 1..close]);
                    index = close;
                    step
                }
                SelectorToken::Delim('*') => Step::Descendants(NameTest::Any),
                SelectorToken::Delim(_) => Step::NeverMatch,
                SelectorToken::Word(_) => {
                    NameTest::from_token(token).map_or(Step::NeverMatch, Step::Descendants)
                }
            };
            steps.push(step);
            index += 1;
        }
        Self { steps }
    }
}

fn pseudo_step(word: &str) -> Option<Step> {
    let pseudo = PseudoClass::parse(word);
    if pseudo.is_none() {
        let _ = warn_once("Selector", &format!("unsupported pseudo-class :{word}"));
    }
    pseudo.map(Step::Pseudo)
}

/// Build an attribute step from the tokens between `[` and `]`.
fn attribute_step(inner: &[SelectorToken]) -> Step {
    let word = |i: usize| inner.get(i).and_then(SelectorToken::as_word).map(str::to_string);
    let selector = match inner {
        [_] => word(0).map(AttributeSelector::Exists),
        [_, eq, _] if eq.is_delim('=') => word(0)
            .zip(word(2))
            .map(|(n, v)| AttributeSelector::Equals(n, v)),
        [_, SelectorToken::Delim(op), eq, _] if eq.is_delim('=') => word(0)
            .zip(word(3))
            .and_then(|(n, v)| AttributeSelector::with_operator(*op, n, v)),
        _ => None,
    };
    selector.map_or(Step::NeverMatch, Step::Attribute)
}
