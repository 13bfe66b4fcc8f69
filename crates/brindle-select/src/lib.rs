//! CSS selector queries over Brindle trees.
//!
//! # Supported syntax
//!
//! - Type selectors and `*`: `div`, `*`
//! - `#id` and `.class`
//! - Combinators: `>`, `+`, `~`; whitespace only separates
//! - Attribute selectors: `[a]`, `[a=v]`, `[a~=v]`, `[a|=v]`, `[a^=v]`,
//!   `[a$=v]`, `[a*=v]`
//! - Structural pseudo-classes: `:root`, `:first-child`, `:last-child`,
//!   `:only-child`, their `-of-type` forms, `:empty`, and the zero-based
//!   `:nth-child(n)`, `:nth-last-child(n)`, `:nth-of-type(n)` and
//!   `:nth-last-of-type(n)`
//!
//! A selector is a left-to-right pipeline, not a set of compound
//! selectors: every step narrows or moves the working set produced by the
//! step before it. Bad input never errors; it just matches nothing.

mod matching;
/// Selector compilation.
pub mod selector;
/// Selector tokenization.
pub mod tokenizer;

pub use matching::search;
pub use selector::{AttributeSelector, NameTest, PseudoClass, Selector, Step};
pub use tokenizer::{SelectorToken, tokenize};
