//! Lenient XML and HTML tree builder for Brindle.
//!
//! # Scope
//!
//! This crate turns a markup string into a [`brindle_dom::DomTree`]:
//! - Text, comments, processing instructions and `<!…>` declarations
//! - Start tags with double-quoted, single-quoted, unquoted and bare attributes
//! - Self-closing tags (`<x/>`) and, in HTML mode, void elements such as `br`
//! - Raw-text elements (`script`, `style`) in HTML mode, kept verbatim
//!
//! The builder never fails. Mismatched end tags are dropped; a construct
//! that cannot be delimited ends the parse early and is reported as a
//! fatal [`ParseIssue`].
//!
//! # Not Implemented
//!
//! - Entity and character reference decoding
//! - HTML5 tree construction (implied tags, adoption agency, foster parenting)
//! - Namespaces and DTD validation

/// Attribute list parsing.
pub mod attributes;
mod builder;
/// Void and raw-text element classes.
pub mod tags;

pub use attributes::parse_attributes;
pub use builder::{Construct, ParseIssue, ParseOptions, ParseOutput, TreeBuilder, parse};
pub use tags::{RawTextTag, VoidTag, is_raw_text_tag, is_void_tag};
