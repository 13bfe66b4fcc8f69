//! HTML tag classes that change how the builder treats an element.
//!
//! Neither list applies in XML mode.

use std::str::FromStr;

use strum_macros::{Display, EnumString};

/// Elements that never have content. In HTML mode their start tag always
/// produces a closed element, with or without a trailing `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoidTag {
    /// `<br>`
    Br,
    /// `<hr>`
    Hr,
    /// `<img>`
    Img,
    /// `<input>`
    Input,
    /// `<param>`
    Param,
    /// `<meta>`
    Meta,
    /// `<link>`
    Link,
    /// `<area>`
    Area,
}

/// Elements whose content is kept as one verbatim string instead of being
/// parsed as markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RawTextTag {
    /// `<style>`
    Style,
    /// `<script>`
    Script,
}

/// Whether `name` is a void element, ignoring ASCII case.
#[must_use]
pub fn is_void_tag(name: &str) -> bool {
    VoidTag::from_str(name).is_ok()
}

/// Whether `name` is a raw-text element, ignoring ASCII case.
#[must_use]
pub fn is_raw_text_tag(name: &str) -> bool {
    RawTextTag::from_str(name).is_ok()
}
