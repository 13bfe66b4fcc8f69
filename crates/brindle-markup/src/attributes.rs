//! Attribute list parsing for the inside of a start tag.

use brindle_common::scan::{find_byte, is_space, next_non_space, word_end};
use brindle_dom::{Attribute, Quote};

/// Parse the attributes in `source[start..end]`, the region between a tag
/// name and its closing `>` (or self-closing `/`).
///
/// Three forms are recognized: `name="v"` / `name='v'`, `name=v`, and a bare
/// `name`. A quoted value with no closing quote runs to the end of the
/// region. Bytes that cannot start a name are skipped.
#[must_use]
pub fn parse_attributes(source: &str, start: usize, end: usize) -> Vec<Attribute> {
    let bytes = source.as_bytes();
    let end = end.min(bytes.len());
    let mut attrs = Vec::new();
    let mut index = start;

    while let Some(name_start) = next_non_space(bytes, index, end) {
        let name_end = word_end(bytes, name_start, end);
        if name_end == name_start {
            index = name_start + 1;
            continue;
        }
        let name = &source[name_start..name_end];

        let equals = next_non_space(bytes, name_end, end).filter(|&i| bytes[i] == b'=');
        let Some(equals) = equals else {
            attrs.push(Attribute::bare(name));
            index = name_end;
            continue;
        };

        let Some(value_start) = next_non_space(bytes, equals + 1, end) else {
            attrs.push(Attribute::bare(name));
            break;
        };

        if let Some(quote) = Quote::from_byte(bytes[value_start]) {
            let close = find_byte(bytes, bytes[value_start], value_start + 1, end).unwrap_or(end);
            let value = source[value_start + 1..close].to_string();
            attrs.push(Attribute::with_quote(name, Some(value), quote));
            index = close + 1;
        } else {
            let value_end = (value_start..end)
                .find(|&i| is_space(bytes[i]) || bytes[i] == b'>')
                .unwrap_or(end);
            let value = source[value_start..value_end].to_string();
            attrs.push(Attribute::with_quote(name, Some(value), Quote::Unquoted));
            index = value_end;
        }
    }
    attrs
}
