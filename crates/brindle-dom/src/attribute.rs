use std::fmt;

use serde::Serialize;

/// The quote character an attribute value was written with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quote {
    /// `name="value"`
    #[default]
    Double,
    /// `name='value'`
    Single,
    /// `name=value`, or a bare `name` with no value at all.
    Unquoted,
}

impl Quote {
    /// Map a quote byte from the source to its variant.
    #[must_use]
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'"' => Some(Self::Double),
            b'\'' => Some(Self::Single),
            _ => None,
        }
    }

    /// The quote character to write, if any.
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Double => Some('"'),
            Self::Single => Some('\''),
            Self::Unquoted => None,
        }
    }
}

/// A single attribute on an element.
///
/// The value is stored exactly as written: no entity decoding and no
/// whitespace normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Attribute name as written.
    pub name: String,
    /// Raw value; `None` for a bare attribute.
    pub value: Option<String>,
    /// Quote character used around the value.
    pub quote: Quote,
}

impl Attribute {
    /// A double-quoted attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_quote(name, Some(value.into()), Quote::Double)
    }

    /// A bare attribute such as `disabled`.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self::with_quote(name, None, Quote::Unquoted)
    }

    /// An attribute with an explicit value and quote.
    #[must_use]
    pub fn with_quote(name: impl Into<String>, value: Option<String>, quote: Quote) -> Self {
        Self {
            name: name.into(),
            value,
            quote,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        let Some(value) = &self.value else {
            return Ok(());
        };
        f.write_str("=")?;
        match self.quote.as_char() {
            Some(q) => write!(f, "{q}{value}{q}"),
            None => f.write_str(value),
        }
    }
}
