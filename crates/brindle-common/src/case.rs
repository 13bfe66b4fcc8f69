//! ASCII-only case folding.
//!
//! Locale-sensitive mapping is never used: `I` folds to `i` regardless of the
//! environment, and non-ASCII characters compare exactly.

/// Compare two bytes, folding ASCII letters when `ignore_case` is set.
#[must_use]
pub const fn byte_eq(a: u8, b: u8, ignore_case: bool) -> bool {
    if ignore_case {
        a.eq_ignore_ascii_case(&b)
    } else {
        a == b
    }
}

/// Compare two strings, folding ASCII letters when `ignore_case` is set.
#[must_use]
pub fn str_eq(a: &str, b: &str, ignore_case: bool) -> bool {
    if ignore_case {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_only_when_asked() {
        assert!(str_eq("DIV", "div", true));
        assert!(!str_eq("DIV", "div", false));
        assert!(byte_eq(b'Q', b'q', true));
        assert!(!byte_eq(b'Q', b'q', false));
    }

    #[test]
    fn test_non_ascii_is_exact() {
        assert!(!str_eq("É", "é", true));
        assert!(str_eq("é", "é", true));
    }
}
