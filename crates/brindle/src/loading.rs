//! Reading markup from disk.
//!
//! Files are decoded with `encoding_rs`. Without an explicit label a
//! byte order mark picks the encoding and everything else is read as
//! UTF-8, with malformed sequences replaced by U+FFFD.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use thiserror::Error;

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read '{}'", path.display())]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The encoding label is not one `encoding_rs` knows.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),
}

/// Read the file at `path` and decode it to a string.
///
/// `encoding` is a WHATWG label such as `"utf-8"`, `"gbk"` or
/// `"windows-1252"`, matched ignoring case. A byte order mark in the file
/// still takes precedence over the label.
///
/// # Errors
///
/// [`LoadError::UnsupportedEncoding`] for an unknown label, checked before
/// the file is touched, and [`LoadError::Io`] if reading fails.
pub fn read_source(path: impl AsRef<Path>, encoding: Option<&str>) -> Result<String, LoadError> {
    let path = path.as_ref();
    let encoding = match encoding {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| LoadError::UnsupportedEncoding(label.to_string()))?,
        None => UTF_8,
    };
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode(&bytes, encoding))
}

fn decode(bytes: &[u8], fallback: &'static Encoding) -> String {
    let (text, _used, _had_errors) = fallback.decode(bytes);
    text.into_owned()
}
