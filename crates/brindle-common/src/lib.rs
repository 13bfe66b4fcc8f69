//! Common utilities for the Brindle parser.
//!
//! This crate provides shared infrastructure used by all parser components:
//! - **Scanner** - quote- and bracket-aware byte search over markup source
//! - **Case folding** - the single ASCII-only comparison routine every
//!   name match goes through
//! - **Warning System** - colored terminal output for unsupported syntax

/// ASCII case folding for tag, attribute and selector name comparisons.
pub mod case;
/// Byte-level search helpers used by the tree builder.
pub mod scan;
/// Deduplicated diagnostics on stderr.
pub mod warning;
