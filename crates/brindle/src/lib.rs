//! High-level document API for the Brindle parser.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Loading** - parse strings, or read and decode files
//! - **Querying** - CSS selector search over the parsed tree
//! - **Editing** - replace a node's children with freshly parsed markup
//!
//! The lower layers are re-exported for callers that need them directly.

mod document;
mod loading;

pub use brindle_dom as dom;
pub use brindle_markup as markup;
pub use brindle_select as select;

pub use document::{Document, set_inner};
pub use loading::{LoadError, read_source};
