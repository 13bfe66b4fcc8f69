//! The [`Document`] type: a parsed tree plus what the builder reported.

use std::fmt;
use std::path::Path;

use brindle_dom::{DomTree, NodeId, NodeType};
use brindle_markup::{ParseIssue, ParseOptions, parse};

use crate::loading::{LoadError, read_source};

/// A parsed document.
///
/// The document node is always [`NodeId::ROOT`]. Nodes created through the
/// document, or removed from it, stay in its arena until it is dropped.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    issues: Vec<ParseIssue>,
    xml_mode: bool,
}

impl Document {
    /// A document with a bare root and no children.
    #[must_use]
    pub fn create_empty() -> Self {
        Self {
            tree: DomTree::new(),
            issues: Vec::new(),
            xml_mode: false,
        }
    }

    /// Parse `source` with HTML rules.
    #[must_use]
    pub fn from_string(source: &str) -> Self {
        Self::from_string_with_mode(source, false)
    }

    /// Parse `source`, with XML rules when `xml_mode` is set.
    #[must_use]
    pub fn from_string_with_mode(source: &str, xml_mode: bool) -> Self {
        let output = parse(source, ParseOptions { xml_mode });
        Self {
            tree: output.tree,
            issues: output.issues,
            xml_mode,
        }
    }

    /// Read `path` as UTF-8 (or as its byte order mark says) and parse it
    /// with HTML rules.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(Self::from_string(&read_source(path, None)?))
    }

    /// Read `path` decoded with the encoding `label` and parse it with HTML
    /// rules.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedEncoding`] for an unknown label and
    /// [`LoadError::Io`] if the file cannot be read.
    pub fn from_file_with_encoding(path: impl AsRef<Path>, label: &str) -> Result<Self, LoadError> {
        Ok(Self::from_string(&read_source(path, Some(label))?))
    }

    /// The document node.
    #[must_use]
    pub const fn document(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Create a detached element owned by this document.
    pub fn create_element(&mut self, tag_name: impl Into<String>) -> NodeId {
        self.tree.create_element(tag_name)
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The underlying tree, for structural edits.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Consume the document and keep only its tree.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// Whether the document was parsed with XML rules.
    #[must_use]
    pub const fn is_xml(&self) -> bool {
        self.xml_mode
    }

    /// What the builder reported while parsing. Empty for well-formed input.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Run `selector` from the document node.
    #[must_use]
    pub fn search(&self, selector: &str) -> Vec<NodeId> {
        self.search_from(NodeId::ROOT, selector)
    }

    /// Run `selector` with `scope` as the starting context.
    #[must_use]
    pub fn search_from(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        brindle_select::search(&self.tree, scope, selector)
    }

    /// Unformatted markup of the children of `node`.
    #[must_use]
    pub fn inner(&self, node: NodeId) -> String {
        self.tree.inner(node)
    }

    /// Replace the children of `node` with the nodes parsed from `source`.
    /// See [`set_inner`]. Issues met while parsing `source` are appended to
    /// [`Document::issues`]; their offsets are relative to `source`.
    pub fn set_inner(&mut self, node: NodeId, source: &str, xml_mode: bool) -> bool {
        let options = ParseOptions { xml_mode };
        let (replaced, issues) = replace_children(&mut self.tree, node, source, options);
        self.issues.extend(issues);
        replaced
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::create_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tree.outer(NodeId::ROOT))
    }
}

/// Parse `source` and make its top-level nodes the new children of `node`.
///
/// Returns false, leaving `node` untouched, when parsing produced no nodes
/// or when `node` cannot hold parsed children: only the document node and
/// elements that are not raw-text qualify. A self-closed element stops
/// being self-closed once it has children. The old children are detached
/// but stay in the arena.
pub fn set_inner(tree: &mut DomTree, node: NodeId, source: &str, options: ParseOptions) -> bool {
    replace_children(tree, node, source, options).0
}

fn replace_children(
    tree: &mut DomTree,
    node: NodeId,
    source: &str,
    options: ParseOptions,
) -> (bool, Vec<ParseIssue>) {
    let accepts_children = match tree.node_type(node) {
        Some(NodeType::Document) => true,
        Some(NodeType::Element(element)) => !element.is_special(),
        _ => false,
    };
    if !accepts_children {
        return (false, Vec::new());
    }

    let parsed = parse(source, options);
    let top = parsed.tree.children(NodeId::ROOT);
    if top.is_empty() {
        return (false, parsed.issues);
    }

    if let Some(element) = tree.as_element_mut(node) {
        element.set_closed(false);
    }
    let _ = tree.clear_children(node);
    for &child in top {
        let Some(copy) = tree.import_subtree(&parsed.tree, child) else {
            continue;
        };
        if tree.append_child(node, copy).is_err() {
            return (false, parsed.issues);
        }
    }
    (true, parsed.issues)
}
