//! Node tree for the Brindle parser.
//!
//! This crate provides an arena-based tree of markup nodes: the document
//! root, text, comments, processing instructions, declarations, elements and
//! raw-text ("special") elements such as HTML `script` and `style`.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Each node
//! records its parent and its ordered children; the two are kept consistent by
//! every mutation in [`DomTree`]. Nodes that are detached (freshly created or
//! removed from their parent) stay in the arena until the tree is dropped.

mod attribute;
mod error;
mod mutation;
mod query;
mod serialize;
mod snapshot;

use brindle_common::case::str_eq;
use strum_macros::Display;

pub use attribute::{Attribute, Quote};
pub use error::DomError;
pub use serialize::FormatOptions;
pub use snapshot::NodeSnapshot;

/// A type-safe index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node in the arena: its payload plus its place in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub node_type: NodeType,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    const fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The node that lists this one among its children, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Node variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// Synthetic container at the top of a parsed tree. It has no markup of
    /// its own; it serializes as the concatenation of its children.
    Document,
    /// A run of character data, kept byte-for-byte.
    Text(String),
    /// `<!--…-->`; the payload excludes the delimiters.
    Comment(String),
    /// `<?name content?>`.
    ProcessingInstruction {
        /// Word run right after `<?`; may be empty.
        name: String,
        /// Everything between the name and `?>`, leading whitespace included.
        content: String,
    },
    /// `<!name content>`, such as a doctype or a CDATA section.
    Declaration {
        /// Word run right after `<!`; may be empty.
        name: String,
        /// Everything between the name and the matching `>`.
        content: String,
    },
    /// An element, including raw-text elements.
    Element(ElementData),
}

impl NodeType {
    /// The payload-free kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
            Self::ProcessingInstruction { .. } => NodeKind::ProcessingInstruction,
            Self::Declaration { .. } => NodeKind::Declaration,
            Self::Element(data) if data.is_special() => NodeKind::Special,
            Self::Element(_) => NodeKind::Element,
        }
    }
}

/// Node kinds without payload, for display and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum NodeKind {
    /// The synthetic document root.
    Document,
    /// Character data.
    Text,
    /// A comment.
    Comment,
    /// A processing instruction.
    ProcessingInstruction,
    /// A `<!…>` declaration.
    Declaration,
    /// An ordinary element.
    Element,
    /// A raw-text element whose content was not parsed.
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    Children { closed: bool },
    Raw(Option<String>),
}

/// Element-specific data.
///
/// An element either holds children (and may be `closed`, i.e. written as
/// `<name/>` with no children) or is *special*: its content is an unparsed
/// string kept verbatim. A special element is closed exactly when it has no
/// raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// The tag name as written in the source.
    pub tag_name: String,
    /// Attributes in source order.
    pub attrs: Vec<Attribute>,
    body: Body,
}

impl ElementData {
    /// An open element with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self::with_attrs(tag_name, Vec::new(), false)
    }

    /// An ordinary element with the given attributes and closed flag.
    #[must_use]
    pub fn with_attrs(tag_name: impl Into<String>, attrs: Vec<Attribute>, closed: bool) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs,
            body: Body::Children { closed },
        }
    }

    /// A raw-text element. `None` content makes it a closed `<name/>`.
    #[must_use]
    pub fn special(
        tag_name: impl Into<String>,
        attrs: Vec<Attribute>,
        content: Option<String>,
    ) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs,
            body: Body::Raw(content),
        }
    }

    /// Whether this element serializes as `<name/>`.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        match &self.body {
            Body::Children { closed } => *closed,
            Body::Raw(content) => content.is_none(),
        }
    }

    /// Change the closed flag of an ordinary element.
    ///
    /// For a special element, closing drops its raw content and opening gives
    /// it empty content.
    pub fn set_closed(&mut self, closed: bool) {
        match &mut self.body {
            Body::Children { closed: flag } => *flag = closed,
            Body::Raw(content) => {
                if closed {
                    *content = None;
                } else if content.is_none() {
                    *content = Some(String::new());
                }
            }
        }
    }

    /// Whether this is a raw-text element.
    #[must_use]
    pub const fn is_special(&self) -> bool {
        matches!(self.body, Body::Raw(_))
    }

    /// The verbatim content of a raw-text element.
    #[must_use]
    pub fn raw_content(&self) -> Option<&str> {
        match &self.body {
            Body::Raw(content) => content.as_deref(),
            Body::Children { .. } => None,
        }
    }

    /// Replace the raw content, turning the element special if it was not.
    pub fn set_raw_content(&mut self, content: Option<String>) {
        self.body = Body::Raw(content);
    }

    /// Compare the tag name, folding ASCII case when asked.
    #[must_use]
    pub fn has_name(&self, name: &str, ignore_case: bool) -> bool {
        str_eq(&self.tag_name, name, ignore_case)
    }

    /// First attribute named `name`, compared case-insensitively.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&Attribute> {
        self.get_attr_with_case(name, true)
    }

    /// First attribute named `name`.
    #[must_use]
    pub fn get_attr_with_case(&self, name: &str, ignore_case: bool) -> Option<&Attribute> {
        self.attrs
            .iter()
            .find(|attr| str_eq(&attr.name, name, ignore_case))
    }

    /// Mutable access to the first attribute named `name`.
    pub fn get_attr_mut(&mut self, name: &str, ignore_case: bool) -> Option<&mut Attribute> {
        self.attrs
            .iter_mut()
            .find(|attr| str_eq(&attr.name, name, ignore_case))
    }

    /// Whether an attribute named `name` exists, with or without a value.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Value of attribute `name`; the name is always matched case-insensitively.
    /// A bare attribute (`<input disabled>`) has no value.
    #[must_use]
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attr_value_with_case(name, true)
    }

    /// Value of attribute `name`, matching the name exactly unless `ignore_case`.
    #[must_use]
    pub fn attr_value_with_case(&self, name: &str, ignore_case: bool) -> Option<&str> {
        self.get_attr_with_case(name, ignore_case)
            .and_then(|attr| attr.value.as_deref())
    }

    /// Set attribute `name` (matched case-insensitively) to `value`.
    ///
    /// Returns true if a new attribute was appended, false if an existing one
    /// was overwritten. An overwritten attribute keeps its quote character.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.set_attr_with_case(name, value, true)
    }

    /// Set attribute `name` to `value`, matching the name exactly unless `ignore_case`.
    pub fn set_attr_with_case(
        &mut self,
        name: &str,
        value: impl Into<String>,
        ignore_case: bool,
    ) -> bool {
        let value = value.into();
        if let Some(attr) = self.get_attr_mut(name, ignore_case) {
            if attr.quote == Quote::Unquoted {
                attr.quote = Quote::default();
            }
            attr.value = Some(value);
            false
        } else {
            self.attrs.push(Attribute::new(name, value));
            true
        }
    }

    /// The `id` attribute value.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr_value("id")
    }

    /// Class names from the `class` attribute, split on ASCII whitespace.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr_value("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Whether the `class` list contains `class_name`, ignoring ASCII case.
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes().any(|c| c.eq_ignore_ascii_case(class_name))
    }
}

/// Arena-based node tree with O(1) node access and traversal.
///
/// All nodes live in one vector and refer to each other by [`NodeId`].
/// The document root is always at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree with just the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeType::Document)],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    ///
    /// Only the payload is reachable this way; links are changed through the
    /// mutation methods so parent and children stay consistent.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Whether `id` refers to a node of this tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Number of nodes in the arena, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (it always holds at least the document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(node_type));
        id
    }

    /// Allocate a detached, open element with no attributes.
    pub fn create_element(&mut self, tag_name: impl Into<String>) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(tag_name)))
    }

    /// The payload of a node.
    #[must_use]
    pub fn node_type(&self, id: NodeId) -> Option<&NodeType> {
        self.get(id).map(|n| &n.node_type)
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The child at `index`, if there is one.
    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Element children in document order.
    #[must_use]
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    /// Element children whose tag name is exactly `tag_name`.
    #[must_use]
    pub fn child_elements_named(&self, id: NodeId, tag_name: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.as_element(c).is_some_and(|e| e.tag_name == tag_name))
            .collect()
    }

    /// The element child at `index` among element children only.
    #[must_use]
    pub fn child_element(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .nth(index)
    }

    /// Position of `child` in `parent`'s children.
    #[must_use]
    pub fn index_of_child(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Position of `child` among `parent`'s element children.
    #[must_use]
    pub fn index_of_child_element(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .position(|c| c == child)
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Number of ancestors; a root or detached node has depth 0.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Iterate over every node below `id` in depth-first pre-order
    /// (document order), not including `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Siblings after `id` in document order.
    #[must_use]
    pub fn following_siblings(&self, id: NodeId) -> &[NodeId] {
        let Some(parent) = self.parent(id) else {
            return &[];
        };
        let siblings = self.children(parent);
        siblings
            .iter()
            .position(|&c| c == id)
            .map_or(&[], |i| &siblings[i + 1..])
    }

    /// The first element after `id` among its siblings.
    #[must_use]
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.following_siblings(id)
            .iter()
            .copied()
            .find(|&c| self.is_element(c))
    }

    /// Whether the node is an element (special elements included).
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.as_element(id).is_some()
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The first element child of the document root.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.is_element(id))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
