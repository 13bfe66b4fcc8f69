//! Owned, serializable copies of subtrees.

use serde::Serialize;

use crate::{Attribute, DomTree, NodeId, NodeType};

/// A self-contained copy of a node and its descendants, suitable for JSON
/// output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NodeSnapshot {
    /// The document root.
    Document {
        /// Top-level nodes.
        children: Vec<NodeSnapshot>,
    },
    /// Character data.
    Text {
        /// The raw text.
        text: String,
    },
    /// A comment.
    Comment {
        /// Text between `<!--` and `-->`.
        comment: String,
    },
    /// A processing instruction.
    ProcessingInstruction {
        /// Target name.
        name: String,
        /// Content up to `?>`.
        content: String,
    },
    /// A `<!…>` declaration.
    Declaration {
        /// Declaration name.
        name: String,
        /// Content up to the closing `>`.
        content: String,
    },
    /// An element.
    Element {
        /// Tag name.
        name: String,
        /// Attributes in source order.
        attributes: Vec<Attribute>,
        /// Whether it is written as `<name/>`.
        closed: bool,
        /// Verbatim content of a raw-text element.
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_content: Option<String>,
        /// Child nodes.
        children: Vec<NodeSnapshot>,
    },
}

impl NodeSnapshot {
    fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
        match self {
            Self::Document { children } | Self::Element { children, .. } => Some(children),
            _ => None,
        }
    }
}

impl Drop for NodeSnapshot {
    // Descendants are moved onto a heap stack first; dropping never
    // recurses once per level.
    fn drop(&mut self) {
        let Some(children) = self.children_mut() else {
            return;
        };
        let mut stack = std::mem::take(children);
        while let Some(mut node) = stack.pop() {
            if let Some(grandchildren) = node.children_mut() {
                stack.append(grandchildren);
            }
        }
    }
}

impl DomTree {
    /// Copy the subtree at `id` out of the arena.
    #[must_use]
    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        if !self.contains(id) {
            return None;
        }
        // Post-order walk: each entered node opens a list that collects its
        // children's snapshots until the node is left again.
        let mut stack = vec![(id, false)];
        let mut pending: Vec<Vec<NodeSnapshot>> = Vec::new();
        while let Some((node, leaving)) = stack.pop() {
            if !leaving {
                stack.push((node, true));
                stack.extend(self.children(node).iter().rev().map(|&child| (child, false)));
                pending.push(Vec::new());
                continue;
            }
            let children = pending.pop().unwrap_or_default();
            let Some(snapshot) = self.snapshot_node(node, children) else {
                continue;
            };
            match pending.last_mut() {
                Some(siblings) => siblings.push(snapshot),
                None => return Some(snapshot),
            }
        }
        None
    }

    fn snapshot_node(&self, id: NodeId, children: Vec<NodeSnapshot>) -> Option<NodeSnapshot> {
        Some(match &self.get(id)?.node_type {
            NodeType::Document => NodeSnapshot::Document { children },
            NodeType::Text(text) => NodeSnapshot::Text { text: text.clone() },
            NodeType::Comment(comment) => NodeSnapshot::Comment {
                comment: comment.clone(),
            },
            NodeType::ProcessingInstruction { name, content } => {
                NodeSnapshot::ProcessingInstruction {
                    name: name.clone(),
                    content: content.clone(),
                }
            }
            NodeType::Declaration { name, content } => NodeSnapshot::Declaration {
                name: name.clone(),
                content: content.clone(),
            },
            NodeType::Element(data) => NodeSnapshot::Element {
                name: data.tag_name.clone(),
                attributes: data.attrs.clone(),
                closed: data.is_closed(),
                raw_content: data.raw_content().map(str::to_string),
                children,
            },
        })
    }
}
