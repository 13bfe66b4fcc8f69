//! Markup output for nodes and subtrees.
//!
//! Unformatted output is the concatenation of every node's markup in
//! document order; for a well-formed source it reproduces the input.
//! Formatted output puts each child on its own line, indented by the
//! child's depth in the tree plus [`FormatOptions::level`].

use std::fmt::Write;

use crate::{DomTree, NodeId, NodeType};

/// Layout settings for [`DomTree::serialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Break and indent children. When false the other fields are unused.
    pub format: bool,
    /// One level of indentation.
    pub indent: String,
    /// Line separator.
    pub newline: String,
    /// Extra indentation levels added to every line.
    pub level: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            format: false,
            indent: "  ".to_string(),
            newline: "\n".to_string(),
            level: 0,
        }
    }
}

impl FormatOptions {
    /// Formatting switched on with two-space indents and `\n`.
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            format: true,
            ..Self::default()
        }
    }

    /// Use `indent` as one indentation level.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Use `newline` as the line separator.
    #[must_use]
    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    /// Shift every line right by `level` indentation levels.
    #[must_use]
    pub const fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }
}

/// Pending work for the serializer. Subtrees are walked with an explicit
/// stack so nesting depth is bounded by memory, not by the call stack.
enum Frame {
    /// Emit a node, preceded by `lead`.
    Node {
        id: NodeId,
        depth: usize,
        lead: Lead,
    },
    /// Emit the end tag of an element whose children have been written.
    EndTag { id: NodeId, depth: usize, wrap: bool },
}

/// What goes in front of a node in formatted output.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Lead {
    None,
    Indent,
    BreakAndIndent,
}

impl DomTree {
    /// Unformatted markup of `id` and its subtree.
    #[must_use]
    pub fn outer(&self, id: NodeId) -> String {
        self.serialize(id, &FormatOptions::default())
    }

    /// Unformatted markup of the children of `id`, concatenated.
    #[must_use]
    pub fn inner(&self, id: NodeId) -> String {
        let options = FormatOptions::default();
        let mut stack = Vec::new();
        self.push_children(&mut stack, id, 0, &options);
        let mut out = String::new();
        self.drain(&mut out, stack, &options);
        out
    }

    /// Markup of `id` and its subtree with the given layout.
    #[must_use]
    pub fn serialize(&self, id: NodeId, options: &FormatOptions) -> String {
        let depth = if options.format { self.depth(id) } else { 0 };
        let stack = vec![Frame::Node {
            id,
            depth,
            lead: Lead::None,
        }];
        let mut out = String::new();
        self.drain(&mut out, stack, options);
        out
    }

    fn drain(&self, out: &mut String, mut stack: Vec<Frame>, options: &FormatOptions) {
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Node { id, depth, lead } => {
                    if lead == Lead::BreakAndIndent {
                        out.push_str(&options.newline);
                    }
                    if lead != Lead::None {
                        push_indent(out, options, depth + options.level);
                    }
                    self.open_node(out, &mut stack, id, depth, options);
                }
                Frame::EndTag { id, depth, wrap } => {
                    if wrap {
                        out.push_str(&options.newline);
                        push_indent(out, options, depth + options.level);
                    }
                    if let Some(data) = self.as_element(id) {
                        let _ = write!(out, "</{}>", data.tag_name);
                    }
                }
            }
        }
    }

    /// Write everything of `id` that precedes its children, and schedule
    /// the children and the end tag.
    fn open_node(
        &self,
        out: &mut String,
        stack: &mut Vec<Frame>,
        id: NodeId,
        depth: usize,
        options: &FormatOptions,
    ) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.node_type {
            NodeType::Document => self.push_children(stack, id, depth, options),
            NodeType::Text(text) => out.push_str(text),
            NodeType::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
            NodeType::ProcessingInstruction { name, content } => {
                out.push_str("<?");
                out.push_str(name);
                out.push_str(content);
                out.push_str("?>");
            }
            NodeType::Declaration { name, content } => {
                out.push_str("<!");
                out.push_str(name);
                out.push_str(content);
                out.push('>');
            }
            NodeType::Element(data) => {
                out.push('<');
                out.push_str(&data.tag_name);
                for attr in &data.attrs {
                    let _ = write!(out, " {attr}");
                }
                if data.is_closed() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                if data.is_special() {
                    out.push_str(data.raw_content().unwrap_or_default());
                    let _ = write!(out, "</{}>", data.tag_name);
                    return;
                }
                let wrap = options.format && !node.children().is_empty();
                if wrap {
                    out.push_str(&options.newline);
                }
                stack.push(Frame::EndTag { id, depth, wrap });
                self.push_children(stack, id, depth, options);
            }
        }
    }

    /// Schedule the children of `id` (at `depth`) so they pop in order.
    fn push_children(
        &self,
        stack: &mut Vec<Frame>,
        id: NodeId,
        depth: usize,
        options: &FormatOptions,
    ) {
        for (i, &child) in self.children(id).iter().enumerate().rev() {
            let lead = match (options.format, i) {
                (false, _) => Lead::None,
                (true, 0) => Lead::Indent,
                (true, _) => Lead::BreakAndIndent,
            };
            stack.push(Frame::Node {
                id: child,
                depth: depth + 1,
                lead,
            });
        }
    }

    /// One line per node describing the subtree at `id`, for debugging.
    /// Whitespace in text is made visible.
    #[must_use]
    pub fn outline(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![(id, 0)];
        while let Some((id, indent)) = stack.pop() {
            self.write_outline_line(&mut out, id, indent);
            stack.extend(self.children(id).iter().rev().map(|&child| (child, indent + 1)));
        }
        out
    }

    fn write_outline_line(&self, out: &mut String, id: NodeId, indent: usize) {
        let Some(node) = self.get(id) else {
            return;
        };
        let prefix = "  ".repeat(indent);
        let kind = node.node_type.kind();
        let _ = match &node.node_type {
            NodeType::Document => writeln!(out, "{prefix}{kind}"),
            NodeType::Element(data) => {
                let mut line = format!("{prefix}<{}", data.tag_name);
                for attr in &data.attrs {
                    let _ = write!(line, " {attr}");
                }
                line.push_str(if data.is_closed() { "/>" } else { ">" });
                if let Some(raw) = data.raw_content() {
                    let _ = write!(line, " {kind} {} bytes", raw.len());
                }
                writeln!(out, "{line}")
            }
            NodeType::Text(text) => {
                let display = text.replace('\n', "\\n").replace(' ', "\u{00B7}");
                writeln!(out, "{prefix}\"{display}\"")
            }
            NodeType::Comment(comment) => writeln!(out, "{prefix}<!--{comment}-->"),
            NodeType::ProcessingInstruction { name, .. } | NodeType::Declaration { name, .. } => {
                writeln!(out, "{prefix}{kind} {name}")
            }
        };
    }
}

fn push_indent(out: &mut String, options: &FormatOptions, level: usize) {
    for _ in 0..level {
        out.push_str(&options.indent);
    }
}
