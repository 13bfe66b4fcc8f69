use std::fmt;
use std::ops::ControlFlow;

use brindle_common::scan::{
    ScanMode, find_byte, find_str, find_unquoted, find_unquoted_str, is_space, is_word_byte,
    word_end,
};
use brindle_dom::{DomTree, ElementData, NodeId, NodeType};
use strum_macros::Display;

use crate::attributes::parse_attributes;
use crate::tags::{is_raw_text_tag, is_void_tag};

/// Dialect settings for the builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// XML rules: case-sensitive tag matching, no void elements and no
    /// raw-text elements. When false, HTML rules apply.
    pub xml_mode: bool,
}

impl ParseOptions {
    /// HTML rules (the default).
    #[must_use]
    pub const fn html() -> Self {
        Self { xml_mode: false }
    }

    /// XML rules.
    #[must_use]
    pub const fn xml() -> Self {
        Self { xml_mode: true }
    }
}

/// The markup construct an issue was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Construct {
    /// `<?…?>`
    ProcessingInstruction,
    /// `<!--…-->`
    Comment,
    /// `<!…>`
    Declaration,
    /// `<name …>`
    StartTag,
    /// `</name>`
    EndTag,
    /// Content of a raw-text element.
    RawText,
}

/// Something the builder could not take at face value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Where the problem was found.
    pub construct: Construct,
    /// Human-readable description.
    pub message: String,
    /// Byte offset of the `<` that opened the construct.
    pub offset: usize,
    /// Whether parsing stopped here. Non-fatal issues only discard markup.
    pub fatal: bool,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = if self.fatal { "error" } else { "warning" };
        write!(
            f,
            "{severity}: {} at byte {}: {}",
            self.construct, self.offset, self.message
        )
    }
}

/// A parsed tree plus the issues met while building it.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// The tree; the document node is at [`NodeId::ROOT`].
    pub tree: DomTree,
    /// Issues in source order. At most the last one is fatal.
    pub issues: Vec<ParseIssue>,
}

/// Parse `source` into a new tree.
#[must_use]
pub fn parse(source: &str, options: ParseOptions) -> ParseOutput {
    TreeBuilder::new(source, options).run()
}

/// Where the next step resumes: text is collected from `text_start`, and
/// the next `<` is searched for from `search_from`.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    text_start: usize,
    search_from: usize,
}

impl Cursor {
    const fn at(index: usize) -> Self {
        Self {
            text_start: index,
            search_from: index,
        }
    }
}

/// Single-pass builder that jumps from `<` to `<` and keeps one open
/// element as its insertion context.
///
/// The builder never fails. A construct it cannot delimit (an unterminated
/// comment, tag or raw-text element) ends the parse; everything before it
/// stays in the tree and a fatal [`ParseIssue`] is recorded.
pub struct TreeBuilder<'a> {
    source: &'a str,
    options: ParseOptions,
    tree: DomTree,
    /// Element new nodes are appended to; the document when none is open.
    context: NodeId,
    issues: Vec<ParseIssue>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder over `source`.
    #[must_use]
    pub fn new(source: &'a str, options: ParseOptions) -> Self {
        Self {
            source,
            options,
            tree: DomTree::new(),
            context: NodeId::ROOT,
            issues: Vec::new(),
        }
    }

    /// Build the tree.
    #[must_use]
    pub fn run(mut self) -> ParseOutput {
        let mut cursor = Cursor::at(0);
        while let ControlFlow::Continue(next) = self.step(cursor) {
            cursor = next;
        }
        ParseOutput {
            tree: self.tree,
            issues: self.issues,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    fn end(&self) -> usize {
        self.source.len()
    }

    fn step(&mut self, cursor: Cursor) -> ControlFlow<(), Cursor> {
        let bytes = self.bytes();
        let end = self.end();
        let Some(lt) = find_byte(bytes, b'<', cursor.search_from, end) else {
            self.push_text(cursor.text_start, end);
            return ControlFlow::Break(());
        };
        self.push_text(cursor.text_start, lt);

        let next = match bytes.get(lt + 1) {
            None => self.fail(Construct::StartTag, lt, "input ends after `<`"),
            Some(b'?') => self.processing_instruction(lt),
            Some(b'!') if bytes[lt + 2..].starts_with(b"--") => self.comment(lt),
            Some(b'!') => self.declaration(lt),
            Some(b'/') => self.end_tag(lt),
            Some(&b) if is_word_byte(b) => self.start_tag(lt),
            // `a < b`, `<>`: not a tag, the `<` stays in the text.
            Some(_) => {
                return ControlFlow::Continue(Cursor {
                    text_start: lt,
                    search_from: lt + 1,
                });
            }
        };
        next.map_continue(Cursor::at)
    }

    fn processing_instruction(&mut self, lt: usize) -> ControlFlow<(), usize> {
        let bytes = self.bytes();
        let end = self.end();
        let name_end = word_end(bytes, lt + 2, end);
        if name_end >= end {
            return self.fail(
                Construct::ProcessingInstruction,
                lt,
                "input ends inside the target name",
            );
        }
        let Some(close) = find_unquoted_str(bytes, b"?>", name_end, end, ScanMode::NESTED) else {
            return self.fail(Construct::ProcessingInstruction, lt, "no matching `?>`");
        };
        let node = NodeType::ProcessingInstruction {
            name: self.source[lt + 2..name_end].to_string(),
            content: self.source[name_end..close].to_string(),
        };
        let _ = self.tree.alloc_child(self.context, node);
        ControlFlow::Continue(close + 2)
    }

    fn comment(&mut self, lt: usize) -> ControlFlow<(), usize> {
        let Some(close) = find_str(self.bytes(), b"-->", lt + 4, self.end()) else {
            return self.fail(Construct::Comment, lt, "unterminated comment");
        };
        let node = NodeType::Comment(self.source[lt + 4..close].to_string());
        let _ = self.tree.alloc_child(self.context, node);
        ControlFlow::Continue(close + 3)
    }

    fn declaration(&mut self, lt: usize) -> ControlFlow<(), usize> {
        let bytes = self.bytes();
        let end = self.end();
        let name_end = word_end(bytes, lt + 2, end);
        let Some(gt) = find_unquoted(bytes, b'>', name_end, end, ScanMode::NESTED) else {
            return self.fail(Construct::Declaration, lt, "no matching `>`");
        };
        let node = NodeType::Declaration {
            name: self.source[lt + 2..name_end].to_string(),
            content: self.source[name_end..gt].to_string(),
        };
        let _ = self.tree.alloc_child(self.context, node);
        ControlFlow::Continue(gt + 1)
    }

    fn end_tag(&mut self, lt: usize) -> ControlFlow<(), usize> {
        let Some(gt) = find_unquoted(self.bytes(), b'>', lt + 2, self.end(), ScanMode::FLAT) else {
            return self.fail(Construct::EndTag, lt, "no matching `>`");
        };
        let source = self.source;
        let name = source[lt + 2..gt].trim();
        let ignore_case = !self.options.xml_mode;
        let closes_context = self
            .tree
            .as_element(self.context)
            .is_some_and(|e| !e.is_closed() && e.has_name(name, ignore_case));
        if closes_context {
            self.context = self.tree.parent(self.context).unwrap_or(NodeId::ROOT);
        } else {
            self.warn(Construct::EndTag, lt, &format!("discarded unmatched `</{name}>`"));
        }
        ControlFlow::Continue(gt + 1)
    }

    fn start_tag(&mut self, lt: usize) -> ControlFlow<(), usize> {
        let bytes = self.bytes();
        let end = self.end();
        let name_end = word_end(bytes, lt + 1, end);
        let Some(gt) = find_unquoted(bytes, b'>', name_end, end, ScanMode::FLAT) else {
            return self.fail(Construct::StartTag, lt, "no matching `>`");
        };
        let source = self.source;
        let name = &source[lt + 1..name_end];

        // A `/` as the last non-blank byte before `>` closes the tag.
        let slash = (name_end..gt)
            .rev()
            .find(|&i| !is_space(bytes[i]))
            .filter(|&i| bytes[i] == b'/');
        let attrs = parse_attributes(source, name_end, slash.unwrap_or(gt));
        let html = !self.options.xml_mode;
        let closed = slash.is_some() || (html && is_void_tag(name));

        if html && is_raw_text_tag(name) {
            if closed {
                let node = ElementData::special(name, attrs, None);
                let _ = self.tree.alloc_child(self.context, NodeType::Element(node));
                return ControlFlow::Continue(gt + 1);
            }
            let Some((content_end, resume)) = self.find_raw_text_end(name, gt + 1) else {
                return self.fail(Construct::RawText, lt, &format!("no closing `</{name}>`"));
            };
            let content = source[gt + 1..content_end].to_string();
            let node = ElementData::special(name, attrs, Some(content));
            let _ = self.tree.alloc_child(self.context, NodeType::Element(node));
            return ControlFlow::Continue(resume);
        }

        let node = ElementData::with_attrs(name, attrs, closed);
        let id = self.tree.alloc_child(self.context, NodeType::Element(node));
        if !closed {
            self.context = id;
        }
        ControlFlow::Continue(gt + 1)
    }

    /// Find the end tag of raw-text element `name`, searching from `from`.
    /// Returns the offset of its `<` and the offset just past its `>`.
    fn find_raw_text_end(&self, name: &str, from: usize) -> Option<(usize, usize)> {
        let bytes = self.bytes();
        let end = self.end();
        let mut search = from;
        while search < end {
            let lt = find_unquoted_str(bytes, b"</", search, end, ScanMode::FLAT)?;
            let gt = find_unquoted(bytes, b'>', lt + 2, end, ScanMode::FLAT)?;
            if self.source[lt + 2..gt].trim().eq_ignore_ascii_case(name) {
                return Some((lt, gt + 1));
            }
            search = gt + 1;
        }
        None
    }

    fn push_text(&mut self, start: usize, end: usize) {
        if start < end {
            let text = NodeType::Text(self.source[start..end].to_string());
            let _ = self.tree.alloc_child(self.context, text);
        }
    }

    fn warn(&mut self, construct: Construct, offset: usize, message: &str) {
        self.record(construct, offset, message, false);
    }

    fn fail<T>(&mut self, construct: Construct, offset: usize, message: &str) -> ControlFlow<(), T> {
        self.record(construct, offset, message, true);
        ControlFlow::Break(())
    }

    /// Issues are only stored; callers decide whether to show them.
    fn record(&mut self, construct: Construct, offset: usize, message: &str, fatal: bool) {
        self.issues.push(ParseIssue {
            construct,
            message: message.to_string(),
            offset,
            fatal,
        });
    }
}
