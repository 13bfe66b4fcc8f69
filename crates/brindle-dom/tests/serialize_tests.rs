//! Tests for markup output, attribute access, lookups and snapshots.

use brindle_dom::{
    Attribute, DomTree, ElementData, FormatOptions, NodeId, NodeKind, NodeSnapshot, NodeType,
    Quote,
};

fn element(tag: &str, attrs: Vec<Attribute>) -> NodeType {
    NodeType::Element(ElementData::with_attrs(tag, attrs, false))
}

/// `<r><a>1</a><b/></r>`
fn small_tree() -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let r = tree.alloc_child(NodeId::ROOT, element("r", vec![]));
    let a = tree.alloc_child(r, element("a", vec![]));
    let _ = tree.alloc_child(a, NodeType::Text("1".into()));
    let _ = tree.alloc_child(
        r,
        NodeType::Element(ElementData::with_attrs("b", vec![], true)),
    );
    (tree, r)
}

// ========== unformatted ==========

#[test]
fn test_outer_and_inner() {
    let (tree, r) = small_tree();
    assert_eq!(tree.outer(NodeId::ROOT), "<r><a>1</a><b/></r>");
    assert_eq!(tree.inner(r), "<a>1</a><b/>");
    assert_eq!(tree.outer(r), tree.outer(NodeId::ROOT));
}

#[test]
fn test_leaf_node_markup() {
    let mut tree = DomTree::new();
    let _ = tree.alloc_child(
        NodeId::ROOT,
        NodeType::ProcessingInstruction {
            name: "xml".into(),
            content: " version=\"1.0\"".into(),
        },
    );
    let _ = tree.alloc_child(
        NodeId::ROOT,
        NodeType::Declaration {
            name: "DOCTYPE".into(),
            content: " html".into(),
        },
    );
    let _ = tree.alloc_child(NodeId::ROOT, NodeType::Comment(" note ".into()));
    assert_eq!(
        tree.outer(NodeId::ROOT),
        "<?xml version=\"1.0\"?><!DOCTYPE html><!-- note -->"
    );
}

#[test]
fn test_attribute_quotes_round_trip() {
    let mut tree = DomTree::new();
    let attrs = vec![
        Attribute::new("a", "1"),
        Attribute::with_quote("b", Some("2".into()), Quote::Single),
        Attribute::with_quote("c", Some("3".into()), Quote::Unquoted),
        Attribute::bare("d"),
    ];
    let input = tree.alloc_child(
        NodeId::ROOT,
        NodeType::Element(ElementData::with_attrs("input", attrs, true)),
    );
    assert_eq!(tree.outer(input), r#"<input a="1" b='2' c=3 d/>"#);
}

#[test]
fn test_special_element_markup() {
    let mut tree = DomTree::new();
    let script = tree.alloc_child(
        NodeId::ROOT,
        NodeType::Element(ElementData::special(
            "script",
            vec![],
            Some("if (a<b) {}".into()),
        )),
    );
    let empty = tree.alloc_child(
        NodeId::ROOT,
        NodeType::Element(ElementData::special("style", vec![], None)),
    );
    assert_eq!(tree.outer(script), "<script>if (a<b) {}</script>");
    assert_eq!(tree.outer(empty), "<style/>");
    assert_eq!(tree.node_type(script).map(NodeType::kind), Some(NodeKind::Special));
    assert_eq!(NodeKind::ProcessingInstruction.to_string(), "processing-instruction");
}

// ========== formatted ==========

#[test]
fn test_pretty_from_root() {
    let (tree, _) = small_tree();
    assert_eq!(
        tree.serialize(NodeId::ROOT, &FormatOptions::pretty()),
        "  <r>\n    <a>\n      1\n    </a>\n    <b/>\n  </r>"
    );
}

#[test]
fn test_pretty_with_custom_layout() {
    let (tree, r) = small_tree();
    let options = FormatOptions::pretty()
        .with_indent("\t")
        .with_newline("\r\n")
        .with_level(1);
    assert_eq!(
        tree.serialize(r, &options),
        "<r>\r\n\t\t\t<a>\r\n\t\t\t\t1\r\n\t\t\t</a>\r\n\t\t\t<b/>\r\n\t\t</r>"
    );
}

#[test]
fn test_pretty_leaves_raw_content_alone() {
    let mut tree = DomTree::new();
    let style = tree.alloc_child(
        NodeId::ROOT,
        NodeType::Element(ElementData::special("style", vec![], Some("a{}\nb{}".into()))),
    );
    assert_eq!(
        tree.serialize(style, &FormatOptions::pretty()),
        "<style>a{}\nb{}</style>"
    );
}

// ========== attributes ==========

#[test]
fn test_attribute_lookup_folds_name_case() {
    let mut data = ElementData::with_attrs(
        "a",
        vec![Attribute::new("HREF", "/x"), Attribute::bare("download")],
        false,
    );
    assert_eq!(data.attr_value("href"), Some("/x"));
    assert_eq!(data.attr_value_with_case("href", false), None);
    assert_eq!(data.attr_value_with_case("HREF", false), Some("/x"));
    assert!(data.has_attr("DOWNLOAD"));
    assert_eq!(data.attr_value("download"), None);

    assert!(!data.set_attr("href", "/y"));
    assert_eq!(data.attr_value("HREF"), Some("/y"));
    assert!(data.set_attr("title", "t"));
    assert_eq!(data.attrs.len(), 3);
    assert!(data.set_attr_with_case("Title", "u", false));
    assert_eq!(data.attrs.len(), 4);
}

#[test]
fn test_set_attr_on_bare_attribute_adds_quotes() {
    let mut data = ElementData::with_attrs("input", vec![Attribute::bare("value")], true);
    assert!(!data.set_attr("value", "v"));
    assert_eq!(data.attrs[0].to_string(), r#"value="v""#);
}

#[test]
fn test_special_closed_tracks_content() {
    let mut data = ElementData::special("script", vec![], Some(String::new()));
    assert!(!data.is_closed());
    data.set_closed(true);
    assert!(data.is_closed());
    assert_eq!(data.raw_content(), None);
    data.set_closed(false);
    assert_eq!(data.raw_content(), Some(""));
}

// ========== lookups ==========

fn lookup_tree() -> DomTree {
    let mut tree = DomTree::new();
    let body = tree.alloc_child(NodeId::ROOT, element("body", vec![]));
    let _ = tree.alloc_child(
        body,
        element("DIV", vec![Attribute::new("id", "Main"), Attribute::new("class", "x  Y")]),
    );
    let _ = tree.alloc_child(
        body,
        element("div", vec![Attribute::new("ID", "main"), Attribute::new("lang", "en-US")]),
    );
    let _ = tree.alloc_child(body, element("p", vec![Attribute::new("class", "y")]));
    tree
}

#[test]
fn test_elements_by_id_is_case_insensitive() {
    let tree = lookup_tree();
    assert_eq!(tree.elements_by_id(NodeId::ROOT, "MAIN").len(), 2);
    assert!(tree.elements_by_id(NodeId::ROOT, "other").is_empty());
}

#[test]
fn test_elements_by_class_name() {
    let tree = lookup_tree();
    let found = tree.elements_by_class_name(NodeId::ROOT, "y");
    let names: Vec<&str> = found
        .iter()
        .filter_map(|&id| tree.as_element(id))
        .map(|e| e.tag_name.as_str())
        .collect();
    assert_eq!(names, vec!["DIV", "p"]);
}

#[test]
fn test_elements_by_tag_name_modes() {
    let tree = lookup_tree();
    assert_eq!(tree.elements_by_tag_name(NodeId::ROOT, "div", false).len(), 2);
    assert_eq!(tree.elements_by_tag_name(NodeId::ROOT, "div", true).len(), 1);
    assert_eq!(tree.elements_by_tag_name(NodeId::ROOT, "*", true).len(), 4);
}

#[test]
fn test_elements_by_attr() {
    let tree = lookup_tree();
    assert_eq!(tree.elements_by_attr(NodeId::ROOT, "lang", "en-US", false).len(), 1);
    assert!(tree.elements_by_attr(NodeId::ROOT, "lang", "en-us", false).is_empty());
    assert_eq!(tree.elements_by_attr(NodeId::ROOT, "id", "main", false).len(), 1);
    assert!(tree.elements_by_attr(NodeId::ROOT, "id", "main", true).is_empty());
}

#[test]
fn test_filters_exclude_scope() {
    let tree = lookup_tree();
    let body = tree.document_element().unwrap();
    let all = tree.nodes_by_filter(body, |_, _| true);
    assert_eq!(all.len(), 3);
    assert!(!all.contains(&body));
    let children = tree.child_elements_by_filter(NodeId::ROOT, |_, e| e.tag_name == "body");
    assert_eq!(children, vec![body]);
    let none = tree.child_nodes_by_filter(body, |_, node| !node.children().is_empty());
    assert!(none.is_empty());
}

// ========== snapshot ==========

#[test]
fn test_snapshot_json_shape() {
    let (tree, r) = small_tree();
    let snapshot = tree.snapshot(r).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["type"], "element");
    assert_eq!(json["name"], "r");
    assert_eq!(json["children"][0]["children"][0]["type"], "text");
    assert_eq!(json["children"][0]["children"][0]["text"], "1");
    assert_eq!(json["children"][1]["closed"], true);
    assert!(json.get("raw_content").is_none());
}

#[test]
fn test_outline_lists_every_node() {
    let (tree, _) = small_tree();
    let outline = tree.outline(NodeId::ROOT);
    assert_eq!(outline, "document\n  <r>\n    <a>\n      \"1\"\n    <b/>\n");
}

// ========== deep nesting ==========

const DEEP: usize = 100_000;

/// `depth` nested `<a>` elements around the text `x`; returns the text node.
fn chain(depth: usize) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let mut parent = NodeId::ROOT;
    for _ in 0..depth {
        parent = tree.alloc_child(parent, element("a", vec![]));
    }
    let leaf = tree.alloc_child(parent, NodeType::Text("x".into()));
    (tree, leaf)
}

#[test]
fn test_deep_tree_serializes() {
    let (tree, _) = chain(DEEP);
    let expected = format!("{}x{}", "<a>".repeat(DEEP), "</a>".repeat(DEEP));
    assert_eq!(tree.outer(NodeId::ROOT), expected);
    assert_eq!(tree.inner(NodeId::ROOT), expected);
}

#[test]
fn test_deep_element_formats_at_its_depth() {
    let (tree, leaf) = chain(DEEP);
    let innermost = tree.parent(leaf).unwrap();
    let options = FormatOptions::pretty().with_indent(".").with_newline("|");
    assert_eq!(
        tree.serialize(innermost, &options),
        format!("<a>|{}x|{}</a>", ".".repeat(DEEP + 1), ".".repeat(DEEP))
    );
}

#[test]
fn test_deep_tree_snapshot() {
    let (tree, _) = chain(DEEP);
    let snapshot = tree.snapshot(NodeId::ROOT).unwrap();

    let mut levels = 0;
    let mut current = &snapshot;
    while let NodeSnapshot::Document { children } | NodeSnapshot::Element { children, .. } =
        current
    {
        let Some(first) = children.first() else {
            break;
        };
        current = first;
        levels += 1;
    }
    assert_eq!(levels, DEEP + 1);
    assert_eq!(current, &NodeSnapshot::Text { text: "x".into() });
}

#[test]
fn test_deep_tree_outline() {
    let (tree, _) = chain(5_000);
    let outline = tree.outline(NodeId::ROOT);
    assert_eq!(outline.lines().count(), 5_002);
    assert!(outline.ends_with("\"x\"\n"));
}
