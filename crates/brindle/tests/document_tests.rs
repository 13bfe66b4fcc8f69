//! Integration tests for the document façade.

use std::path::PathBuf;

use brindle::dom::{NodeId, NodeType};
use brindle::markup::Construct;
use brindle::{Document, LoadError};

fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("brindle-{}-{name}", std::process::id()));
    std::fs::write(&path, bytes).unwrap();
    path
}

// ========== end-to-end scenarios ==========

#[test]
fn test_id_after_type() {
    let doc = Document::from_string(r#"<r><a id="x">1</a><a id="y">2</a></r>"#);
    let found = doc.search("a#y");
    assert_eq!(found.len(), 1);
    assert_eq!(doc.inner(found[0]), "2");
}

#[test]
fn test_class_match() {
    let doc = Document::from_string(r#"<r><p class="a b">1</p><p class="b">2</p></r>"#);
    let found = doc.search(".a");
    assert_eq!(found.len(), 1);
    assert_eq!(doc.inner(found[0]), "1");
}

#[test]
fn test_nth_of_type_counts_from_zero() {
    let doc = Document::from_string("<r><a/><b/><a/></r>");
    let r = doc.search("r")[0];
    let second_a = doc.tree().child_elements_named(r, "a")[1];
    assert_eq!(doc.search("a:nth-of-type(1)"), vec![second_a]);
}

#[test]
fn test_last_child() {
    let doc = Document::from_string("<ul><li>1</li><li>2</li><li>3</li></ul>");
    let found = doc.search("li:last-child");
    assert_eq!(found.len(), 1);
    assert_eq!(doc.inner(found[0]), "3");
}

#[test]
fn test_attribute_prefix_in_document_order() {
    let doc = Document::from_string(r#"<r><a href="/x">1</a><a href="/xyz">2</a></r>"#);
    let found = doc.search(r#"a[href^="/x"]"#);
    let inners: Vec<_> = found.iter().map(|&id| doc.inner(id)).collect();
    assert_eq!(inners, vec!["1", "2"]);
}

#[test]
fn test_script_content_is_raw() {
    let doc = Document::from_string("<html><head><script>x<y</script></head></html>");
    let found = doc.search("script");
    assert_eq!(found.len(), 1);
    let script = doc.tree().as_element(found[0]).unwrap();
    assert!(script.is_special());
    assert_eq!(script.raw_content(), Some("x<y"));
    assert!(doc.issues().is_empty());
}

// ========== construction ==========

#[test]
fn test_create_empty() {
    let mut doc = Document::create_empty();
    assert!(doc.tree().children(doc.document()).is_empty());
    assert_eq!(doc.to_string(), "");

    let div = doc.create_element("div");
    assert_eq!(doc.tree().parent(div), None);
    let root = doc.document();
    doc.tree_mut().append_child(root, div).unwrap();
    assert_eq!(doc.to_string(), "<div></div>");
}

#[test]
fn test_display_round_trips() {
    let source = r#"<?xml version="1.0"?><r a='1'><!-- c --><b/>t</r>"#;
    assert_eq!(Document::from_string_with_mode(source, true).to_string(), source);
}

#[test]
fn test_mode_is_remembered() {
    assert!(Document::from_string_with_mode("<a/>", true).is_xml());
    assert!(!Document::from_string("<a/>").is_xml());
}

#[test]
fn test_issues_are_kept() {
    let doc = Document::from_string("<r><!-- open");
    let last = doc.issues().last().unwrap();
    assert!(last.fatal);
    assert_eq!(last.construct, Construct::Comment);
    assert_eq!(doc.search("r").len(), 1);
}

#[test]
fn test_search_from_scope() {
    let doc = Document::from_string("<r><s><a>1</a></s><a>2</a></r>");
    let s = doc.search("s")[0];
    assert_eq!(doc.search_from(s, "a").len(), 1);
}

// ========== set_inner ==========

#[test]
fn test_set_inner_replaces_children() {
    let mut doc = Document::from_string("<r><a>1<i/></a></r>");
    let a = doc.search("a")[0];
    let old = doc.tree().children(a).to_vec();

    assert!(doc.set_inner(a, "<b>2</b>tail", false));
    assert_eq!(doc.to_string(), "<r><a><b>2</b>tail</a></r>");
    let b = doc.search("b")[0];
    assert_eq!(doc.tree().parent(b), Some(a));
    for id in old {
        assert_eq!(doc.tree().parent(id), None);
    }
}

#[test]
fn test_set_inner_with_nothing_parsed_keeps_children() {
    let mut doc = Document::from_string("<r><a>1</a></r>");
    let a = doc.search("a")[0];
    assert!(!doc.set_inner(a, "", false));
    assert!(!doc.set_inner(a, "<!-- open", false));
    assert_eq!(doc.inner(a), "1");
}

#[test]
fn test_set_inner_on_document() {
    let mut doc = Document::from_string("<r/>");
    let root = doc.document();
    assert!(doc.set_inner(root, "<x>1</x><y/>", true));
    assert_eq!(doc.to_string(), "<x>1</x><y/>");
}

#[test]
fn test_set_inner_mode() {
    let mut doc = Document::from_string("<r></r>");
    let r = doc.search("r")[0];

    assert!(doc.set_inner(r, "<script>1<2</script>", false));
    let script = doc.search_from(r, "script")[0];
    assert_eq!(doc.tree().as_element(script).unwrap().raw_content(), Some("1<2"));

    assert!(doc.set_inner(r, "<script><b>1</b></script>", true));
    let script = doc.search_from(r, "script")[0];
    assert!(!doc.tree().as_element(script).unwrap().is_special());
    assert_eq!(doc.search_from(script, "b").len(), 1);
}

#[test]
fn test_set_inner_rejects_leaf_nodes() {
    let mut doc = Document::from_string("<r>text<style>s</style></r>");
    let r = doc.search("r")[0];
    let text = doc.tree().child(r, 0).unwrap();
    assert!(matches!(doc.tree().node_type(text), Some(NodeType::Text(_))));
    let style = doc.search("style")[0];

    assert!(!doc.set_inner(text, "<a/>", false));
    assert!(!doc.set_inner(style, "<a/>", false));
    assert!(!doc.set_inner(NodeId(9999), "<a/>", false));
    assert_eq!(doc.to_string(), "<r>text<style>s</style></r>");
}

#[test]
fn test_set_inner_opens_self_closed_element() {
    let mut doc = Document::from_string("<r><br/><p/></r>");
    let br = doc.search("br")[0];
    let p = doc.search("p")[0];

    assert!(doc.set_inner(br, "1", false));
    assert!(doc.set_inner(p, "<b>2</b>", true));
    assert!(!doc.tree().as_element(p).unwrap().is_closed());
    assert_eq!(doc.to_string(), "<r><br>1</br><p><b>2</b></p></r>");

    // Nothing parsed: the element keeps its self-closed form.
    let mut doc = Document::from_string("<r><p/></r>");
    let p = doc.search("p")[0];
    assert!(!doc.set_inner(p, "", false));
    assert_eq!(doc.to_string(), "<r><p/></r>");
}

#[test]
fn test_set_inner_appends_issues() {
    let mut doc = Document::from_string("<r><a></a></r>");
    assert!(doc.issues().is_empty());
    let a = doc.search("a")[0];

    assert!(doc.set_inner(a, "<b></c></b>", true));
    assert_eq!(doc.issues().len(), 1);
    let issue = &doc.issues()[0];
    assert_eq!(issue.construct, Construct::EndTag);
    assert!(!issue.fatal);
    assert_eq!(issue.offset, 3);

    assert!(!doc.set_inner(a, "<!-- open", true));
    assert_eq!(doc.issues().len(), 2);
    assert!(doc.issues()[1].fatal);
    assert_eq!(doc.inner(a), "<b></b>");
}

// ========== deep nesting ==========

#[test]
fn test_deeply_nested_document_prints() {
    let depth = 100_000;
    let doc = Document::from_string(&"<a>".repeat(depth));
    assert_eq!(doc.search("a").len(), depth);
    assert_eq!(
        doc.to_string(),
        format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth))
    );
}

#[test]
fn test_set_inner_with_deeply_nested_markup() {
    let depth = 100_000;
    let mut doc = Document::from_string("<r></r>");
    let r = doc.search("r")[0];
    let source = format!("{}x{}", "<a>".repeat(depth), "</a>".repeat(depth));

    assert!(doc.set_inner(r, &source, true));
    assert_eq!(doc.inner(r), source);
    let innermost = doc.search("a:empty");
    assert!(innermost.is_empty());
    assert_eq!(doc.tree().depth(doc.tree().children(r)[0]), 2);
}

// ========== loading ==========

#[test]
fn test_from_file_utf8_with_bom() {
    let path = temp_file("bom.html", b"\xEF\xBB\xBF<r><a>1</a></r>");
    let doc = Document::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(doc.to_string(), "<r><a>1</a></r>");
}

#[test]
fn test_from_file_with_encoding() {
    let path = temp_file("latin.html", b"<r>caf\xE9</r>");
    let doc = Document::from_file_with_encoding(&path, "windows-1252").unwrap();
    std::fs::remove_file(&path).unwrap();
    let r = doc.search("r")[0];
    assert_eq!(doc.inner(r), "caf\u{e9}");
}

#[test]
fn test_from_file_unknown_encoding() {
    let result = Document::from_file_with_encoding("unused.html", "klingon");
    assert!(matches!(result, Err(LoadError::UnsupportedEncoding(label)) if label == "klingon"));
}

#[test]
fn test_from_file_missing() {
    let path = std::env::temp_dir().join("brindle-no-such-file.html");
    let err = Document::from_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("brindle-no-such-file.html"));
}
