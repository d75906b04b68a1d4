//! Tests for inserting and removing style nodes.

use pretty_assertions::assert_eq;
use turnstyle_content::{StyleApplicator, style_id};
use turnstyle_dom::DomTree;

#[test]
fn test_style_id_replaces_spaces() {
    assert_eq!(style_id("basic formatting"), "basic-formatting");
    assert_eq!(style_id("dark"), "dark");
}

#[test]
fn test_insert_appends_marked_node_to_head() {
    let mut dom = DomTree::html_document();
    let applicator = StyleApplicator::new("turnstyle");

    let node = applicator
        .insert(&mut dom, "p { color: red; }", Some("red"), Some("extra"))
        .unwrap();

    assert_eq!(dom.parent(node), dom.head());
    let element = dom.as_element(node).unwrap();
    assert_eq!(element.tag_name, "style");
    assert_eq!(element.id(), Some("red"));
    assert!(element.has_class("turnstyle"));
    assert!(element.has_class("extra"));
    assert_eq!(dom.text_content(node), "p { color: red; }");
}

#[test]
fn test_insert_with_empty_rules_is_a_no_op() {
    let mut dom = DomTree::html_document();
    let before = dom.len();
    assert!(StyleApplicator::new("turnstyle").insert(&mut dom, "", None, None).is_none());
    assert_eq!(dom.len(), before);
}

#[test]
fn test_insert_without_head_uses_document_element_then_root() {
    let applicator = StyleApplicator::new("turnstyle");

    let mut dom = DomTree::new();
    let html = dom.create_element("html");
    dom.append_child(dom.root(), html);
    let node = applicator.insert(&mut dom, "p {}", None, None).unwrap();
    assert_eq!(dom.parent(node), Some(html));

    let mut bare = DomTree::new();
    let node = applicator.insert(&mut bare, "p {}", None, None).unwrap();
    assert_eq!(bare.parent(node), Some(bare.root()));
}

#[test]
fn test_remove_by_id_and_by_class() {
    let mut dom = DomTree::html_document();
    let applicator = StyleApplicator::new("turnstyle");
    let _ = applicator.insert(&mut dom, "a {}", Some("a"), None);
    let _ = applicator.insert(&mut dom, "b {}", Some("b"), Some("ts-preview"));
    let _ = applicator.insert(&mut dom, "c {}", Some("c"), None);

    assert_eq!(applicator.remove(&mut dom, Some("a"), None), 1);
    assert_eq!(applicator.remove(&mut dom, Some("missing"), None), 0);
    assert_eq!(applicator.remove(&mut dom, None, Some("ts-preview")), 1);
    assert_eq!(applicator.applied_nodes(&dom).len(), 1);

    assert_eq!(applicator.remove(&mut dom, None, None), 1);
    assert!(applicator.applied_nodes(&dom).is_empty());
    assert_eq!(applicator.remove(&mut dom, None, None), 0);
}

#[test]
fn test_page_nodes_without_marker_are_left_alone() {
    let mut dom = DomTree::html_document();
    let own = dom.create_element("style");
    let head = dom.head().unwrap();
    dom.append_child(head, own);

    let applicator = StyleApplicator::new("turnstyle");
    let _ = applicator.insert(&mut dom, "p {}", None, None);
    assert_eq!(applicator.remove(&mut dom, None, None), 1);
    assert!(dom.is_connected(own));
}
