//! Integration tests for the restricted HTML parser.

use bilby_dom::{DomTree, NodeId};
use bilby_html::parse;

/// Helper: the single element child of the document node.
fn document_element(tree: &DomTree) -> NodeId {
    tree.document_element().expect("document element")
}

#[test]
fn test_parse_single_element() {
    let tree = parse("<html></html>");
    let root = document_element(&tree);
    assert_eq!(tree.as_element(root).unwrap().tag_name, "html");
    assert!(tree.children(root).is_empty());
}

#[test]
fn test_parse_nested_elements() {
    let tree = parse("<html><body><div></div></body></html>");
    let html = document_element(&tree);
    let body = tree.children(html)[0];
    let div = tree.children(body)[0];

    assert_eq!(tree.as_element(body).unwrap().tag_name, "body");
    assert_eq!(tree.as_element(div).unwrap().tag_name, "div");
    assert_eq!(tree.parent(div), Some(body));
}

#[test]
fn test_parse_text_node() {
    let tree = parse("<p>hello world</p>");
    let p = document_element(&tree);
    let children = tree.children(p);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.as_text(children[0]), Some("hello world"));
}

#[test]
fn test_parse_attributes() {
    let tree = parse(r#"<div id="main" class="note wide"></div>"#);
    let div = document_element(&tree);
    let data = tree.as_element(div).unwrap();

    assert_eq!(data.id(), Some("main"));
    let classes = data.classes();
    assert!(classes.contains("note"));
    assert!(classes.contains("wide"));
}

#[test]
fn test_parse_single_quoted_attribute() {
    let tree = parse("<div id='answer'></div>");
    let div = document_element(&tree);
    assert_eq!(tree.as_element(div).unwrap().id(), Some("answer"));
}

#[test]
fn test_multiple_top_level_nodes_wrapped_in_html() {
    let tree = parse("<div></div><p></p>");
    let root = document_element(&tree);
    let data = tree.as_element(root).unwrap();
    assert_eq!(data.tag_name, "html");
    assert!(data.attrs.is_empty());

    let children = tree.children(root);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.as_element(children[0]).unwrap().tag_name, "div");
    assert_eq!(tree.as_element(children[1]).unwrap().tag_name, "p");
}

#[test]
fn test_single_element_not_wrapped() {
    let tree = parse("<body><p>x</p></body>");
    let root = document_element(&tree);
    assert_eq!(tree.as_element(root).unwrap().tag_name, "body");
}

#[test]
fn test_whitespace_between_elements_discarded() {
    let tree = parse("<div>\n  <p>a</p>\n  <p>b</p>\n</div>");
    let div = document_element(&tree);
    let children = tree.children(div);
    assert_eq!(children.len(), 2, "indentation must not create text nodes");
    assert!(tree.as_element(children[0]).is_some());
    assert!(tree.as_element(children[1]).is_some());
}

#[test]
fn test_text_interleaved_with_elements() {
    let tree = parse("<div>before<span>mid</span>after</div>");
    let div = document_element(&tree);
    let children = tree.children(div);
    assert_eq!(children.len(), 3);
    assert_eq!(tree.as_text(children[0]), Some("before"));
    assert_eq!(tree.as_element(children[1]).unwrap().tag_name, "span");
    assert_eq!(tree.as_text(children[2]), Some("after"));
}

#[test]
fn test_mismatched_closing_tag_does_not_lose_tree() {
    // Non-validating: the element is kept as built, the bad close tag is
    // reported on stderr only.
    let tree = parse("<div><p>x</q></div>");
    let div = document_element(&tree);
    assert_eq!(tree.as_element(div).unwrap().tag_name, "div");
    let p = tree.children(div)[0];
    assert_eq!(tree.as_element(p).unwrap().tag_name, "p");
}

#[test]
fn test_deeply_nested_document() {
    let tree = parse("<html><body><div><div><div><p>deep</p></div></div></div></body></html>");
    let mut id = document_element(&tree);
    let mut depth = 0;
    while let Some(&child) = tree.children(id).first() {
        id = child;
        depth += 1;
    }
    // html > body > div > div > div > p > text
    assert_eq!(depth, 6);
    assert_eq!(tree.as_text(id), Some("deep"));
}
