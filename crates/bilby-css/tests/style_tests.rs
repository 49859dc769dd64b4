//! Integration tests for styled nodes and value lookup.

use bilby_css::{Display, StyledNode, Unit, Value, parse_stylesheet, style_tree};
use bilby_dom::NodeId;

fn styled_with(properties: &[(&str, Value)]) -> StyledNode {
    let mut map = bilby_css::PropertyMap::new();
    for (name, value) in properties {
        let _ = map.insert((*name).to_string(), value.clone());
    }
    StyledNode {
        node: NodeId(1),
        specified_values: map,
        children: Vec::new(),
    }
}

#[test]
fn test_value_returns_declared_property() {
    let node = styled_with(&[("width", Value::Length(80.0, Unit::Px))]);
    assert_eq!(node.value("width"), Some(&Value::Length(80.0, Unit::Px)));
    assert_eq!(node.value("height"), None);
}

#[test]
fn test_lookup_prefers_specific_over_shorthand() {
    let zero = Value::Length(0.0, Unit::Px);
    let node = styled_with(&[
        ("margin-left", Value::Length(5.0, Unit::Px)),
        ("margin", Value::Length(9.0, Unit::Px)),
    ]);
    assert_eq!(
        node.lookup("margin-left", "margin", &zero),
        Value::Length(5.0, Unit::Px)
    );
    // No margin-right declared: the shorthand applies.
    assert_eq!(
        node.lookup("margin-right", "margin", &zero),
        Value::Length(9.0, Unit::Px)
    );
}

#[test]
fn test_lookup_falls_back_to_default() {
    let zero = Value::Length(0.0, Unit::Px);
    let node = styled_with(&[]);
    assert_eq!(node.lookup("padding-top", "padding", &zero), zero);
}

#[test]
fn test_display_defaults_to_inline() {
    assert_eq!(styled_with(&[]).display(), Display::Inline);
}

#[test]
fn test_display_block_and_none_keywords() {
    let block = styled_with(&[("display", Value::Keyword("block".to_string()))]);
    assert_eq!(block.display(), Display::Block);

    let none = styled_with(&[("display", Value::Keyword("none".to_string()))]);
    assert_eq!(none.display(), Display::None);
}

#[test]
fn test_display_unknown_keyword_is_inline() {
    let node = styled_with(&[("display", Value::Keyword("flex".to_string()))]);
    assert_eq!(node.display(), Display::Inline);
}

#[test]
fn test_display_non_keyword_value_is_inline() {
    let node = styled_with(&[("display", Value::Length(3.0, Unit::Px))]);
    assert_eq!(node.display(), Display::Inline);
}

#[test]
fn test_style_tree_parallels_dom() {
    let dom = bilby_html::parse("<div><span>text</span><p></p></div>");
    let stylesheet = parse_stylesheet("div { display: block; } p { display: block; }").unwrap();
    let root = style_tree(&dom, dom.document_element().unwrap(), &stylesheet);

    // div has two element children and no text of its own
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.display(), Display::Block);

    let span = &root.children[0];
    assert_eq!(span.display(), Display::Inline);
    // The text leaf under span carries an empty property map.
    assert_eq!(span.children.len(), 1);
    assert!(span.children[0].specified_values.is_empty());

    let p = &root.children[1];
    assert_eq!(p.display(), Display::Block);
}

#[test]
fn test_property_map_serializes_to_json() {
    // The CLI dumps property maps with serde_json; keep the shape stable.
    let node = styled_with(&[
        ("width", Value::Length(80.0, Unit::Px)),
        ("display", Value::Keyword("block".to_string())),
    ]);
    let json = serde_json::to_value(&node.specified_values).unwrap();
    assert!(json.get("width").is_some());
    assert_eq!(
        json.get("display"),
        Some(&serde_json::json!({ "Keyword": "block" }))
    );
}

#[test]
fn test_style_tree_is_deterministic() {
    let dom = bilby_html::parse("<div class=\"a\"><p>x</p></div>");
    let stylesheet = parse_stylesheet(".a { margin: 4px; } p { width: 10px; }").unwrap();
    let root_id = dom.document_element().unwrap();

    let first = style_tree(&dom, root_id, &stylesheet);
    let second = style_tree(&dom, root_id, &stylesheet);

    assert_eq!(first.specified_values, second.specified_values);
    assert_eq!(first.children.len(), second.children.len());
    assert_eq!(
        first.children[0].specified_values,
        second.children[0].specified_values
    );
}
