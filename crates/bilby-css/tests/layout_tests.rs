//! Integration tests for the block layout engine.
//!
//! Every test lays a styled tree out against an 800x600 viewport (origin
//! 0,0, zero edges) unless stated otherwise, mirroring the renderer's
//! initial containing block.

use bilby_css::{
    BoxType, Dimensions, LayoutBox, LayoutError, Rect, StyledNode, layout_tree, parse_stylesheet,
    style_tree,
};

const EPS: f32 = 0.01;

fn viewport() -> Dimensions {
    Dimensions {
        content: Rect {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        },
        ..Dimensions::default()
    }
}

/// Parse HTML + CSS and build the styled tree rooted at the document
/// element.
fn styled(html: &str, css: &str) -> StyledNode {
    let dom = bilby_html::parse(html);
    let stylesheet = parse_stylesheet(css).unwrap();
    style_tree(&dom, dom.document_element().unwrap(), &stylesheet)
}

/// The seven horizontal used values must sum to the containing width.
fn assert_width_constraint(layout_box: &LayoutBox<'_>, containing_width: f32) {
    let d = &layout_box.dimensions;
    let sum = d.margin.left
        + d.border.left
        + d.padding.left
        + d.content.width
        + d.padding.right
        + d.border.right
        + d.margin.right;
    assert!(
        (sum - containing_width).abs() < EPS,
        "horizontal values sum to {sum}, expected {containing_width}"
    );
}

#[test]
fn test_auto_width_fills_containing_block() {
    let styled = styled("<div></div>", "div { display: block; }");
    let root = layout_tree(&styled, viewport()).unwrap();

    assert!((root.dimensions.content.width - 800.0).abs() < EPS);
    assert_width_constraint(&root, 800.0);
}

#[test]
fn test_auto_margins_center_fixed_width() {
    // A 100px wide block in an 800px container with both margins auto
    // centers at 350px each.
    let styled = styled(
        "<div></div>",
        "div { display: block; width: 100px; margin-left: auto; margin-right: auto; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let d = &root.dimensions;
    assert!((d.content.width - 100.0).abs() < EPS);
    assert!((d.margin.left - 350.0).abs() < EPS);
    assert!((d.margin.right - 350.0).abs() < EPS);
    assert!((d.content.x - 350.0).abs() < EPS);
    assert_width_constraint(&root, 800.0);
}

#[test]
fn test_single_auto_margin_absorbs_underflow() {
    let styled = styled(
        "<div></div>",
        "div { display: block; width: 200px; margin-left: auto; margin-right: 50px; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let d = &root.dimensions;
    assert!((d.margin.left - 550.0).abs() < EPS);
    assert!((d.margin.right - 50.0).abs() < EPS);
    assert_width_constraint(&root, 800.0);
}

#[test]
fn test_overconstrained_adjusts_margin_right() {
    // width + both margins fixed: margin-right must absorb the slack.
    let styled = styled(
        "<div></div>",
        "div { display: block; width: 600px; margin-left: 100px; margin-right: 100px; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let d = &root.dimensions;
    assert!((d.margin.left - 100.0).abs() < EPS);
    assert!((d.margin.right - 100.0).abs() < EPS, "800-600-100 = 100");
    assert_width_constraint(&root, 800.0);
}

#[test]
fn test_overflowing_fixed_width_gives_negative_margin_right() {
    let styled = styled(
        "<div></div>",
        "div { display: block; width: 900px; margin-left: 0px; margin-right: 0px; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let d = &root.dimensions;
    assert!((d.margin.right + 100.0).abs() < EPS, "margin-right = -100");
    assert_width_constraint(&root, 800.0);
}

#[test]
fn test_auto_margins_clamped_when_overflowing() {
    // Fixed width wider than the container: auto margins become 0 and the
    // deficit lands in margin-right.
    let styled = styled(
        "<div></div>",
        "div { display: block; width: 900px; margin-left: auto; margin-right: auto; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let d = &root.dimensions;
    assert!(d.margin.left.abs() < EPS);
    assert!((d.margin.right + 100.0).abs() < EPS);
    assert_width_constraint(&root, 800.0);
}

#[test]
fn test_auto_width_with_negative_underflow_stays_zero() {
    // Padding alone exceeds the container: width can't go negative, the
    // deficit moves into margin-right.
    let narrow = Dimensions {
        content: Rect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 100.0,
        },
        ..Dimensions::default()
    };
    let styled = styled(
        "<div></div>",
        "div { display: block; padding-left: 20px; padding-right: 20px; }",
    );
    let root = layout_tree(&styled, narrow).unwrap();

    let d = &root.dimensions;
    assert!(d.content.width.abs() < EPS, "width clamps at zero");
    assert!((d.margin.right + 30.0).abs() < EPS, "10 - 40 = -30");
    assert_width_constraint(&root, 10.0);
}

#[test]
fn test_padding_and_border_reduce_auto_width() {
    let styled = styled(
        "<div></div>",
        "div { display: block; padding: 10px; border-width: 5px; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let d = &root.dimensions;
    assert!((d.content.width - 770.0).abs() < EPS, "800 - 2*10 - 2*5");
    assert!((d.padding.left - 10.0).abs() < EPS);
    assert!((d.border.right - 5.0).abs() < EPS);
    assert_width_constraint(&root, 800.0);
}

#[test]
fn test_shorthand_fallback_for_side_properties() {
    let styled = styled(
        "<div></div>",
        "div { display: block; margin: 8px; margin-left: 2px; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let d = &root.dimensions;
    assert!((d.margin.left - 2.0).abs() < EPS, "specific side wins");
    assert!((d.margin.right - 8.0).abs() < EPS, "shorthand fills the rest");
    assert!((d.margin.top - 8.0).abs() < EPS);
    assert!((d.margin.bottom - 8.0).abs() < EPS);
}

#[test]
fn test_position_includes_margin_border_padding() {
    let styled = styled(
        "<div></div>",
        "div { display: block; margin: 10px; border-width: 2px; padding: 5px; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let d = &root.dimensions;
    assert!((d.content.x - 17.0).abs() < EPS, "10 + 2 + 5");
    assert!((d.content.y - 17.0).abs() < EPS);
}

#[test]
fn test_children_stack_vertically_without_overlap() {
    let styled = styled(
        "<div><p></p><p></p><p></p></div>",
        "div { display: block; } p { display: block; height: 30px; margin: 5px; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    assert_eq!(root.children.len(), 3);
    for pair in root.children.windows(2) {
        let above = pair[0].dimensions.margin_box();
        let below = pair[1].dimensions.margin_box();
        assert!(
            below.y >= above.y + above.height - EPS,
            "sibling boxes must not overlap"
        );
    }

    // Each p occupies 30 + 2*5 = 40px of flow.
    let ys: Vec<f32> = root
        .children
        .iter()
        .map(|c| c.dimensions.content.y)
        .collect();
    assert!((ys[0] - 5.0).abs() < EPS);
    assert!((ys[1] - 45.0).abs() < EPS);
    assert!((ys[2] - 85.0).abs() < EPS);
}

#[test]
fn test_auto_height_is_sum_of_children_margin_boxes() {
    let styled = styled(
        "<div><p></p><p></p></div>",
        "div { display: block; } p { display: block; height: 30px; margin: 5px; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    assert!((root.dimensions.content.height - 80.0).abs() < EPS, "2 * 40");
}

#[test]
fn test_declared_height_overrides_children() {
    let styled = styled(
        "<div><p></p></div>",
        "div { display: block; height: 55px; } p { display: block; height: 200px; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    assert!((root.dimensions.content.height - 55.0).abs() < EPS);
}

#[test]
fn test_child_resolves_against_parent_content_box() {
    let styled = styled(
        "<div><p></p></div>",
        "div { display: block; padding: 50px; } p { display: block; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let p = &root.children[0];
    assert!((p.dimensions.content.width - 700.0).abs() < EPS, "800 - 2*50");
    assert!((p.dimensions.content.x - 50.0).abs() < EPS);
    assert!((p.dimensions.content.y - 50.0).abs() < EPS);
}

#[test]
fn test_display_none_subtree_generates_no_box() {
    let styled = styled(
        "<div><p></p><span></span></div>",
        "div { display: block; } p { display: none; } span { display: block; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    assert_eq!(root.children.len(), 1, "the p subtree must vanish");
    assert!(matches!(root.children[0].box_type, BoxType::Block(_)));
}

#[test]
fn test_root_display_none_is_error() {
    let styled = styled("<div></div>", "div { display: none; }");
    assert_eq!(
        layout_tree(&styled, viewport()).unwrap_err(),
        LayoutError::RootDisplayNone
    );
}

#[test]
fn test_inline_children_share_one_anonymous_block() {
    // Two inline siblings then a block then an inline: the inline runs get
    // one anonymous wrapper each side of the block.
    let styled = styled(
        "<div><a></a><b></b><p></p><i></i></div>",
        "div { display: block; } p { display: block; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    assert_eq!(root.children.len(), 3);
    assert!(matches!(root.children[0].box_type, BoxType::Anonymous));
    assert!(matches!(root.children[1].box_type, BoxType::Block(_)));
    assert!(matches!(root.children[2].box_type, BoxType::Anonymous));

    // The first anonymous block wraps both inline boxes.
    assert_eq!(root.children[0].children.len(), 2);
    assert!(matches!(
        root.children[0].children[0].box_type,
        BoxType::Inline(_)
    ));
}

#[test]
fn test_anonymous_block_inherits_containing_width() {
    let styled = styled(
        "<div>text<p></p></div>",
        "div { display: block; width: 400px; } p { display: block; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let anonymous = &root.children[0];
    assert!(matches!(anonymous.box_type, BoxType::Anonymous));
    assert!(
        (anonymous.dimensions.content.width - 400.0).abs() < EPS,
        "anonymous blocks span their containing block"
    );
    // Zero edges: the anonymous box adds nothing to the box model.
    assert!(anonymous.dimensions.margin.left.abs() < EPS);
    assert!(anonymous.dimensions.padding.top.abs() < EPS);
}

#[test]
fn test_inline_root_is_allowed() {
    let styled = styled("<span></span>", "");
    let root = layout_tree(&styled, viewport()).unwrap();
    assert!(matches!(root.box_type, BoxType::Inline(_)));
}

#[test]
fn test_style_node_lookup_on_anonymous_box_fails() {
    let anonymous: LayoutBox<'_> = LayoutBox::new(BoxType::Anonymous);
    assert_eq!(
        anonymous.style_node().unwrap_err(),
        LayoutError::AnonymousStyleLookup
    );
}

#[test]
fn test_layout_is_deterministic() {
    let styled = styled(
        "<div><p></p><p></p></div>",
        "div { display: block; padding: 7px; } p { display: block; height: 12px; }",
    );
    let first = layout_tree(&styled, viewport()).unwrap();
    let second = layout_tree(&styled, viewport()).unwrap();

    assert_eq!(
        first.descendant_border_boxes(),
        second.descendant_border_boxes()
    );
}

#[test]
fn test_nested_flow_with_mixed_heights() {
    let styled = styled(
        "<div><section><p></p></section><footer></footer></div>",
        "div { display: block; } \
         section { display: block; padding: 10px; } \
         p { display: block; height: 20px; } \
         footer { display: block; height: 8px; }",
    );
    let root = layout_tree(&styled, viewport()).unwrap();

    let section = &root.children[0];
    let footer = &root.children[1];

    // section auto height = p margin box (20) inside 10px padding
    assert!((section.dimensions.content.height - 20.0).abs() < EPS);
    assert!((section.dimensions.margin_box().height - 40.0).abs() < EPS);

    // footer stacks below the section's margin box
    assert!((footer.dimensions.content.y - 40.0).abs() < EPS);

    // root auto height = 40 + 8
    assert!((root.dimensions.content.height - 48.0).abs() < EPS);
}
