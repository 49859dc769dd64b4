//! CSS tokenizer, parser, cascade, block layout, and painting for the bilby
//! renderer.
//!
//! # Scope
//!
//! This crate implements a deliberately restricted slice of CSS:
//!
//! - **Tokenizer** - idents, hashes, numbers, px dimensions, punctuation,
//!   and `/* ... */` comments
//! - **Parser** - style rules with comma-separated simple selectors and
//!   `property: value;` declarations (keywords, px lengths, hex colors)
//! - **Selectors** - type, id, class, and universal simple selectors with
//!   [Selectors Level 4 § 17](https://www.w3.org/TR/selectors-4/#specificity-rules)
//!   specificity
//! - **Cascade** - selector matching and specificity-ordered declaration
//!   merging into per-element property maps
//!   ([CSS Cascading Level 4 § 6](https://www.w3.org/TR/css-cascade-4/#cascading))
//! - **Block layout** - the CSS 2.1 visual formatting model subset for
//!   block-level boxes in normal flow
//!   ([§ 10.3.3](https://www.w3.org/TR/CSS2/visudet.html#blockwidth))
//! - **Painting** - display list of solid-color fills for backgrounds and
//!   borders ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!
//! # Not Implemented
//!
//! - Inline formatting (text flow, line boxes)
//! - Percentage and relative length units
//! - Floats and positioning schemes other than normal flow
//! - Inheritance of computed values
//! - Media queries and other at-rules (skipped with a warning)

/// CSS cascade and style tree construction.
pub mod cascade;
/// Error types shared by the parser and layout engine.
pub mod error;
/// Box model structures and the block layout algorithm.
pub mod layout;
/// Display list generation from a laid-out box tree.
pub mod paint;
/// CSS parser producing stylesheets from token streams.
pub mod parser;
/// Simple selectors and specificity.
pub mod selector;
/// Value types and the styled-node tree.
pub mod style;
/// CSS tokenizer for the restricted value grammar.
pub mod tokenizer;

// Re-exports for convenience
pub use cascade::{specified_values, style_tree};
pub use error::{CssParseError, LayoutError};
pub use layout::{BoxType, Dimensions, EdgeSizes, LayoutBox, Rect, layout_tree};
pub use paint::{DisplayCommand, DisplayList, build_display_list};
pub use parser::{CssParser, Declaration, Rule, Stylesheet, parse_stylesheet};
pub use selector::{SimpleSelector, Specificity};
pub use style::{ColorValue, Display, PropertyMap, StyledNode, Unit, Value};
pub use tokenizer::{CssToken, CssTokenizer};

use bilby_dom::{DomTree, NodeId};

/// Extract CSS text from all `<style>` elements in the DOM tree, in document
/// order.
///
/// [HTML Standard § 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
#[must_use]
pub fn extract_style_content(tree: &DomTree) -> String {
    let mut css = String::new();
    collect_style_content(tree, tree.root(), &mut css);
    css
}

/// Recursively collect CSS text from `<style>` elements.
fn collect_style_content(tree: &DomTree, id: NodeId, css: &mut String) {
    let is_style = tree
        .as_element(id)
        .is_some_and(|data| data.tag_name.eq_ignore_ascii_case("style"));

    if is_style {
        for &child_id in tree.children(id) {
            if let Some(text) = tree.as_text(child_id) {
                css.push_str(text);
                css.push('\n');
            }
        }
    }

    for &child_id in tree.children(id) {
        collect_style_content(tree, child_id, css);
    }
}
