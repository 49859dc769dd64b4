//! Specified values and the styled-node tree.
//!
//! The cascade produces one [`PropertyMap`] per element; a [`StyledNode`]
//! pairs that map with its DOM node and carries the tree structure layout
//! walks. Style nodes are built once and never mutated afterwards.

mod values;

pub use values::{ColorValue, Unit, Value};

use std::collections::HashMap;

use bilby_dom::NodeId;
use strum_macros::{Display as StrumDisplay, EnumString};

/// Map from property name to specified value, one per element.
///
/// Built once by the cascade, then read-only: layout and painting only look
/// values up.
pub type PropertyMap = HashMap<String, Value>;

/// [CSS Display Level 3 § 2](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// The display types the dialect supports. Everything that is not declared
/// `block` or `none` renders inline, which is also the initial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Display {
    /// The element generates a block-level box.
    Block,
    /// The element generates an inline-level box (the initial value).
    #[default]
    Inline,
    /// The element and its subtree generate no boxes at all.
    None,
}

/// A node in the style tree: one DOM node plus its specified values.
///
/// The tree parallels the DOM (children in document order) and holds a
/// non-owning [`NodeId`] back-reference; text nodes carry an empty map.
#[derive(Debug, Clone)]
pub struct StyledNode {
    /// The DOM node these values belong to.
    pub node: NodeId,
    /// [CSS Cascading Level 4 § 4.2](https://www.w3.org/TR/css-cascade-4/#specified)
    ///
    /// "The specified value is the value of a given property that the set of
    /// inputs to the cascade... produces."
    pub specified_values: PropertyMap,
    /// Child style nodes, in document order.
    pub children: Vec<StyledNode>,
}

impl StyledNode {
    /// Return the specified value of a property if it exists.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.specified_values.get(name)
    }

    /// Return the specified value of property `name`, falling back to
    /// property `fallback_name`, falling back to `default`.
    ///
    /// This is how the side-specific box properties pick up their shorthand
    /// (`margin-left` falls back to `margin`, and so on).
    #[must_use]
    pub fn lookup(&self, name: &str, fallback_name: &str, default: &Value) -> Value {
        self.value(name)
            .or_else(|| self.value(fallback_name))
            .unwrap_or(default)
            .clone()
    }

    /// The value of the `display` property, defaulting to inline.
    ///
    /// Only the `block` and `none` keywords change the outcome; any other
    /// value (or no declaration at all) yields [`Display::Inline`].
    #[must_use]
    pub fn display(&self) -> Display {
        match self.value("display") {
            Some(Value::Keyword(keyword)) => keyword.parse().unwrap_or(Display::Inline),
            _ => Display::Inline,
        }
    }
}
