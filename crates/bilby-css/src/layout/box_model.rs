//! CSS box model types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! All sizes are in px.

use serde::Serialize;

/// A rectangle positioned in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Grow this rectangle outward by the given edge sizes.
    ///
    /// The origin moves up and left; the extent grows by the opposing edge
    /// pairs. This is the single primitive all the derived boxes compose.
    #[must_use]
    pub fn expanded_by(self, edge: EdgeSizes) -> Rect {
        Rect {
            x: self.x - edge.left,
            y: self.y - edge.top,
            width: self.width + edge.left + edge.right,
            height: self.height + edge.top + edge.bottom,
        }
    }
}

/// Edge sizes for one of the padding, border, or margin rings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EdgeSizes {
    /// Left edge size.
    pub left: f32,
    /// Right edge size.
    pub right: f32,
    /// Top edge size.
    pub top: f32,
    /// Bottom edge size.
    pub bottom: f32,
}

/// [§ 3. The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// "Each box has a content area and optional surrounding padding, border,
/// and margin areas."
///
/// ```text
/// ┌─────────────────────────────────────────┐
/// │              margin                     │
/// │   ┌─────────────────────────────────┐   │
/// │   │          border                 │   │
/// │   │   ┌─────────────────────────┐   │   │
/// │   │   │      padding            │   │   │
/// │   │   │   ┌─────────────────┐   │   │   │
/// │   │   │   │     CONTENT     │   │   │   │
/// │   │   │   └─────────────────┘   │   │   │
/// │   │   └─────────────────────────┘   │   │
/// │   └─────────────────────────────────┘   │
/// └─────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Dimensions {
    /// Position and size of the content area, in absolute px.
    pub content: Rect,
    /// Surrounding padding edge sizes.
    pub padding: EdgeSizes,
    /// Surrounding border edge sizes.
    pub border: EdgeSizes,
    /// Surrounding margin edge sizes.
    pub margin: EdgeSizes,
}

impl Dimensions {
    /// [§ 3.2 Padding](https://www.w3.org/TR/css-box-3/#paddings)
    ///
    /// "The padding box contains both the content and padding areas."
    #[must_use]
    pub fn padding_box(&self) -> Rect {
        self.content.expanded_by(self.padding)
    }

    /// [§ 3.3 Borders](https://www.w3.org/TR/css-box-3/#borders)
    ///
    /// "The border box contains content, padding, and border areas."
    #[must_use]
    pub fn border_box(&self) -> Rect {
        self.padding_box().expanded_by(self.border)
    }

    /// [§ 3.1 Margins](https://www.w3.org/TR/css-box-3/#margins)
    ///
    /// "The margin box is the outermost box, and contains all four areas."
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        self.border_box().expanded_by(self.margin)
    }
}
