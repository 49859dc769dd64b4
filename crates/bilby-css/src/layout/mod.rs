//! Block layout for the restricted visual formatting model.
//!
//! # Relevant Specifications
//!
//! - [CSS 2.1 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! # Module Structure
//!
//! - [`box_model`] - rectangles, edge sizes, and box dimensions
//! - [`layout_box`] - the layout tree and the block layout algorithm

pub mod box_model;
pub mod layout_box;

pub use box_model::{Dimensions, EdgeSizes, Rect};
pub use layout_box::{BoxType, LayoutBox, layout_tree};
