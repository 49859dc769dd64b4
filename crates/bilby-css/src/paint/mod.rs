//! Painting: turning a laid-out box tree into a display list.
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)

mod display_list;
mod painter;

pub use display_list::{DisplayCommand, DisplayList};
pub use painter::build_display_list;
