//! Display list - a flat sequence of drawing commands.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! The display list is the painter's output: everything a rasterizer needs
//! to render the page, with no remaining knowledge of boxes or styles.
//! Commands are stored back to front, so executing them in order with
//! last-write-wins semantics produces the correct stacking.

use crate::layout::Rect;
use crate::style::ColorValue;

/// A single drawing command.
///
/// The dialect paints nothing but solid rectangles: element backgrounds and
/// the four strips of each border.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Fill a rectangle with a solid color.
    FillRect {
        /// The rectangle to fill, in absolute px.
        rect: Rect,
        /// The fill color.
        color: ColorValue,
    },
}

/// A list of drawing commands in painting order (back to front).
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a command.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// The commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// The number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the list holds no commands.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
