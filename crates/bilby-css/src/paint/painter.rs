//! Painter - generates a display list from a laid-out box tree.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! Per box, back to front: the background, then the border, then the
//! children in tree order. A box with no color for a layer simply skips
//! that layer - unstyled structure paints nothing, which is what leaves the
//! canvas background visible.

use crate::layout::{BoxType, LayoutBox, Rect};
use crate::style::{ColorValue, Value};

use super::{DisplayCommand, DisplayList};

/// Walk the layout tree and build the display list for it.
#[must_use]
pub fn build_display_list(layout_root: &LayoutBox<'_>) -> DisplayList {
    let mut list = DisplayList::new();
    render_layout_box(&mut list, layout_root);
    list
}

/// Paint one box and its descendants.
fn render_layout_box(list: &mut DisplayList, layout_box: &LayoutBox<'_>) {
    render_background(list, layout_box);
    render_borders(list, layout_box);
    for child in &layout_box.children {
        render_layout_box(list, child);
    }
}

/// [Appendix E.2 step 2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
///
/// "the background color of the element" - one fill covering the whole
/// border box, skipped when the element declares no `background-color`.
fn render_background(list: &mut DisplayList, layout_box: &LayoutBox<'_>) {
    if let Some(color) = get_color(layout_box, "background-color") {
        list.push(DisplayCommand::FillRect {
            rect: layout_box.dimensions.border_box(),
            color,
        });
    }
}

/// [Appendix E.2 step 4](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
///
/// "the border of the element" - four strips inside the border box, one per
/// side, each as thick as that side's border width. Skipped entirely when
/// the element declares no `border-color`.
fn render_borders(list: &mut DisplayList, layout_box: &LayoutBox<'_>) {
    let Some(color) = get_color(layout_box, "border-color") else {
        return;
    };

    let d = &layout_box.dimensions;
    let border_box = d.border_box();

    // Left border
    list.push(DisplayCommand::FillRect {
        rect: Rect {
            x: border_box.x,
            y: border_box.y,
            width: d.border.left,
            height: border_box.height,
        },
        color,
    });

    // Right border
    list.push(DisplayCommand::FillRect {
        rect: Rect {
            x: border_box.x + border_box.width - d.border.right,
            y: border_box.y,
            width: d.border.right,
            height: border_box.height,
        },
        color,
    });

    // Top border
    list.push(DisplayCommand::FillRect {
        rect: Rect {
            x: border_box.x,
            y: border_box.y,
            width: border_box.width,
            height: d.border.top,
        },
        color,
    });

    // Bottom border
    list.push(DisplayCommand::FillRect {
        rect: Rect {
            x: border_box.x,
            y: border_box.y + border_box.height - d.border.bottom,
            width: border_box.width,
            height: d.border.bottom,
        },
        color,
    });
}

/// Look up a color-valued property on the box's generating element.
///
/// Anonymous boxes have no element and paint nothing; a property that is
/// absent or holds a non-color value yields `None`.
fn get_color(layout_box: &LayoutBox<'_>, name: &str) -> Option<ColorValue> {
    match layout_box.box_type {
        BoxType::Block(style) | BoxType::Inline(style) => match style.value(name) {
            Some(Value::Color(color)) => Some(*color),
            _ => None,
        },
        BoxType::Anonymous => None,
    }
}
