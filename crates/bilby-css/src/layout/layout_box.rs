//! The layout tree and the block layout algorithm.
//!
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//!
//! "In a block formatting context, boxes are laid out one after the other,
//! vertically, beginning at the top of a containing block."
//!
//! Layout runs in two steps: [`LayoutBox::build`] turns the style tree into
//! a box tree (classifying block/inline and inserting anonymous wrappers),
//! then [`LayoutBox::layout`] walks that tree once, writing used pixel
//! values into each box's [`Dimensions`] in place. Widths flow parent to
//! child; heights flow child to parent; both directions happen in the same
//! recursive pass.

use crate::error::LayoutError;
use crate::style::{Display, StyledNode, Unit, Value};

use super::box_model::{Dimensions, Rect};

/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// "A box's type affects, in part, its behavior in the visual formatting
/// model."
///
/// Block and inline boxes keep a non-owning reference to the style node
/// they were generated from; anonymous blocks are synthesized by the tree
/// builder and have none.
#[derive(Debug, Clone)]
pub enum BoxType<'a> {
    /// A block-level box generated by an element with `display: block`.
    Block(&'a StyledNode),

    /// An inline-level box generated by an element with `display: inline`
    /// (or by a text node).
    Inline(&'a StyledNode),

    /// [§ 9.2.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// "In a document like this: `<div>` Some text `<p>` More text...
    /// the 'Some text' part generates an anonymous block box."
    ///
    /// Synthesized to wrap inline content that has block-level siblings.
    Anonymous,
}

/// A node in the layout tree.
///
/// Built once from the style tree, then mutated in place by the layout
/// pass: box identities never change after construction, only the
/// `dimensions` fields are written.
#[derive(Debug, Clone)]
pub struct LayoutBox<'a> {
    /// The computed dimensions of this box (used values after layout).
    pub dimensions: Dimensions,
    /// What kind of box this is, with its style node where one exists.
    pub box_type: BoxType<'a>,
    /// Child boxes, in document order.
    pub children: Vec<LayoutBox<'a>>,
}

/// Transform a style tree into a laid-out box tree.
///
/// The containing block is typically the viewport: a rectangle at the
/// origin with zero edges. Its content height is reset to zero first - the
/// block-flow algorithm uses the containing block's running content height
/// as the stacking cursor, so it must start empty.
///
/// # Errors
///
/// Returns [`LayoutError::RootDisplayNone`] when the root style node
/// resolves to `display: none`; there is nothing to root the tree on.
pub fn layout_tree<'a>(
    style_root: &'a StyledNode,
    mut containing_block: Dimensions,
) -> Result<LayoutBox<'a>, LayoutError> {
    containing_block.content.height = 0.0;

    let mut root = LayoutBox::build(style_root)?;
    root.layout(containing_block)?;
    Ok(root)
}

impl<'a> LayoutBox<'a> {
    /// Create a box of the given type with zeroed dimensions.
    #[must_use]
    pub fn new(box_type: BoxType<'a>) -> Self {
        Self {
            dimensions: Dimensions::default(),
            box_type,
            children: Vec::new(),
        }
    }

    /// The style node this box was generated from.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::AnonymousStyleLookup`] for anonymous blocks,
    /// which have no generating element.
    pub fn style_node(&self) -> Result<&'a StyledNode, LayoutError> {
        match self.box_type {
            BoxType::Block(node) | BoxType::Inline(node) => Ok(node),
            BoxType::Anonymous => Err(LayoutError::AnonymousStyleLookup),
        }
    }

    /// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
    ///
    /// Build the layout tree for a style node, without computing any
    /// geometry yet.
    ///
    /// Children with `display: block` become direct children; children with
    /// `display: inline` are funneled into an inline container (see
    /// [`LayoutBox::get_inline_container`]); `display: none` subtrees are
    /// skipped entirely.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RootDisplayNone`] when `style_node` itself has
    /// `display: none`.
    pub fn build(style_node: &'a StyledNode) -> Result<LayoutBox<'a>, LayoutError> {
        let mut root = match style_node.display() {
            Display::Block => LayoutBox::new(BoxType::Block(style_node)),
            Display::Inline => LayoutBox::new(BoxType::Inline(style_node)),
            Display::None => return Err(LayoutError::RootDisplayNone),
        };

        for child in &style_node.children {
            match child.display() {
                Display::Block => root.children.push(Self::build(child)?),
                Display::Inline => {
                    let child_box = Self::build(child)?;
                    root.get_inline_container().children.push(child_box);
                }
                // The subtree generates no boxes at all.
                Display::None => {}
            }
        }
        Ok(root)
    }

    /// [§ 9.2.1.1](https://www.w3.org/TR/CSS2/visuren.html#anonymous)
    ///
    /// Where a new inline child should go.
    ///
    /// Inline and anonymous boxes take inline children directly. A block box
    /// wraps them in an anonymous block; consecutive inline siblings reuse
    /// the same wrapper, so a run of inline content allocates exactly one
    /// anonymous box.
    pub fn get_inline_container(&mut self) -> &mut LayoutBox<'a> {
        match self.box_type {
            BoxType::Inline(_) | BoxType::Anonymous => self,
            BoxType::Block(_) => {
                // Keep using a just-generated anonymous block; start a new
                // one only when the previous child was block-level.
                let reuse_last = matches!(
                    self.children.last(),
                    Some(LayoutBox {
                        box_type: BoxType::Anonymous,
                        ..
                    })
                );
                if !reuse_last {
                    self.children.push(LayoutBox::new(BoxType::Anonymous));
                }
                let last = self.children.len() - 1;
                &mut self.children[last]
            }
        }
    }

    /// Lay out this box and its descendants against a containing block.
    ///
    /// # Errors
    ///
    /// Propagates [`LayoutError`] from structurally invalid trees.
    pub fn layout(&mut self, containing_block: Dimensions) -> Result<(), LayoutError> {
        match self.box_type {
            BoxType::Block(_) => self.layout_block(containing_block),
            BoxType::Anonymous => self.layout_anonymous(containing_block),
            // Inline formatting (text flow, line boxes) is out of scope;
            // inline boxes occupy no space.
            BoxType::Inline(_) => Ok(()),
        }
    }

    /// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// Lay out a block-level box. Four ordered phases, each depending on the
    /// previous:
    ///
    /// 1. width (needs the containing block's width)
    /// 2. position (needs the containing block's current flow height)
    /// 3. children (need this box's content position)
    /// 4. height (needs the children, unless explicitly declared)
    fn layout_block(&mut self, containing_block: Dimensions) -> Result<(), LayoutError> {
        // Child width can depend on parent width, so we need to calculate
        // this box's width before laying out its children.
        self.calculate_block_width(containing_block)?;

        // Determine where the box is located within its container.
        self.calculate_block_position(containing_block)?;

        // Recursively lay out the children of this box.
        self.layout_block_children()?;

        // Parent height can depend on child height, so the height
        // calculation must run after the children are laid out.
        self.calculate_block_height()?;

        Ok(())
    }

    /// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// "The following constraints must hold among the used values of the
    /// other properties:
    ///
    /// 'margin-left' + 'border-left-width' + 'padding-left' + 'width' +
    /// 'padding-right' + 'border-right-width' + 'margin-right'
    /// = width of containing block"
    ///
    /// Sets the horizontal margin/padding/border used values and the
    /// content width.
    fn calculate_block_width(&mut self, containing_block: Dimensions) -> Result<(), LayoutError> {
        let style = self.style_node()?;

        // STEP 1: Read the computed values.
        // `width` has initial value `auto`; margin, border, and padding
        // have initial value 0. The side-specific properties fall back to
        // their shorthand.
        let zero = Value::Length(0.0, Unit::Px);

        let mut width = style.value("width").cloned().unwrap_or(Value::Auto);
        let mut margin_left = style.lookup("margin-left", "margin", &zero);
        let mut margin_right = style.lookup("margin-right", "margin", &zero);
        let border_left = style.lookup("border-left-width", "border-width", &zero);
        let border_right = style.lookup("border-right-width", "border-width", &zero);
        let padding_left = style.lookup("padding-left", "padding", &zero);
        let padding_right = style.lookup("padding-right", "padding", &zero);

        // STEP 2: Sum everything up, counting auto values as zero.
        let total: f32 = [
            &margin_left,
            &margin_right,
            &border_left,
            &border_right,
            &padding_left,
            &padding_right,
            &width,
        ]
        .iter()
        .map(|value| value.to_px())
        .sum();

        // STEP 3: Handle the over-constrained case.
        //
        // "If 'width' is not 'auto' and... is larger than the width of the
        // containing block, then any 'auto' values for 'margin-left' or
        // 'margin-right' are, for the following rules, treated as zero."
        if !width.is_auto() && total > containing_block.content.width {
            if margin_left.is_auto() {
                margin_left = Value::Length(0.0, Unit::Px);
            }
            if margin_right.is_auto() {
                margin_right = Value::Length(0.0, Unit::Px);
            }
        }

        // STEP 4: Distribute the remaining space.
        //
        // Each arm must grow the total by exactly `underflow`, so the
        // constraint equation holds afterwards with every value absolute.
        let underflow = containing_block.content.width - total;

        match (
            width.is_auto(),
            margin_left.is_auto(),
            margin_right.is_auto(),
        ) {
            // Over-constrained: margin-right soaks up the difference
            // (assuming left-to-right text direction).
            (false, false, false) => {
                margin_right = Value::Length(margin_right.to_px() + underflow, Unit::Px);
            }

            // Exactly one margin is auto: its used value follows from the
            // equality.
            (false, false, true) => {
                margin_right = Value::Length(underflow, Unit::Px);
            }
            (false, true, false) => {
                margin_left = Value::Length(underflow, Unit::Px);
            }

            // Width is auto: any auto margins become zero, then the width
            // fills whatever is left. A negative leftover cannot make the
            // width negative; the deficit moves into margin-right instead.
            (true, _, _) => {
                if margin_left.is_auto() {
                    margin_left = Value::Length(0.0, Unit::Px);
                }
                if margin_right.is_auto() {
                    margin_right = Value::Length(0.0, Unit::Px);
                }

                if underflow >= 0.0 {
                    width = Value::Length(underflow, Unit::Px);
                } else {
                    width = Value::Length(0.0, Unit::Px);
                    margin_right = Value::Length(margin_right.to_px() + underflow, Unit::Px);
                }
            }

            // Both margins are auto: split the leftover evenly. This is how
            // `margin: auto` centers a block horizontally.
            (false, true, true) => {
                margin_left = Value::Length(underflow / 2.0, Unit::Px);
                margin_right = Value::Length(underflow / 2.0, Unit::Px);
            }
        }

        // STEP 5: Store the used values.
        let d = &mut self.dimensions;
        d.content.width = width.to_px();

        d.padding.left = padding_left.to_px();
        d.padding.right = padding_right.to_px();

        d.border.left = border_left.to_px();
        d.border.right = border_right.to_px();

        d.margin.left = margin_left.to_px();
        d.margin.right = margin_right.to_px();

        Ok(())
    }

    /// [§ 10.6.3 Block-level non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
    ///
    /// Finish the vertical edge sizes and position the box within its
    /// containing block, directly below any previously laid-out siblings.
    fn calculate_block_position(&mut self, containing_block: Dimensions) -> Result<(), LayoutError> {
        let style = self.style_node()?;
        let zero = Value::Length(0.0, Unit::Px);

        // "If 'margin-top' or 'margin-bottom' are 'auto', their used value
        // is 0" - to_px() already treats auto that way.
        let margin_top = style.lookup("margin-top", "margin", &zero).to_px();
        let margin_bottom = style.lookup("margin-bottom", "margin", &zero).to_px();
        let border_top = style.lookup("border-top-width", "border-width", &zero).to_px();
        let border_bottom = style
            .lookup("border-bottom-width", "border-width", &zero)
            .to_px();
        let padding_top = style.lookup("padding-top", "padding", &zero).to_px();
        let padding_bottom = style.lookup("padding-bottom", "padding", &zero).to_px();

        let d = &mut self.dimensions;
        d.margin.top = margin_top;
        d.margin.bottom = margin_bottom;
        d.border.top = border_top;
        d.border.bottom = border_bottom;
        d.padding.top = padding_top;
        d.padding.bottom = padding_bottom;

        d.content.x = containing_block.content.x + d.margin.left + d.border.left + d.padding.left;

        // Position the box below all the previous boxes in the container:
        // the containing block's content height is the running flow cursor.
        d.content.y = containing_block.content.y
            + containing_block.content.height
            + d.margin.top
            + d.border.top
            + d.padding.top;

        Ok(())
    }

    /// [§ 9.4.1](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// Lay out the children within this box's content area, stacking them
    /// vertically. Grows `content.height` by each child's margin-box height
    /// so the next sibling lands below it.
    fn layout_block_children(&mut self) -> Result<(), LayoutError> {
        let d = &mut self.dimensions;
        for child in &mut self.children {
            child.layout(*d)?;
            // Increment the height so each child is laid out below the
            // previous one.
            d.content.height += child.dimensions.margin_box().height;
        }
        Ok(())
    }

    /// [§ 10.6.3](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
    ///
    /// An explicitly declared `height` overrides the accumulated children
    /// height; otherwise auto height (the sum from
    /// [`LayoutBox::layout_block_children`]) stands.
    fn calculate_block_height(&mut self) -> Result<(), LayoutError> {
        if let Some(Value::Length(height, Unit::Px)) = self.style_node()?.value("height") {
            self.dimensions.content.height = *height;
        }
        Ok(())
    }

    /// Lay out an anonymous block box.
    ///
    /// Anonymous blocks have no style node, so there is nothing to resolve:
    /// they span the containing block's content width, sit at the current
    /// flow position with zero edges, and take their children's accumulated
    /// height. (Their children are inline boxes, which occupy no space in
    /// this engine, but the containing width must still be correct for any
    /// nested block to resolve against.)
    fn layout_anonymous(&mut self, containing_block: Dimensions) -> Result<(), LayoutError> {
        let d = &mut self.dimensions;
        d.content.width = containing_block.content.width;
        d.content.x = containing_block.content.x;
        d.content.y = containing_block.content.y + containing_block.content.height;

        self.layout_block_children()
    }

    /// The border boxes of this box and every descendant, in tree order.
    ///
    /// Handy for debugging dumps and for tests asserting geometry.
    #[must_use]
    pub fn descendant_border_boxes(&self) -> Vec<Rect> {
        let mut rects = vec![self.dimensions.border_box()];
        for child in &self.children {
            rects.extend(child.descendant_border_boxes());
        }
        rects
    }
}
