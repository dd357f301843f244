//! Leaf widgets.
//!
//! Labels and buttons measure themselves with the process-wide default
//! font, so their minimum box follows whatever font service is registered.

use corbel_core::geometry::{BBox, Point};
use corbel_render::{Color, ContextError, GraphicsContext, TextFlags, default_font};

use crate::component::{Component, Layout, Placement};

/// One line of static text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    colour: Color,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            colour: Color::BLACK,
        }
    }

    pub fn colour(mut self, colour: Color) -> Self {
        self.colour = colour;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The owning tree must be invalidated for the new
    /// size to take effect; [`ComponentTree::update`](crate::tree::ComponentTree::update)
    /// does that.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Component for Label {
    fn name(&self) -> &str {
        "label"
    }

    fn resize(&self, children: &[BBox]) -> BBox {
        debug_assert!(children.is_empty(), "labels have no children");
        BBox::from_size(default_font().measure(&self.text))
    }

    fn redraw(
        &self,
        ctx: &mut dyn GraphicsContext,
        layout: &Layout,
        _clip: BBox,
    ) -> Result<(), ContextError> {
        let font = default_font();
        ctx.text(layout.content, &self.text, &font, self.colour, TextFlags::CENTRE_Y)
    }
}

/// Horizontal and vertical space between a button's text and its edge.
pub const BUTTON_PADDING: Point = Point::new(24, 12);
const BUTTON_BORDER: i32 = 4;

/// A push button.
///
/// The button itself does not handle clicks. Whichever component composes
/// it binds the button's icon and handles the resulting click events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    text: String,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Component for Button {
    fn name(&self) -> &str {
        "button"
    }

    fn resize(&self, children: &[BBox]) -> BBox {
        debug_assert!(children.is_empty(), "buttons have no children");
        let text = default_font().measure(&self.text);
        BBox::from_size(Point::new(
            text.x + 2 * BUTTON_PADDING.x,
            text.y + 2 * BUTTON_PADDING.y,
        ))
    }

    fn reformat(&self, border: BBox, _children: &[BBox]) -> Placement {
        let inset = BBox::new(BUTTON_BORDER, BUTTON_BORDER, -BUTTON_BORDER, -BUTTON_BORDER);
        Placement {
            content: (border + inset) & border,
            children: Vec::new(),
        }
    }

    fn redraw(
        &self,
        ctx: &mut dyn GraphicsContext,
        layout: &Layout,
        _clip: BBox,
    ) -> Result<(), ContextError> {
        ctx.fill(layout.border, Color::LIGHT_GREY)?;
        ctx.outline(layout.border, Color::BLACK)?;
        let font = default_font();
        ctx.text(layout.content, &self.text, &font, Color::BLACK, TextFlags::CENTRE)
    }
}

/// Empty space of a fixed minimum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacer {
    size: Point,
}

impl Spacer {
    pub fn new(size: Point) -> Self {
        Self { size }
    }
}

impl Component for Spacer {
    fn name(&self) -> &str {
        "spacer"
    }

    fn resize(&self, _children: &[BBox]) -> BBox {
        BBox::from_size(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_is_padded_text() {
        let text = default_font().measure("Save");
        let min = Button::new("Save").resize(&[]);
        assert_eq!(min.size(), text + BUTTON_PADDING + BUTTON_PADDING);
    }

    #[test]
    fn test_longer_label_is_wider() {
        let short = Label::new("OK").resize(&[]);
        let long = Label::new("Discard changes?").resize(&[]);
        assert!(long.xsize() > short.xsize());
        assert_eq!(long.ysize(), short.ysize());
    }

    #[test]
    fn test_button_content_is_inset() {
        let border = BBox::new(0, 0, 100, 40);
        let placement = Button::new("x").reformat(border, &[]);
        assert_eq!(placement.content, BBox::new(4, 4, 96, 36));
    }

    #[test]
    fn test_spacer_minimum() {
        let spacer = Spacer::new(Point::new(5, 7));
        assert_eq!(spacer.resize(&[]), BBox::new(0, 0, 5, 7));
    }
}
