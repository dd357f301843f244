//! The component interface every node in the tree implements.

use std::any::Any;

use corbel_core::alloc::IndexSlot;
use corbel_core::geometry::BBox;
use corbel_render::{ContextError, GraphicsContext};

use crate::capability::Capabilities;

/// Stable handle to a component in a [`ComponentTree`](crate::tree::ComponentTree).
///
/// Handles are generational: once a component is destroyed its handle stops
/// resolving, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub(crate) IndexSlot);

impl ComponentId {
    pub fn slot(&self) -> IndexSlot {
        self.0
    }
}

/// Where a component is in the layout negotiation.
///
/// `Unsized -> Sizing -> Sized -> Placed`. Invalidation sends any state back
/// to `Unsized`; no state is skipped on the way forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LayoutState {
    #[default]
    Unsized,
    /// The resize pass is computing this component's minimum box.
    Sizing,
    /// The minimum box is current.
    Sized,
    /// Border and content boxes are assigned.
    Placed,
}

impl LayoutState {
    /// True once the minimum box can be read.
    pub fn is_sized(self) -> bool {
        self >= Self::Sized
    }
}

/// Result of a component's reformat step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    /// Usable interior of the border box.
    pub content: BBox,
    /// Border box for each child, in child order.
    pub children: Vec<BBox>,
}

impl Placement {
    /// A leaf whose content fills its border box.
    pub fn leaf(border: BBox) -> Self {
        Self {
            content: border,
            children: Vec::new(),
        }
    }
}

/// Boxes assigned to a component by the last reformat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    pub border: BBox,
    pub content: BBox,
}

/// Behaviour of a node in the component tree.
///
/// The tree drives the layout protocol and calls these hooks with everything
/// they need, so a component never reaches into another's boxes:
///
/// - [`resize`](Self::resize) receives the children's current minimum boxes
///   and returns this component's natural minimum.
/// - [`reformat`](Self::reformat) receives the assigned border box and the
///   children's minimum boxes and decides where each child goes.
/// - [`redraw`](Self::redraw) paints the component's own content.
///
/// Both layout hooks must be deterministic: the same inputs give the same
/// output.
///
/// Event handler capabilities are opted into through
/// [`declare`](Self::declare); see [`crate::capability`].
pub trait Component: Any {
    /// Name used in logs.
    fn name(&self) -> &str {
        "component"
    }

    /// Natural minimum box given the children's minimum boxes. Only the size
    /// of the result matters.
    fn resize(&self, children: &[BBox]) -> BBox;

    /// Distribute `border` among the children. `border` is at least as large
    /// as the last minimum box.
    fn reformat(&self, border: BBox, children: &[BBox]) -> Placement {
        debug_assert!(
            children.is_empty(),
            "{} has children but no placement policy",
            self.name()
        );
        Placement::leaf(border)
    }

    /// Paint this component. Children are painted afterwards by the tree.
    fn redraw(
        &self,
        _ctx: &mut dyn GraphicsContext,
        _layout: &Layout,
        _clip: BBox,
    ) -> Result<(), ContextError> {
        Ok(())
    }

    /// Register the handler capabilities this component implements.
    fn declare(_caps: &mut Capabilities)
    where
        Self: Sized,
    {
    }
}
