//! The component tree and the layout negotiation protocol.
//!
//! Components live in a generational arena and refer to each other by
//! [`ComponentId`]. Parents own the ordering of their children; a child
//! knows its parent only by id, so detaching a component can never leave a
//! dangling reference behind.
//!
//! Layout runs in two passes:
//!
//! 1. **Resize** (bottom-up). A component's minimum box is computed from its
//!    children's minimum boxes, so children are always resized first. Only
//!    `Unsized` components are recomputed; everything else answers from its
//!    cached minimum.
//! 2. **Reformat** (top-down). A component is given a border box at least
//!    as large as its minimum and decides where each child goes.
//!
//! Mutations never lay anything out on their own. They invalidate the
//! affected components and record the topmost one as pending, and
//! [`ComponentTree::flush_layout`] later runs both passes for every pending
//! root.

use std::any::Any;

use corbel_core::alloc::{HashSet, SparseSet};
use corbel_core::geometry::{BBox, Point};
use corbel_core::profiling::profile_function;
use corbel_render::{ContextError, GraphicsContext};
use indexmap::IndexSet;

use crate::capability::Capabilities;
use crate::component::{Component, ComponentId, Layout, LayoutState};
use crate::error::UiError;
use crate::event::{Delivery, Event, HandlerContext};
use crate::metrics::{LayoutMetrics, MetricsTimer};

struct Node {
    /// `None` while the component is handling an event.
    behaviour: Option<Box<dyn Component>>,
    name: String,
    caps: Capabilities,
    parent: Option<ComponentId>,
    /// Receives undelivered events in preference to the parent.
    owner: Option<ComponentId>,
    children: Vec<ComponentId>,
    /// Lower bound folded into the next resize.
    min_size: Point,
    min_box: BBox,
    layout: Layout,
    state: LayoutState,
    /// Border box given explicitly to a root component.
    pinned: Option<BBox>,
}

/// Owns every component and runs layout and event routing over them.
pub struct ComponentTree {
    nodes: SparseSet<Node>,
    /// Components invalidated since the last flush.
    pending: IndexSet<ComponentId>,
    metrics: LayoutMetrics,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self {
            nodes: SparseSet::new(),
            pending: IndexSet::new(),
            metrics: LayoutMetrics::new(),
        }
    }

    /// Add a standalone component. It starts `Unsized` and pending.
    pub fn insert<C: Component>(&mut self, component: C) -> ComponentId {
        let name = component.name().to_string();
        let caps = Capabilities::of::<C>();
        let id = ComponentId(self.nodes.push(Node {
            behaviour: Some(Box::new(component)),
            name,
            caps,
            parent: None,
            owner: None,
            children: Vec::new(),
            min_size: Point::ZERO,
            min_box: BBox::default(),
            layout: Layout::default(),
            state: LayoutState::Unsized,
            pinned: None,
        }));
        self.pending.insert(id);
        tracing::trace!("inserted {:?}", id);
        id
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn name(&self, id: ComponentId) -> Option<&str> {
        self.nodes.try_get(id.0).map(|node| node.name.as_str())
    }

    /// The component behind `id` as its concrete type.
    pub fn get<C: Component>(&self, id: ComponentId) -> Option<&C> {
        let behaviour: &dyn Any = self.nodes.try_get(id.0)?.behaviour.as_deref()?;
        behaviour.downcast_ref::<C>()
    }

    /// Mutable access without invalidation. Use [`update`](Self::update) for
    /// changes that affect the minimum box.
    pub fn get_mut<C: Component>(&mut self, id: ComponentId) -> Option<&mut C> {
        let behaviour: &mut dyn Any =
            self.nodes.try_get_mut(id.0)?.behaviour.as_deref_mut()?;
        behaviour.downcast_mut::<C>()
    }

    /// Change a component and invalidate its layout.
    pub fn update<C: Component, R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut C) -> R,
    ) -> Option<R> {
        let result = f(self.get_mut::<C>(id)?);
        self.invalidate(id);
        Some(result)
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes.try_get(id.0)?.parent
    }

    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.nodes
            .try_get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn owner(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes.try_get(id.0)?.owner
    }

    /// Nominate the component that receives events `id` leaves undelivered,
    /// ahead of its parent. `None` restores parent routing.
    pub fn set_owner(
        &mut self,
        id: ComponentId,
        owner: Option<ComponentId>,
    ) -> Result<(), UiError> {
        if let Some(owner) = owner {
            self.node(owner)?;
        }
        self.node_mut(id)?.owner = owner;
        Ok(())
    }

    /// The topmost ancestor of `id`, or `id` itself when detached.
    pub fn root_of(&self, id: ComponentId) -> ComponentId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// True if `ancestor` lies on the parent chain above `id`.
    pub fn is_ancestor(&self, ancestor: ComponentId, id: ComponentId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Whether the component declared handler capability `H`.
    pub fn declares<H: ?Sized + 'static>(&self, id: ComponentId) -> bool {
        self.nodes
            .try_get(id.0)
            .is_some_and(|node| node.caps.has::<H>())
    }

    /// Append `child` to `parent`'s children and invalidate `parent`.
    pub fn add(&mut self, parent: ComponentId, child: ComponentId) -> Result<(), UiError> {
        profile_function!();
        self.node(parent)?;
        if self.node(child)?.parent.is_some() {
            return Err(UiError::AlreadyAttached(child));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(UiError::Cycle(child));
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        self.pending.shift_remove(&child);
        self.invalidate(parent);

        tracing::debug!("added {:?} to {:?}", child, parent);
        Ok(())
    }

    /// Detach `child` from `parent`.
    ///
    /// Removing a component that is not a child of `parent` is a no-op and
    /// returns `false`. The detached component keeps its boxes; the parent
    /// is invalidated.
    pub fn remove(&mut self, parent: ComponentId, child: ComponentId) -> bool {
        let Some(node) = self.nodes.try_get_mut(parent.0) else {
            tracing::debug!("remove from missing parent {:?} ignored", parent);
            return false;
        };
        let Some(position) = node.children.iter().position(|c| *c == child) else {
            tracing::debug!("{:?} is not a child of {:?}; nothing removed", child, parent);
            return false;
        };
        node.children.remove(position);

        if let Some(child_node) = self.nodes.try_get_mut(child.0) {
            child_node.parent = None;
        }
        self.invalidate(parent);

        tracing::debug!("removed {:?} from {:?}", child, parent);
        true
    }

    /// Destroy a detached component and everything below it.
    ///
    /// The component must not be attached to a parent: detach it with
    /// [`remove`](Self::remove) first. Violations panic in debug builds and
    /// are refused with [`UiError::StillAttached`] otherwise.
    pub fn destroy(&mut self, id: ComponentId) -> Result<(), UiError> {
        let parent = self.node(id)?.parent;
        debug_assert!(
            parent.is_none(),
            "destroying {:?} while still attached to {:?}",
            id,
            parent
        );
        if let Some(parent) = parent {
            tracing::error!("refusing to destroy {:?}: still attached to {:?}", id, parent);
            return Err(UiError::StillAttached(id));
        }
        self.destroy_subtree(id);
        Ok(())
    }

    fn destroy_subtree(&mut self, id: ComponentId) {
        let Some(node) = self.nodes.try_get_mut(id.0) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        for child in children {
            if let Some(child_node) = self.nodes.try_get_mut(child.0) {
                child_node.parent = None;
            }
            self.destroy_subtree(child);
        }

        self.pending.shift_remove(&id);
        if let Some(node) = self.nodes.try_remove(id.0) {
            tracing::trace!("destroyed {} {:?}", node.name, id);
        }
    }

    /// Mark `id` and its ancestors `Unsized` and queue the topmost one for
    /// the next [`flush_layout`](Self::flush_layout).
    pub fn invalidate(&mut self, id: ComponentId) {
        let mut top = None;
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(node) = self.nodes.try_get_mut(cur.0) else {
                break;
            };
            node.state = LayoutState::Unsized;
            top = Some(cur);
            current = node.parent;
        }
        if let Some(top) = top {
            self.pending.insert(top);
        }
    }

    /// Require the component to be at least `size`. Takes effect at the next
    /// resize.
    pub fn set_min_size(&mut self, id: ComponentId, size: Point) -> Result<(), UiError> {
        self.node_mut(id)?.min_size = size;
        self.invalidate(id);
        Ok(())
    }

    pub fn min_size(&self, id: ComponentId) -> Option<Point> {
        self.nodes.try_get(id.0).map(|node| node.min_size)
    }

    pub fn layout_state(&self, id: ComponentId) -> Option<LayoutState> {
        self.nodes.try_get(id.0).map(|node| node.state)
    }

    /// Cached minimum box.
    ///
    /// Never recomputes. Querying before the component has been resized is
    /// a contract violation: it panics in debug builds and yields `None`
    /// otherwise.
    pub fn min_box(&self, id: ComponentId) -> Option<BBox> {
        let node = self.nodes.try_get(id.0)?;
        debug_assert!(
            node.state.is_sized(),
            "min_box of {} queried before resize",
            node.name
        );
        if !node.state.is_sized() {
            tracing::error!("min_box of {} queried before resize", node.name);
            return None;
        }
        Some(node.min_box)
    }

    /// Assigned border box. Same contract as [`min_box`](Self::min_box),
    /// but the component must have been placed.
    pub fn border_box(&self, id: ComponentId) -> Option<BBox> {
        self.placed_layout(id).map(|layout| layout.border)
    }

    /// Assigned content box; always inside the border box.
    pub fn content_box(&self, id: ComponentId) -> Option<BBox> {
        self.placed_layout(id).map(|layout| layout.content)
    }

    fn placed_layout(&self, id: ComponentId) -> Option<Layout> {
        let node = self.nodes.try_get(id.0)?;
        debug_assert!(
            node.state == LayoutState::Placed,
            "boxes of {} queried before placement",
            node.name
        );
        if node.state != LayoutState::Placed {
            tracing::error!("boxes of {} queried before placement", node.name);
            return None;
        }
        Some(node.layout)
    }

    /// Run the resize pass over `id` and its descendants.
    ///
    /// Returns the minimum box, or `None` when `id` does not exist or part
    /// of the subtree is busy handling an event. In the latter case the
    /// subtree stays `Unsized` and pending.
    pub fn resize(&mut self, id: ComponentId) -> Option<BBox> {
        profile_function!();
        self.resize_node(id)
    }

    fn resize_node(&mut self, id: ComponentId) -> Option<BBox> {
        let node = self.nodes.try_get_mut(id.0)?;
        match node.state {
            LayoutState::Sized | LayoutState::Placed => {
                self.metrics.resize_cache_hits += 1;
                return Some(node.min_box);
            }
            LayoutState::Sizing => {
                tracing::error!("re-entrant resize of {}", node.name);
                return None;
            }
            LayoutState::Unsized => {}
        }
        node.state = LayoutState::Sizing;
        let children = node.children.clone();

        let mut mins = Vec::with_capacity(children.len());
        let mut complete = true;
        for child in children {
            match self.resize_node(child) {
                Some(min) => mins.push(min),
                None => complete = false,
            }
        }

        let node = self.nodes.try_get_mut(id.0)?;
        let behaviour = match (complete, node.behaviour.as_ref()) {
            (true, Some(behaviour)) => behaviour,
            _ => {
                tracing::debug!("resize of {} deferred", node.name);
                node.state = LayoutState::Unsized;
                self.metrics.deferred += 1;
                self.pending.insert(id);
                return None;
            }
        };

        let mut min = behaviour.resize(&mins);
        if min.xsize() < node.min_size.x {
            min.xmax = min.xmin + node.min_size.x;
        }
        if min.ysize() < node.min_size.y {
            min.ymax = min.ymin + node.min_size.y;
        }

        node.min_box = min;
        node.state = LayoutState::Sized;
        self.metrics.resized += 1;
        tracing::trace!("resized {} to {:?}", node.name, min.size());
        Some(min)
    }

    /// Run the reformat pass: give `id` the border box `border` and place its
    /// descendants.
    ///
    /// `id` must have been resized. A `border` smaller than the minimum box
    /// is logged and used anyway; children then overflow it. Calling this
    /// on a root pins the box, so later flushes keep it.
    pub fn reformat(&mut self, id: ComponentId, border: BBox) -> Result<(), UiError> {
        profile_function!();
        let node = self.node_mut(id)?;
        if node.parent.is_none() {
            node.pinned = Some(border);
        }
        self.reformat_node(id, border)
    }

    fn reformat_node(&mut self, id: ComponentId, border: BBox) -> Result<(), UiError> {
        let node = self.node(id)?;
        debug_assert!(node.state.is_sized(), "reformat of {} before resize", node.name);
        if !node.state.is_sized() {
            tracing::error!("reformat of {} before resize", node.name);
            return Err(UiError::NotSized(id));
        }
        if border.xsize() < node.min_box.xsize() || border.ysize() < node.min_box.ysize() {
            tracing::warn!(
                "{} given {:?}, smaller than its minimum {:?}",
                node.name,
                border.size(),
                node.min_box.size()
            );
        }

        let Some(behaviour) = node.behaviour.as_ref() else {
            tracing::debug!("reformat of {} deferred", node.name);
            self.metrics.deferred += 1;
            self.pending.insert(id);
            return Ok(());
        };

        let children = node.children.clone();
        let mins: Vec<BBox> = children
            .iter()
            .map(|c| self.nodes.try_get(c.0).map_or(BBox::default(), |n| n.min_box))
            .collect();
        let placement = behaviour.reformat(border, &mins);
        debug_assert_eq!(
            placement.children.len(),
            children.len(),
            "{} placed the wrong number of children",
            node.name
        );

        let node = self.node_mut(id)?;
        node.layout = Layout {
            border,
            content: placement.content & border,
        };
        node.state = LayoutState::Placed;
        tracing::trace!("placed {} at {:?}", node.name, border);
        self.metrics.reformatted += 1;

        for (child, child_box) in children.into_iter().zip(placement.children) {
            self.reformat_node(child, child_box)?;
        }
        Ok(())
    }

    /// Run both layout passes for every pending root.
    ///
    /// A root is placed at its pinned box (grown to its minimum if needed),
    /// or at its minimum size at its current origin. Returns the roots that
    /// were laid out.
    pub fn flush_layout(&mut self) -> Vec<ComponentId> {
        profile_function!();
        let timer = MetricsTimer::start();

        let pending: Vec<ComponentId> = self.pending.drain(..).collect();
        let mut roots = IndexSet::new();
        for id in pending {
            if self.contains(id) {
                roots.insert(self.root_of(id));
            }
        }

        let mut laid_out = Vec::with_capacity(roots.len());
        for root in roots {
            let Some(min) = self.resize_node(root) else {
                continue;
            };
            let Some(node) = self.nodes.try_get(root.0) else {
                continue;
            };
            let border = match node.pinned {
                Some(pinned) => {
                    BBox::from_origin_size(pinned.origin(), pinned.size().max(min.size()))
                }
                None => BBox::from_origin_size(node.layout.border.origin(), min.size()),
            };
            match self.reformat_node(root, border) {
                Ok(()) => laid_out.push(root),
                Err(e) => tracing::warn!("layout of {:?} failed: {}", root, e),
            }
        }

        self.metrics.layout_time += timer.stop();
        laid_out
    }

    /// Whether any component is waiting for layout.
    pub fn needs_layout(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Paint `id` and the children whose border box meets `clip`.
    ///
    /// Components that have not been placed are skipped.
    pub fn redraw(
        &mut self,
        id: ComponentId,
        ctx: &mut dyn GraphicsContext,
        clip: BBox,
    ) -> Result<(), ContextError> {
        profile_function!();
        let Some(node) = self.nodes.try_get(id.0) else {
            return Ok(());
        };
        if node.state != LayoutState::Placed {
            tracing::trace!("skipping redraw of unplaced {}", node.name);
            return Ok(());
        }

        if let Some(behaviour) = node.behaviour.as_ref() {
            behaviour.redraw(ctx, &node.layout, clip)?;
            self.metrics.redrawn += 1;
        }

        let children = node.children.clone();
        for child in children {
            let Some(child_node) = self.nodes.try_get(child.0) else {
                continue;
            };
            let visible = child_node.layout.border & clip;
            if visible.is_empty() {
                self.metrics.clipped += 1;
                continue;
            }
            self.redraw(child, ctx, visible)?;
        }
        Ok(())
    }

    /// Deliver `event` to its target, then forward it along owners and
    /// parents until some component handles it.
    pub fn post(&mut self, event: &dyn Event) -> Delivery {
        profile_function!();
        let mut visited = HashSet::new();
        let mut dest = Some(event.target());

        while let Some(id) = dest {
            if !visited.insert(id) {
                tracing::warn!("routing loop at {:?} while posting {:?}", id, event);
                break;
            }
            if self.deliver(event, id).is_delivered() {
                tracing::debug!("{:?} handled by {:?}", event, id);
                return Delivery::Delivered;
            }
            dest = self.next_hop(id);
        }

        tracing::debug!("{:?} was not handled", event);
        Delivery::NotDelivered
    }

    /// Offer `event` to `dest` only.
    pub fn deliver(&mut self, event: &dyn Event, dest: ComponentId) -> Delivery {
        event.deliver(self, dest)
    }

    fn next_hop(&self, id: ComponentId) -> Option<ComponentId> {
        let node = self.nodes.try_get(id.0)?;
        node.owner
            .filter(|owner| self.contains(*owner))
            .or(node.parent)
    }

    /// Run `f` on component `id` viewed through handler capability `H`.
    ///
    /// Returns `None` without side effects if the component does not
    /// exist, did not declare `H`, or is already handling an event further
    /// up the stack. While `f` runs the component is checked out of the
    /// tree, so `f` may freely mutate the tree through the context; layout
    /// work that reaches the checked-out component is deferred.
    pub fn with_handler<H, R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut H, &mut HandlerContext<'_>) -> R,
    ) -> Option<R>
    where
        H: ?Sized + 'static,
    {
        let node = self.nodes.try_get_mut(id.0)?;
        if !node.caps.has::<H>() {
            return None;
        }
        let Some(mut behaviour) = node.behaviour.take() else {
            tracing::debug!("{} is busy handling another event", node.name);
            return None;
        };

        let result = match node.caps.query::<H>(behaviour.as_mut()) {
            Some(handler) => {
                let mut cx = HandlerContext::new(self, id);
                Some(f(handler, &mut cx))
            }
            None => None,
        };

        match self.nodes.try_get_mut(id.0) {
            Some(node) => node.behaviour = Some(behaviour),
            None => tracing::trace!("{:?} destroyed while handling an event", id),
        }
        result
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Counters accumulated since the last call.
    pub fn take_metrics(&mut self) -> LayoutMetrics {
        std::mem::take(&mut self.metrics)
    }

    /// Components without a parent.
    pub fn roots(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(slot, _)| ComponentId(slot))
    }

    fn node(&self, id: ComponentId) -> Result<&Node, UiError> {
        self.nodes.try_get(id.0).ok_or(UiError::StaleComponent(id))
    }

    fn node_mut(&mut self, id: ComponentId) -> Result<&mut Node, UiError> {
        self.nodes
            .try_get_mut(id.0)
            .ok_or(UiError::StaleComponent(id))
    }
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}
