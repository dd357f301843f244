//! Typed events and their handler capabilities.
//!
//! Every event kind is three things: the event data, a single-method
//! handler trait, and a `deliver` that checks the destination for that
//! handler. Adding a kind touches nothing else. Routing beyond the first
//! destination is the tree's job ([`ComponentTree::post`]).

use std::any::Any;
use std::fmt;

use corbel_core::geometry::{BBox, Point};
use corbel_wimp::{KeyCode, MouseButtons};

use crate::component::ComponentId;
use crate::tree::ComponentTree;

/// Outcome of offering an event to one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// The component does not handle this kind of event. Not an error.
    NotDelivered,
}

impl Delivery {
    pub fn is_delivered(self) -> bool {
        self == Self::Delivered
    }
}

impl From<bool> for Delivery {
    fn from(delivered: bool) -> Self {
        if delivered {
            Self::Delivered
        } else {
            Self::NotDelivered
        }
    }
}

/// Something that happened, concerning a target component.
pub trait Event: Any + fmt::Debug {
    /// The component the event is about. Not necessarily the component that
    /// ends up handling it.
    fn target(&self) -> ComponentId;

    /// Offer the event to `dest`. Reports [`Delivery::NotDelivered`] without
    /// side effects if `dest` lacks the handler capability.
    fn deliver(&self, tree: &mut ComponentTree, dest: ComponentId) -> Delivery;
}

/// What a handler can reach while it runs.
pub struct HandlerContext<'a> {
    tree: &'a mut ComponentTree,
    this: ComponentId,
}

impl<'a> HandlerContext<'a> {
    pub(crate) fn new(tree: &'a mut ComponentTree, this: ComponentId) -> Self {
        Self { tree, this }
    }

    /// The component handling the event.
    pub fn this(&self) -> ComponentId {
        self.this
    }

    pub fn tree(&mut self) -> &mut ComponentTree {
        self.tree
    }

    /// Post a new event from inside the handler.
    pub fn post(&mut self, event: &dyn Event) -> Delivery {
        self.tree.post(event)
    }

    /// Detach the handling component from its parent.
    pub fn detach(&mut self) -> bool {
        match self.tree.parent(self.this) {
            Some(parent) => self.tree.remove(parent, self.this),
            None => false,
        }
    }
}

/// A mouse click over a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    target: ComponentId,
    position: Point,
    buttons: MouseButtons,
}

impl ClickEvent {
    pub fn new(target: ComponentId, position: Point, buttons: MouseButtons) -> Self {
        Self {
            target,
            position,
            buttons,
        }
    }

    /// Work-area coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }
}

pub trait ClickHandler {
    fn click(&mut self, cx: &mut HandlerContext<'_>, event: &ClickEvent);
}

impl Event for ClickEvent {
    fn target(&self) -> ComponentId {
        self.target
    }

    fn deliver(&self, tree: &mut ComponentTree, dest: ComponentId) -> Delivery {
        tree.with_handler::<dyn ClickHandler, _>(dest, |h, cx| h.click(cx, self))
            .is_some()
            .into()
    }
}

/// A key press while a component has the input focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    target: ComponentId,
    key: KeyCode,
}

impl KeyEvent {
    pub fn new(target: ComponentId, key: KeyCode) -> Self {
        Self { target, key }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }
}

pub trait KeyHandler {
    fn key_pressed(&mut self, cx: &mut HandlerContext<'_>, event: &KeyEvent);
}

impl Event for KeyEvent {
    fn target(&self) -> ComponentId {
        self.target
    }

    fn deliver(&self, tree: &mut ComponentTree, dest: ComponentId) -> Delivery {
        tree.with_handler::<dyn KeyHandler, _>(dest, |h, cx| h.key_pressed(cx, self))
            .is_some()
            .into()
    }
}

/// A drag started on behalf of `target` was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragCompletedEvent {
    target: ComponentId,
    bbox: BBox,
}

impl DragCompletedEvent {
    pub fn new(target: ComponentId, bbox: BBox) -> Self {
        Self { target, bbox }
    }

    /// Final position of the drag box, in screen coordinates.
    pub fn bbox(&self) -> BBox {
        self.bbox
    }
}

pub trait DragHandler {
    fn drag_completed(&mut self, cx: &mut HandlerContext<'_>, event: &DragCompletedEvent);
}

impl Event for DragCompletedEvent {
    fn target(&self) -> ComponentId {
        self.target
    }

    fn deliver(&self, tree: &mut ComponentTree, dest: ComponentId) -> Delivery {
        tree.with_handler::<dyn DragHandler, _>(dest, |h, cx| h.drag_completed(cx, self))
            .is_some()
            .into()
    }
}

/// The user chose to throw away unsaved changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardEvent {
    target: ComponentId,
}

impl DiscardEvent {
    pub fn new(target: ComponentId) -> Self {
        Self { target }
    }
}

pub trait DiscardHandler {
    fn discard(&mut self, cx: &mut HandlerContext<'_>, event: &DiscardEvent);
}

impl Event for DiscardEvent {
    fn target(&self) -> ComponentId {
        self.target
    }

    fn deliver(&self, tree: &mut ComponentTree, dest: ComponentId) -> Delivery {
        tree.with_handler::<dyn DiscardHandler, _>(dest, |h, cx| h.discard(cx, self))
            .is_some()
            .into()
    }
}

/// The user asked to save. Whoever handles it supplies the data through a
/// [`DataSource`](corbel_wimp::DataSource).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEvent {
    target: ComponentId,
}

impl SaveEvent {
    pub fn new(target: ComponentId) -> Self {
        Self { target }
    }
}

pub trait SaveHandler {
    fn save(&mut self, cx: &mut HandlerContext<'_>, event: &SaveEvent);
}

impl Event for SaveEvent {
    fn target(&self) -> ComponentId {
        self.target
    }

    fn deliver(&self, tree: &mut ComponentTree, dest: ComponentId) -> Delivery {
        tree.with_handler::<dyn SaveHandler, _>(dest, |h, cx| h.save(cx, self))
            .is_some()
            .into()
    }
}
