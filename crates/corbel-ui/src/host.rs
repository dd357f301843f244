//! Glue between window-manager records and the component tree.
//!
//! The window manager names things by window and icon handle. The
//! [`HandleIndex`] maps those pairs back to components, and [`translate`]
//! uses it to turn raw records into typed events with a resolved target.

use corbel_core::alloc::HashMap;
use corbel_core::geometry::BBox;
use corbel_wimp::{IconHandle, RawEvent, WindowHandle};

use crate::component::ComponentId;
use crate::event::{ClickEvent, Event, KeyEvent};

/// Lookup from `(window, icon)` to the component that owns it.
///
/// A window's root component is bound to its work area
/// ([`IconHandle::WORK_AREA`]); records over an icon with no binding of its
/// own fall back to that.
#[derive(Debug, Default)]
pub struct HandleIndex {
    bindings: HashMap<(WindowHandle, IconHandle), ComponentId>,
}

impl HandleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id` to an icon, returning the component previously bound there.
    pub fn bind(
        &mut self,
        window: WindowHandle,
        icon: IconHandle,
        id: ComponentId,
    ) -> Option<ComponentId> {
        let previous = self.bindings.insert((window, icon), id);
        if let Some(previous) = previous.filter(|p| *p != id) {
            tracing::debug!(
                "rebinding {:?}/{:?} from {:?} to {:?}",
                window,
                icon,
                previous,
                id
            );
        }
        previous
    }

    pub fn unbind(&mut self, window: WindowHandle, icon: IconHandle) -> Option<ComponentId> {
        self.bindings.remove(&(window, icon))
    }

    /// Drop every binding in `window`, returning the components that were
    /// bound.
    pub fn unbind_window(&mut self, window: WindowHandle) -> Vec<ComponentId> {
        let mut removed = Vec::new();
        self.bindings.retain(|(w, _), id| {
            if *w == window {
                removed.push(*id);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Drop every binding that resolves to `id`.
    pub fn unbind_component(&mut self, id: ComponentId) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, bound| *bound != id);
        before - self.bindings.len()
    }

    /// The component for `(window, icon)`, falling back to the window's
    /// work-area binding.
    pub fn lookup(&self, window: WindowHandle, icon: IconHandle) -> Option<ComponentId> {
        self.bindings
            .get(&(window, icon))
            .or_else(|| self.bindings.get(&(window, IconHandle::WORK_AREA)))
            .copied()
    }

    /// The component bound to the work area of `window`.
    pub fn window_root(&self, window: WindowHandle) -> Option<ComponentId> {
        self.bindings.get(&(window, IconHandle::WORK_AREA)).copied()
    }

    /// The window whose work area `id` is bound to.
    pub fn window_of(&self, id: ComponentId) -> Option<WindowHandle> {
        self.bindings
            .iter()
            .find(|((_, icon), bound)| icon.is_work_area() && **bound == id)
            .map(|((window, _), _)| *window)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A raw record after translation.
#[derive(Debug)]
pub enum Translated {
    /// Post this to the tree.
    Event(Box<dyn Event>),
    /// Repaint `clip` of the window's root.
    Redraw { window: WindowHandle, clip: BBox },
    /// The user asked to close the window.
    Close { window: WindowHandle },
    /// A drag box was released. The drag tracker knows whose drag it was.
    DragCompleted(BBox),
    /// Nothing to do: an idle record, or one over an unbound handle.
    Ignored,
}

/// Translate one raw record, resolving its handles through `index`.
pub fn translate(raw: &RawEvent, index: &HandleIndex) -> Translated {
    match *raw {
        RawEvent::MouseClick {
            window,
            icon,
            position,
            buttons,
        } => match index.lookup(window, icon) {
            Some(target) => Translated::Event(Box::new(ClickEvent::new(target, position, buttons))),
            None => unbound(raw),
        },
        RawEvent::KeyPressed { window, icon, key } => match index.lookup(window, icon) {
            Some(target) => Translated::Event(Box::new(KeyEvent::new(target, key))),
            None => unbound(raw),
        },
        RawEvent::RedrawRequest { window, clip } => Translated::Redraw { window, clip },
        RawEvent::CloseRequest { window } => Translated::Close { window },
        RawEvent::DragBoxCompleted { bbox } => Translated::DragCompleted(bbox),
        RawEvent::Null => Translated::Ignored,
    }
}

fn unbound(raw: &RawEvent) -> Translated {
    tracing::debug!("no component bound for {:?}", raw);
    Translated::Ignored
}
