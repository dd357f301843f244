//! Drag operations started on behalf of a component.

use corbel_core::geometry::BBox;
use corbel_wimp::{DragKind, WimpError, WindowHandle, WindowManager};

use crate::component::ComponentId;
use crate::event::DragCompletedEvent;

/// Remembers which component the drag in flight belongs to.
///
/// The window manager runs one drag at a time and reports only the final
/// box, so the tracker supplies the missing target when the completion
/// record arrives.
#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<(ComponentId, WindowHandle)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `bounds`, given in `window`'s work-area coordinates.
    pub fn start(
        &mut self,
        wm: &mut dyn WindowManager,
        source: ComponentId,
        window: WindowHandle,
        bounds: BBox,
        kind: DragKind,
    ) -> Result<(), WimpError> {
        if let Some((current, _)) = self.active {
            tracing::warn!("{:?} asked to drag while {:?} is dragging", source, current);
            return Err(WimpError::DragInProgress);
        }
        let origin = wm.window_origin(window)?;
        wm.start_drag(window, bounds + origin, kind)?;
        tracing::debug!("drag started for {:?} in {:?}", source, window);
        self.active = Some((source, window));
        Ok(())
    }

    /// Resolve a completion record to an event for the drag's source.
    ///
    /// Returns `None` if no drag was being tracked.
    pub fn finish(&mut self, bbox: BBox) -> Option<DragCompletedEvent> {
        match self.active.take() {
            Some((source, _)) => Some(DragCompletedEvent::new(source, bbox)),
            None => {
                tracing::debug!("drag completion {:?} with no drag in flight", bbox);
                None
            }
        }
    }

    /// Cancel the drag in flight. The tracker is cleared even if the window
    /// manager reports a failure.
    pub fn abort(&mut self, wm: &mut dyn WindowManager) -> Result<(), WimpError> {
        if self.active.take().is_none() {
            return Err(WimpError::NoDrag);
        }
        wm.stop_drag()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The component the drag in flight belongs to.
    pub fn source(&self) -> Option<ComponentId> {
        self.active.map(|(source, _)| source)
    }

    pub fn window(&self) -> Option<WindowHandle> {
        self.active.map(|(_, window)| window)
    }
}
