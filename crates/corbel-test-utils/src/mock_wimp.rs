//! Scripted window manager.

use std::collections::VecDeque;
use std::sync::Arc;

use corbel_core::alloc::HashMap;
use corbel_core::geometry::{BBox, Point};
use corbel_wimp::{DragKind, RawEvent, WimpError, WindowHandle, WindowManager};
use parking_lot::Mutex;

/// Records a window-manager request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WimpCall {
    RequestRedraw { window: WindowHandle, clip: BBox },
    StartDrag {
        window: WindowHandle,
        bounds: BBox,
        kind: DragKind,
    },
    StopDrag,
}

#[derive(Default)]
struct WimpState {
    script: VecDeque<RawEvent>,
    calls: Vec<WimpCall>,
    origins: HashMap<WindowHandle, Point>,
    dragging: bool,
    /// Answer redraw requests by queueing a redraw record.
    echo_redraws: bool,
}

/// Mock implementation of [`WindowManager`].
///
/// `poll` hands out the scripted records in order and then [`RawEvent::Null`]
/// forever. Clones share state.
#[derive(Clone, Default)]
pub struct MockWindowManager {
    state: Arc<Mutex<WimpState>>,
}

impl MockWindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known window with its work-area origin on screen.
    pub fn with_window(self, window: WindowHandle, origin: Point) -> Self {
        self.state.lock().origins.insert(window, origin);
        self
    }

    /// Queue redraw records in response to `request_redraw`, as a real
    /// window manager would.
    pub fn echo_redraws(self) -> Self {
        self.state.lock().echo_redraws = true;
        self
    }

    /// Append a record to the script.
    pub fn push(&self, event: RawEvent) {
        self.state.lock().script.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.state.lock().script.len()
    }

    pub fn calls(&self) -> Vec<WimpCall> {
        self.state.lock().calls.clone()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.lock().dragging
    }

    /// Release the drag in flight, queueing its completion record.
    pub fn release_drag(&self, bbox: BBox) {
        let mut state = self.state.lock();
        if state.dragging {
            state.dragging = false;
            state.script.push_back(RawEvent::DragBoxCompleted { bbox });
        }
    }
}

impl WindowManager for MockWindowManager {
    fn poll(&mut self) -> RawEvent {
        self.state.lock().script.pop_front().unwrap_or(RawEvent::Null)
    }

    fn request_redraw(&mut self, window: WindowHandle, clip: BBox) -> Result<(), WimpError> {
        let mut state = self.state.lock();
        if !state.origins.contains_key(&window) {
            return Err(WimpError::UnknownWindow(window));
        }
        state.calls.push(WimpCall::RequestRedraw { window, clip });
        if state.echo_redraws {
            state
                .script
                .push_back(RawEvent::RedrawRequest { window, clip });
        }
        Ok(())
    }

    fn window_origin(&self, window: WindowHandle) -> Result<Point, WimpError> {
        self.state
            .lock()
            .origins
            .get(&window)
            .copied()
            .ok_or(WimpError::UnknownWindow(window))
    }

    fn start_drag(
        &mut self,
        window: WindowHandle,
        bounds: BBox,
        kind: DragKind,
    ) -> Result<(), WimpError> {
        let mut state = self.state.lock();
        if state.dragging {
            return Err(WimpError::DragInProgress);
        }
        state.dragging = true;
        state.calls.push(WimpCall::StartDrag {
            window,
            bounds,
            kind,
        });
        Ok(())
    }

    fn stop_drag(&mut self) -> Result<(), WimpError> {
        let mut state = self.state.lock();
        if !state.dragging {
            return Err(WimpError::NoDrag);
        }
        state.dragging = false;
        state.calls.push(WimpCall::StopDrag);
        Ok(())
    }
}
