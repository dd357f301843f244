//! The window-manager service the host binding implements.

use corbel_core::geometry::{BBox, Point};

use crate::error::WimpError;
use crate::event::RawEvent;
use crate::handle::WindowHandle;

/// What the window manager draws while the user drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragKind {
    /// A fixed-size dotted box that follows the pointer.
    #[default]
    FixedBox,
    /// A box anchored at the start point that stretches with the pointer.
    RubberBox,
    /// A solid sprite of the dragged object.
    Sprite,
}

/// Host window manager operations corbel calls into.
///
/// Implementations are driven from the single event-loop thread and never
/// block waiting for another thread.
pub trait WindowManager {
    /// Fetch the next input record, or [`RawEvent::Null`] when idle.
    fn poll(&mut self) -> RawEvent;

    /// Ask for `clip` (work-area coordinates) of `window` to be redrawn. The
    /// window manager answers later with a [`RawEvent::RedrawRequest`].
    fn request_redraw(&mut self, window: WindowHandle, clip: BBox) -> Result<(), WimpError>;

    /// Screen position of the work-area origin of `window`.
    fn window_origin(&self, window: WindowHandle) -> Result<Point, WimpError>;

    /// Start a drag of `bounds` (screen coordinates). Completion arrives as
    /// a [`RawEvent::DragBoxCompleted`].
    fn start_drag(
        &mut self,
        window: WindowHandle,
        bounds: BBox,
        kind: DragKind,
    ) -> Result<(), WimpError>;

    /// Cancel the drag in flight. No completion record follows.
    fn stop_drag(&mut self) -> Result<(), WimpError>;
}
