//! The single-threaded event loop that connects a window manager, a drawing
//! service and a component tree.
//!
//! One turn of the loop ([`Application::poll_once`]):
//! 1. poll the window manager until it reports nothing more to do
//! 2. translate the batch and deliver each event synchronously
//! 3. lay out every component tree that changed
//! 4. ask the window manager to redraw the windows whose layout changed
//!
//! Redraw requests come back as records on a later turn and are painted
//! through a [`ScreenContext`] that stays active only for that repaint.

use corbel_core::config::Config;
use corbel_core::geometry::BBox;
use corbel_core::profiling::{self, profile_function};
use corbel_render::{DrawingService, GraphicsContext, ScreenContext};
use corbel_ui::{ComponentId, ComponentTree, DragTracker, HandleIndex, Translated, UiError, translate};
use corbel_wimp::{DragKind, EventQueue, IconHandle, RawEvent, WindowHandle, WindowManager};

/// A running corbel application.
///
/// # Example
///
/// ```ignore
/// use corbel::prelude::*;
///
/// let mut app = Application::new(host_wm, host_surface, Config::from_env());
/// let dialogue = SaveDialogue::build(app.tree_mut(), "Save changes?", app.config())?;
/// app.open_window(WindowHandle(1), dialogue)?;
/// app.run_until_idle(100)?;
/// ```
pub struct Application<W: WindowManager, S: DrawingService> {
    tree: ComponentTree,
    index: HandleIndex,
    drag: DragTracker,
    queue: EventQueue,
    wm: W,
    surface: S,
    config: Config,
}

impl<W: WindowManager, S: DrawingService> Application<W, S> {
    pub fn new(wm: W, surface: S, config: Config) -> Self {
        Self {
            tree: ComponentTree::new(),
            index: HandleIndex::new(),
            drag: DragTracker::new(),
            queue: EventQueue::new(),
            wm,
            surface,
            config,
        }
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    pub fn index(&self) -> &HandleIndex {
        &self.index
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn window_manager(&self) -> &W {
        &self.wm
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }

    /// Show `root` as the contents of `window`.
    ///
    /// `root` must be a detached component. It is laid out on the next turn.
    pub fn open_window(&mut self, window: WindowHandle, root: ComponentId) -> Result<(), UiError> {
        if !self.tree.contains(root) {
            return Err(UiError::StaleComponent(root));
        }
        if self.tree.parent(root).is_some() {
            return Err(UiError::AlreadyAttached(root));
        }
        if let Some(previous) = self.index.bind(window, IconHandle::WORK_AREA, root) {
            tracing::warn!("{:?} replaced {:?} as the root of {:?}", root, previous, window);
        }
        self.tree.invalidate(root);
        tracing::info!("opened {:?} with root {:?}", window, root);
        Ok(())
    }

    /// Route records for `icon` in `window` to `id`.
    pub fn bind_icon(&mut self, window: WindowHandle, icon: IconHandle, id: ComponentId) {
        self.index.bind(window, icon, id);
    }

    /// Close `window` and destroy its component tree.
    ///
    /// A drag started in the window is abandoned first. The window manager
    /// may already consider that drag finished; the window still closes.
    pub fn close_window(&mut self, window: WindowHandle) -> Result<(), UiError> {
        if self.drag.window() == Some(window) {
            if let Err(e) = self.drag.abort(&mut self.wm) {
                tracing::warn!("stopping the drag in {:?} failed: {}", window, e);
            }
        }
        let root = self.index.window_root(window);
        self.index.unbind_window(window);
        if let Some(root) = root.filter(|r| self.tree.contains(*r)) {
            self.index.unbind_component(root);
            self.tree.destroy(root)?;
        }
        tracing::info!("closed {:?}", window);
        Ok(())
    }

    /// Start a drag on behalf of `source`. `bounds` is in the work-area
    /// coordinates of `window`.
    pub fn start_drag(
        &mut self,
        source: ComponentId,
        window: WindowHandle,
        bounds: BBox,
        kind: DragKind,
    ) -> Result<(), UiError> {
        self.drag.start(&mut self.wm, source, window, bounds, kind)?;
        Ok(())
    }

    pub fn abort_drag(&mut self) -> Result<(), UiError> {
        self.drag.abort(&mut self.wm)?;
        Ok(())
    }

    /// Run one turn of the event loop. Returns `false` when there was
    /// nothing to do.
    ///
    /// A record that fails does not stop the turn: the rest of the batch is
    /// still handled and layout still runs. The first failure is returned
    /// once the turn is over.
    pub fn poll_once(&mut self) -> Result<bool, UiError> {
        profiling::new_frame();
        profile_function!();

        loop {
            match self.wm.poll() {
                RawEvent::Null => break,
                raw => self.queue.push(raw),
            }
        }

        let batch = self.queue.drain();
        let mut busy = !batch.is_empty();
        let mut first_error = None;
        for raw in batch.iter() {
            if let Err(e) = self.handle(raw) {
                tracing::error!("handling {:?} failed: {}", raw, e);
                first_error.get_or_insert(e);
            }
        }

        let laid_out = self.tree.flush_layout();
        busy |= !laid_out.is_empty();
        if !laid_out.is_empty() {
            tracing::trace!("{}", self.tree.metrics().format_summary());
        }
        for root in laid_out {
            let Some(window) = self.index.window_of(root) else {
                continue;
            };
            if let Some(border) = self.tree.border_box(root) {
                if let Err(e) = self.wm.request_redraw(window, border) {
                    tracing::error!("redraw request for {:?} failed: {}", window, e);
                    first_error.get_or_insert(e.into());
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(busy),
        }
    }

    /// Run turns until one finds nothing to do, or `max_turns` have run.
    /// Returns the number of turns that did work.
    pub fn run_until_idle(&mut self, max_turns: usize) -> Result<usize, UiError> {
        for turn in 0..max_turns {
            if !self.poll_once()? {
                return Ok(turn);
            }
        }
        tracing::warn!("still busy after {} turns", max_turns);
        Ok(max_turns)
    }

    fn handle(&mut self, raw: &RawEvent) -> Result<(), UiError> {
        match translate(raw, &self.index) {
            Translated::Event(event) => {
                if !self.tree.post(event.as_ref()).is_delivered() {
                    tracing::debug!("{:?} was not handled", event);
                }
            }
            Translated::Redraw { window, clip } => self.redraw(window, clip)?,
            Translated::Close { window } => self.close_window(window)?,
            Translated::DragCompleted(bbox) => {
                if let Some(event) = self.drag.finish(bbox) {
                    self.tree.post(&event);
                }
            }
            Translated::Ignored => {}
        }
        Ok(())
    }

    fn redraw(&mut self, window: WindowHandle, clip: BBox) -> Result<(), UiError> {
        profile_function!();
        let Some(root) = self.index.window_root(window) else {
            tracing::debug!("redraw of {:?} with no root", window);
            return Ok(());
        };
        let origin = self.wm.window_origin(window)?;

        let mut ctx = ScreenContext::new(&mut self.surface, origin, clip);
        let mut guard = ctx.begin()?;
        self.tree.redraw(root, &mut *guard, clip)?;
        Ok(())
    }
}
