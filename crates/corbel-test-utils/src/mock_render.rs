//! Mock drawing, print and font services.
//!
//! Each mock records what it was asked to do. Clones share their recording,
//! so a test can hand one clone to a context and inspect another.

use std::sync::Arc;

use corbel_core::geometry::{BBox, Point};
use corbel_render::{Color, ContextError, DrawingService, FontHandle, FontService, JobHandle, PrintService};
use parking_lot::Mutex;

/// Records a drawing-service call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Begin,
    End,
    SetClip(BBox),
    Fill { bbox: BBox, color: Color },
    Outline { bbox: BBox, color: Color },
    Text {
        at: Point,
        text: String,
        font: FontHandle,
        color: Color,
    },
}

/// Mock implementation of [`DrawingService`].
///
/// # Interior Mutability
///
/// The recording lives behind `Arc<Mutex<_>>` so a surface can be moved
/// into a context while the test keeps a clone for assertions.
#[derive(Clone, Default)]
pub struct MockSurface {
    calls: Arc<Mutex<Vec<DrawCall>>>,
    fail_begin: Arc<Mutex<bool>>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose `begin` fails until [`set_fail_begin`](Self::set_fail_begin)
    /// clears it.
    pub fn failing() -> Self {
        let surface = Self::new();
        surface.set_fail_begin(true);
        surface
    }

    pub fn set_fail_begin(&self, fail: bool) {
        *self.fail_begin.lock() = fail;
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.lock().clone()
    }

    pub fn count_begins(&self) -> usize {
        self.count(|call| matches!(call, DrawCall::Begin))
    }

    pub fn count_ends(&self) -> usize {
        self.count(|call| matches!(call, DrawCall::End))
    }

    /// Boxes passed to `fill_rect`, in order.
    pub fn fills(&self) -> Vec<BBox> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Fill { bbox, .. } => Some(*bbox),
                _ => None,
            })
            .collect()
    }

    /// Strings passed to `paint_text`, in order.
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| pred(call)).count()
    }

    fn record(&self, call: DrawCall) {
        self.calls.lock().push(call);
    }
}

impl DrawingService for MockSurface {
    fn begin(&mut self) -> Result<(), ContextError> {
        self.record(DrawCall::Begin);
        if *self.fail_begin.lock() {
            return Err(ContextError::ActivationFailed("mock surface refused".to_string()));
        }
        Ok(())
    }

    fn end(&mut self) {
        self.record(DrawCall::End);
    }

    fn set_clip(&mut self, clip: BBox) {
        self.record(DrawCall::SetClip(clip));
    }

    fn fill_rect(&mut self, bbox: BBox, color: Color) {
        self.record(DrawCall::Fill { bbox, color });
    }

    fn outline_rect(&mut self, bbox: BBox, color: Color) {
        self.record(DrawCall::Outline { bbox, color });
    }

    fn paint_text(&mut self, at: Point, text: &str, font: FontHandle, color: Color) {
        self.record(DrawCall::Text {
            at,
            text: text.to_string(),
            font,
            color,
        });
    }
}

/// Records a spooler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpoolCall {
    Select(Option<JobHandle>),
    Abort(JobHandle),
}

#[derive(Default)]
struct SpoolerState {
    current: Option<JobHandle>,
    calls: Vec<SpoolCall>,
    fail_select: bool,
    /// Handle reported by the next select instead of the real one.
    report_next: Option<Option<JobHandle>>,
}

/// Mock implementation of [`PrintService`].
#[derive(Clone, Default)]
pub struct MockSpooler {
    state: Arc<Mutex<SpoolerState>>,
}

impl MockSpooler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spooler with `job` already selected, as if another task were printing.
    pub fn with_current(job: JobHandle) -> Self {
        let spooler = Self::new();
        spooler.state.lock().current = Some(job);
        spooler
    }

    pub fn current(&self) -> Option<JobHandle> {
        self.state.lock().current
    }

    pub fn calls(&self) -> Vec<SpoolCall> {
        self.state.lock().calls.clone()
    }

    pub fn set_fail_select(&self, fail: bool) {
        self.state.lock().fail_select = fail;
    }

    /// Make the next `select_job` report `reported` as the previous job,
    /// simulating a spooler whose state changed behind our back.
    pub fn report_on_next_select(&self, reported: Option<JobHandle>) {
        self.state.lock().report_next = Some(reported);
    }
}

impl PrintService for MockSpooler {
    fn select_job(&mut self, job: Option<JobHandle>) -> Result<Option<JobHandle>, ContextError> {
        let mut state = self.state.lock();
        state.calls.push(SpoolCall::Select(job));
        if state.fail_select {
            return Err(ContextError::Service("mock spooler refused selection".to_string()));
        }
        let previous = std::mem::replace(&mut state.current, job);
        Ok(state.report_next.take().unwrap_or(previous))
    }

    fn abort_job(&mut self, job: JobHandle) -> Result<(), ContextError> {
        let mut state = self.state.lock();
        state.calls.push(SpoolCall::Abort(job));
        if state.current == Some(job) {
            state.current = None;
        }
        Ok(())
    }
}

/// Fixed-pitch [`FontService`] with configurable metrics.
#[derive(Clone)]
pub struct MockFontService {
    char_width: i32,
    line_height: i32,
    claimed: Arc<Mutex<Vec<FontHandle>>>,
    next: Arc<Mutex<u32>>,
}

impl MockFontService {
    pub fn new(char_width: i32, line_height: i32) -> Self {
        Self {
            char_width,
            line_height,
            claimed: Arc::new(Mutex::new(Vec::new())),
            next: Arc::new(Mutex::new(1)),
        }
    }

    /// Fonts claimed and not yet lost.
    pub fn claimed(&self) -> Vec<FontHandle> {
        self.claimed.lock().clone()
    }
}

impl FontService for MockFontService {
    fn find_font(&mut self, _name: &str, _size: Point) -> Result<FontHandle, ContextError> {
        let mut next = self.next.lock();
        let handle = FontHandle(*next);
        *next += 1;
        self.claimed.lock().push(handle);
        Ok(handle)
    }

    fn lose_font(&mut self, font: FontHandle) {
        self.claimed.lock().retain(|h| *h != font);
    }

    fn string_width(&self, _font: FontHandle, text: &str) -> i32 {
        text.chars().count() as i32 * self.char_width
    }

    fn line_height(&self, _font: FontHandle) -> i32 {
        self.line_height
    }
}
