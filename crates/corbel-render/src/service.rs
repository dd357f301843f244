//! Interfaces to the host's drawing and printing services.
//!
//! corbel never talks to a device directly. A [`DrawingService`] receives
//! primitives in device coordinates from a graphics context, and a
//! [`PrintService`] switches drawing output to a spooled job.

use corbel_core::geometry::{BBox, Point};

use crate::color::Color;
use crate::error::ContextError;
use crate::font::FontHandle;

bitflags::bitflags! {
    /// Placement of painted text inside its box.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextFlags: u8 {
        const CENTRE_X = 1 << 0;
        const CENTRE_Y = 1 << 1;
        const RIGHT    = 1 << 2;
        const CENTRE   = Self::CENTRE_X.bits() | Self::CENTRE_Y.bits();
    }
}

/// Primitive drawing operations in device coordinates.
pub trait DrawingService {
    /// Start a drawing span. Called when a context activates.
    fn begin(&mut self) -> Result<(), ContextError>;

    /// End the current drawing span. Must tolerate being called without a
    /// matching successful [`begin`](Self::begin).
    fn end(&mut self);

    fn set_clip(&mut self, clip: BBox);

    fn fill_rect(&mut self, bbox: BBox, color: Color);

    fn outline_rect(&mut self, bbox: BBox, color: Color);

    fn paint_text(&mut self, at: Point, text: &str, font: FontHandle, color: Color);
}

impl<S: DrawingService + ?Sized> DrawingService for &mut S {
    fn begin(&mut self) -> Result<(), ContextError> {
        (**self).begin()
    }

    fn end(&mut self) {
        (**self).end()
    }

    fn set_clip(&mut self, clip: BBox) {
        (**self).set_clip(clip)
    }

    fn fill_rect(&mut self, bbox: BBox, color: Color) {
        (**self).fill_rect(bbox, color)
    }

    fn outline_rect(&mut self, bbox: BBox, color: Color) {
        (**self).outline_rect(bbox, color)
    }

    fn paint_text(&mut self, at: Point, text: &str, font: FontHandle, color: Color) {
        (**self).paint_text(at, text, font, color)
    }
}

/// Spooler job identifier as issued by the print service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobHandle(pub u32);

/// Print spooler operations.
pub trait PrintService {
    /// Make `job` the current output and return the job that was current
    /// before, if any. Passing `None` deselects all jobs.
    fn select_job(&mut self, job: Option<JobHandle>) -> Result<Option<JobHandle>, ContextError>;

    /// Abandon `job` and discard its output.
    fn abort_job(&mut self, job: JobHandle) -> Result<(), ContextError>;
}
