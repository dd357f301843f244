//! Printing through a spooled job.

use corbel_core::geometry::{BBox, LinearTransformation, Point};

use crate::context::{GraphicsContext, Phase};
use crate::error::ContextError;
use crate::service::{DrawingService, JobHandle, PrintService};

/// OS units to millipoints (one OS unit is 1/180 inch, 400 millipoints).
pub const OS_UNITS_TO_MILLIPOINTS: LinearTransformation =
    LinearTransformation::scale(400 * LinearTransformation::SCALE, 400 * LinearTransformation::SCALE);

/// Context that redirects a base context's output into a print job.
///
/// Activation activates the base context first and then selects the job.
/// Deactivation restores whatever job was current before, then deactivates
/// the base. The spooler state may have changed between the two halves, so
/// deactivation checks the job it gets back and still completes the
/// teardown. A mismatch is kept and handed back by [`PrintContext::finish`],
/// [`PrintContext::abort`] or [`PrintContext::take_error`].
pub struct PrintContext<C: GraphicsContext, P: PrintService> {
    base: C,
    spooler: P,
    job: JobHandle,
    /// Job to reselect on deactivation; `Some` once selection succeeded.
    previous: Option<Option<JobHandle>>,
    origin: Point,
    transformation: LinearTransformation,
    phase: Phase,
    aborted: bool,
    /// Failure from the last restore, not yet reported.
    teardown_error: Option<ContextError>,
}

impl<C: GraphicsContext, P: PrintService> PrintContext<C, P> {
    pub fn new(base: C, spooler: P, job: JobHandle) -> Self {
        Self {
            base,
            spooler,
            job,
            previous: None,
            origin: Point::ZERO,
            transformation: OS_UNITS_TO_MILLIPOINTS,
            phase: Phase::Idle,
            aborted: false,
            teardown_error: None,
        }
    }

    /// Device position of the page rectangle being printed.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_transformation(mut self, transformation: LinearTransformation) -> Self {
        self.transformation = transformation;
        self
    }

    pub fn job(&self) -> JobHandle {
        self.job
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn base(&self) -> &C {
        &self.base
    }

    pub fn spooler(&self) -> &P {
        &self.spooler
    }

    /// Take the failure reported while restoring the previous job, if any.
    pub fn take_error(&mut self) -> Option<ContextError> {
        self.teardown_error.take()
    }

    /// Close any open span and report how the teardown went.
    pub fn finish(mut self) -> Result<(), ContextError> {
        self.deactivate();
        match self.take_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Abandon the job. Deactivates first if a span is open; later
    /// activations fail with [`ContextError::Aborted`].
    ///
    /// The job is aborted even when restoring the previous job failed; that
    /// failure is returned in preference to the spooler's answer.
    pub fn abort(&mut self) -> Result<(), ContextError> {
        if self.aborted {
            return Ok(());
        }
        tracing::info!("aborting print job {:?}", self.job);
        self.deactivate();
        self.aborted = true;
        let aborted = self.spooler.abort_job(self.job);
        match self.take_error() {
            Some(e) => {
                if let Err(abort_error) = aborted {
                    tracing::warn!("abort of {:?} also failed: {}", self.job, abort_error);
                }
                Err(e)
            }
            None => aborted,
        }
    }

    fn restore_previous_job(&mut self) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        match self.spooler.select_job(previous) {
            Ok(Some(found)) if found == self.job => {}
            Ok(found) => {
                let e = ContextError::JobMismatch {
                    expected: Some(self.job),
                    found,
                };
                tracing::warn!("{}; continuing teardown", e);
                self.teardown_error = Some(e);
            }
            Err(e) => {
                tracing::warn!("failed to restore previous print job: {}; continuing teardown", e);
                self.teardown_error = Some(e);
            }
        }
    }
}

impl<C: GraphicsContext, P: PrintService> GraphicsContext for PrintContext<C, P> {
    fn activate(&mut self) -> Result<(), ContextError> {
        if self.aborted {
            return Err(ContextError::Aborted);
        }
        if self.phase == Phase::Active {
            tracing::warn!("print context activated twice");
            return Ok(());
        }
        self.phase = Phase::Activating;
        self.base.activate()?;
        let previous = self.spooler.select_job(Some(self.job))?;
        self.previous = Some(previous);
        self.phase = Phase::Active;
        tracing::debug!("print job {:?} selected (previous {:?})", self.job, previous);
        Ok(())
    }

    fn deactivate(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        self.phase = Phase::Idle;
        self.restore_previous_job();
        self.base.deactivate();
    }

    fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn clip(&self) -> BBox {
        self.base.clip()
    }

    fn transformation(&self) -> LinearTransformation {
        self.transformation
    }

    fn surface(&mut self) -> &mut dyn DrawingService {
        self.base.surface()
    }
}

impl<C: GraphicsContext, P: PrintService> Drop for PrintContext<C, P> {
    fn drop(&mut self) {
        if self.phase != Phase::Idle {
            tracing::warn!("print context dropped while active");
            self.deactivate();
        }
    }
}
